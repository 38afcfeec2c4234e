//! Golden-text tests for the batch report.

use ngcheck_core::report::{format_block, format_reason};
use ngcheck_core::{
    analyze, analyze_batch, BatchReport, CheckConfig, EntryStatus, ObjectKind, SceneObject,
};
use ngcheck_tests::fixtures;
use pretty_assertions::assert_eq;

fn mixed_scene() -> Vec<SceneObject> {
    vec![
        SceneObject::edit_mesh("Cube", fixtures::cube(true)),
        SceneObject::without_mesh("Sun", ObjectKind::Light),
        SceneObject::edit_mesh("Pent", fixtures::pentagon()),
        SceneObject::stored_mesh("Stored", fixtures::cube_soup(true)),
    ]
}

#[test]
fn full_report_text() {
    let report = BatchReport::build(&analyze_batch(&mixed_scene()), &CheckConfig::default());

    let expected = "\
=== Mesh NG Checker Report ===

--- OK | Cube ---
Reason: No issues
Object: Cube
Faces: 6
N-gons: 0
Non-manifold edges: 0
Boundary edges: 0
UV: YES
Flipped suspect (heuristic): 0 (0.0%)


--- ERROR | Sun ---

--- NG | Pent ---
Reason: N-gon detected, Boundary edges, UV missing
Object: Pent
Faces: 1
N-gons: 1
Non-manifold edges: 0
Boundary edges: 5
UV: NO
Flipped suspect (heuristic): 0 (0.0%)


--- OK | Stored ---
Reason: No issues
Object: Stored
Faces: 6
N-gons: 0
Non-manifold edges: 0
Boundary edges: 0
UV: YES
Flipped suspect (heuristic): 0 (0.0%)

";
    assert_eq!(report.full_text(), expected);
}

#[test]
fn status_line_orders_ng_first() {
    let report = BatchReport::build(&analyze_batch(&mixed_scene()), &CheckConfig::default());
    assert_eq!(
        report.status_line(),
        "NG | Pent | NGon:1 NM:0 BD:5 UV:N || OK | Cube | NGon:0 NM:0 BD:0 UV:Y \
         || ERROR | Sun || OK | Stored | NGon:0 NM:0 BD:0 UV:Y"
    );
    assert_eq!(report.selection.active.as_deref(), Some("Pent"));
    assert_eq!(report.entries[1].status, EntryStatus::Error);
}

#[test]
fn reversed_cube_block_shows_ratio() {
    let result = analyze(&fixtures::reversed_cube(true));
    assert_eq!(
        format_block("Reversed", &result),
        "Object: Reversed\n\
         Faces: 6\n\
         N-gons: 0\n\
         Non-manifold edges: 0\n\
         Boundary edges: 0\n\
         UV: YES\n\
         Flipped suspect (heuristic): 1 (16.7%)\n"
    );

    let strict = CheckConfig::default().with_flip_ratio_threshold(0.1);
    assert_eq!(format_reason(&result, &strict), "Flip ratio exceeded");
    assert_eq!(format_reason(&result, &CheckConfig::default()), "No issues");
}

#[test]
fn reason_ignores_disabled_checks() {
    let result = analyze(&fixtures::pentagon());
    let config = CheckConfig::none().with_check(ngcheck_core::Check::Boundary, true);
    assert_eq!(format_reason(&result, &config), "Boundary edges");
}
