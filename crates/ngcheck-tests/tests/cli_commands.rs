//! CLI command flows over scene directories.

use ngcheck_cli::commands::check;
use ngcheck_cli::commands::config::build_config;
use ngcheck_cli::commands::json_output::OutputFormat;
use ngcheck_cli::commands::select::{self, SelectTarget};
use ngcheck_core::CheckConfig;
use ngcheck_tests::fixtures::{self, SceneDir};
use ngcheck_tests::glb::{scene_glb, to_f32, triangulate, GlbMesh};
use std::fs;
use std::process::ExitCode;

fn populated_dir() -> SceneDir {
    let dir = SceneDir::new();
    dir.write(
        "props/cube.obj",
        fixtures::mesh_to_obj("Cube", &fixtures::cube(true)),
    );
    let positions = to_f32(&fixtures::cube_vertices());
    let indices = triangulate(&fixtures::cube_loops());
    dir.write(
        "props/crate.glb",
        scene_glb(
            &[GlbMesh {
                name: "Crate",
                positions: &positions,
                indices: &indices,
                with_uv: true,
            }],
            &["CrateRoot"],
        ),
    );
    dir.write("README.txt", "not a scene");
    dir
}

#[test]
fn clean_directory_passes() {
    let dir = populated_dir();
    let code = check::run(
        &[],
        Some(dir.path().to_str().unwrap()),
        &CheckConfig::default(),
        None,
        OutputFormat::Json,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn ngon_in_directory_fails_and_reports() {
    let dir = populated_dir();
    dir.write(
        "props/pent.obj",
        fixtures::mesh_to_obj("Pent", &fixtures::pentagon()),
    );
    let report = dir.path().join("report.txt");

    let code = check::run(
        &[],
        Some(dir.path().to_str().unwrap()),
        &CheckConfig::default(),
        Some(report.to_str().unwrap()),
        OutputFormat::Text,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("--- OK | Cube ---"));
    assert!(text.contains("--- OK | Crate ---"));
    assert!(text.contains("--- NG | Pent ---"));
    assert!(text.contains("Reason: N-gon detected, Boundary edges, UV missing"));
    assert!(!text.contains("CrateRoot"));
}

#[test]
fn check_flags_decide_what_counts() {
    let dir = SceneDir::new();
    let pent = dir.write("pent.obj", fixtures::mesh_to_obj("Pent", &fixtures::pentagon()));
    let config = build_config(
        None,
        &["uv-missing".to_string(), "bd".to_string()],
        Some("ngon,boundary,uv"),
        None,
    )
    .unwrap();
    // only ngon is left enabled
    let code = check::run(
        &[pent.display().to_string()],
        None,
        &config,
        None,
        OutputFormat::Json,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));

    let config = build_config(None, &["ngon".to_string()], Some("ngon,uv"), None).unwrap();
    let code = check::run(
        &[pent.display().to_string()],
        None,
        &config,
        None,
        OutputFormat::Json,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));

    let config = build_config(None, &[], Some("nm,flip"), None).unwrap();
    let code = check::run(
        &[pent.display().to_string()],
        None,
        &config,
        None,
        OutputFormat::Json,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn scene_without_meshes_is_an_error() {
    let dir = SceneDir::new();
    let glb = dir.write("empty.glb", scene_glb(&[], &["Root"]));
    let err = check::run(
        &[glb.display().to_string()],
        None,
        &CheckConfig::default(),
        None,
        OutputFormat::Text,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "No mesh selected");
}

#[test]
fn select_reports_named_object() {
    let dir = populated_dir();
    let code = select::run(
        dir.path().join("props/crate.glb").to_str().unwrap(),
        Some("Crate"),
        SelectTarget::Boundary,
        &CheckConfig::default(),
        OutputFormat::Json,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn select_rejects_non_mesh_object() {
    let dir = populated_dir();
    let err = select::run(
        dir.path().join("props/crate.glb").to_str().unwrap(),
        Some("CrateRoot"),
        SelectTarget::NgFaces,
        &CheckConfig::default(),
        OutputFormat::Text,
    )
    .unwrap_err();
    assert!(err.to_string().contains("is not a mesh"));
}
