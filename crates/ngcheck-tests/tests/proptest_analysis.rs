//! Property-based tests for the analyzer and classifier using proptest.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ngcheck-tests --test proptest_analysis
//! ```

use proptest::prelude::*;

use ngcheck_core::analyze::is_flip_suspect;
use ngcheck_core::geometry::Vec3;
use ngcheck_core::io::obj::parse_obj;
use ngcheck_core::{analyze, verdict, Check, CheckConfig, Mesh, PolygonSoup, Verdict};

// ============================================================================
// Strategies
// ============================================================================

fn coord() -> impl Strategy<Value = f64> {
    -10.0f64..10.0
}

fn vertex() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| [x, y, z])
}

/// Vertex positions plus polygons whose loops never repeat a vertex.
fn polygon_soup() -> impl Strategy<Value = (Vec<Vec3>, Vec<Vec<usize>>)> {
    (4usize..12).prop_flat_map(|n| {
        let all: Vec<usize> = (0..n).collect();
        let max_len = n.min(7);
        let polygon = prop::sample::subsequence(all, 3..=max_len).prop_shuffle();
        (
            prop::collection::vec(vertex(), n),
            prop::collection::vec(polygon, 0..10),
        )
    })
}

fn config() -> impl Strategy<Value = CheckConfig> {
    (
        any::<[bool; 5]>(),
        0.0f64..=1.0,
    )
        .prop_map(|(flags, threshold)| {
            let mut cfg = CheckConfig::none().with_flip_ratio_threshold(threshold);
            for (check, enabled) in Check::ALL.into_iter().zip(flags) {
                cfg.set(check, enabled);
            }
            cfg
        })
}

fn build((vertices, polygons): (Vec<Vec3>, Vec<Vec<usize>>)) -> Mesh {
    Mesh::from_polygons(vertices, &polygons, &[], Vec::new())
        .expect("generated polygons are valid")
}

// ============================================================================
// Edge and face flags
// ============================================================================

proptest! {
    /// Non-manifold and boundary never apply to the same edge, and edges
    /// with exactly two faces carry neither.
    #[test]
    fn edge_flags_are_exclusive(soup in polygon_soup()) {
        let mesh = build(soup);
        let result = analyze(&mesh);
        prop_assert_eq!(result.edge_flags.len(), mesh.edges().len());
        for (edge, flags) in mesh.edges().iter().zip(&result.edge_flags) {
            prop_assert!(!(flags.nm && flags.bd));
            prop_assert_eq!(flags.nm, edge.link_faces.len() >= 3);
            prop_assert_eq!(flags.bd, edge.link_faces.len() == 1);
        }
    }

    /// The n-gon flag is exactly "more than four vertices".
    #[test]
    fn ngon_flag_matches_vertex_count(soup in polygon_soup()) {
        let expected = soup.1.iter().filter(|p| p.len() > 4).count();
        let mesh = build(soup);
        let result = analyze(&mesh);
        prop_assert_eq!(result.ngon, expected);
        for (face, flags) in mesh.faces().iter().zip(&result.face_flags) {
            prop_assert_eq!(flags.ngon, face.len() > 4);
        }
    }

    /// Counts stay within their bounds.
    #[test]
    fn counts_are_bounded(soup in polygon_soup()) {
        let polygons = soup.1.len();
        let result = analyze(&build(soup));
        prop_assert_eq!(result.faces, polygons);
        prop_assert!(result.flip <= result.faces);
        prop_assert!((0.0..=1.0).contains(&result.flip_ratio()));
        prop_assert_eq!(result.nm, result.edge_flags.iter().filter(|f| f.nm).count());
        prop_assert_eq!(result.bd, result.edge_flags.iter().filter(|f| f.bd).count());
    }

    /// Analyzing twice gives identical results.
    #[test]
    fn analysis_is_idempotent(soup in polygon_soup()) {
        let mesh = build(soup);
        prop_assert_eq!(analyze(&mesh), analyze(&mesh));
    }

    /// Stored polygon data and the linked mesh analyze the same.
    #[test]
    fn stored_and_linked_agree(soup in polygon_soup()) {
        let (vertices, polygons) = soup;
        let stored = PolygonSoup::new(vertices.clone(), polygons.clone(), vec![], vec![]).unwrap();
        let linked = Mesh::from_polygons(vertices, &polygons, &[], vec![]).unwrap();
        prop_assert_eq!(analyze(&stored), analyze(&linked));
    }
}

// ============================================================================
// Classifier
// ============================================================================

proptest! {
    /// Enabling an extra check never turns NG into OK.
    #[test]
    fn verdict_is_monotonic(soup in polygon_soup(), cfg in config(), extra in 0usize..5) {
        let result = analyze(&build(soup));
        let wider = cfg.clone().with_check(Check::ALL[extra], true);
        if verdict(&result, &cfg) == Verdict::Ng {
            prop_assert_eq!(verdict(&result, &wider), Verdict::Ng);
        }
    }

    /// With every check disabled nothing is NG.
    #[test]
    fn nothing_enabled_is_ok(soup in polygon_soup(), threshold in 0.0f64..=1.0) {
        let result = analyze(&build(soup));
        let cfg = CheckConfig::none().with_flip_ratio_threshold(threshold);
        prop_assert_eq!(verdict(&result, &cfg), Verdict::Ok);
    }
}

// ============================================================================
// Flip guard and loader robustness
// ============================================================================

proptest! {
    /// Faces centered on the origin are never flip-suspect.
    #[test]
    fn flip_guard_near_origin(normal in vertex(), origin in vertex(), offset in -1e-10f64..1e-10) {
        let center = [origin[0] + offset, origin[1], origin[2]];
        prop_assert!(!is_flip_suspect(normal, center, origin));
    }

    /// Arbitrary text never panics the OBJ reader.
    #[test]
    fn obj_reader_never_panics(text in "[vtflo0-9 ./\\-\n#]{0,200}") {
        let _ = parse_obj(&text, "fuzz");
    }
}
