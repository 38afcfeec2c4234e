//! Mesh topology analysis.
//!
//! One deterministic pass over a mesh snapshot classifies every edge
//! (boundary, non-manifold) and every face (n-gon, flip suspect, adjacent to
//! a flagged edge). The pass reads only the snapshot and never fails; the
//! object-level entry point rejects objects that carry no mesh.

mod types;


pub use types::{AnalysisResult, EdgeFlags, FaceFlags};

use crate::error::AnalyzeError;
use crate::geometry::{dot3, length3, sub3, Vec3};
use crate::mesh::{Mesh, MeshSource};
use crate::scene::SceneObject;

/// Minimum center-to-origin distance for the flip test.
pub const FLIP_EPSILON: f64 = 1e-9;

/// Analyzes any mesh source.
pub fn analyze<S: MeshSource + ?Sized>(source: &S) -> AnalysisResult {
    analyze_mesh(&source.mesh())
}

/// Analyzes a scene object, rejecting missing and non-mesh objects.
pub fn analyze_object(object: Option<&SceneObject>) -> Result<AnalysisResult, AnalyzeError> {
    let object = object.ok_or_else(|| AnalyzeError::invalid_input("no object supplied"))?;
    let data = object.mesh_data().ok_or_else(|| {
        AnalyzeError::invalid_input(format!(
            "'{}' is not a mesh (type {})",
            object.name(),
            object.kind()
        ))
    })?;
    Ok(analyze(data))
}

/// Analyzes a linked mesh.
pub fn analyze_mesh(mesh: &Mesh) -> AnalysisResult {
    let origin = mesh.origin();

    let edge_flags: Vec<EdgeFlags> = mesh
        .edges()
        .iter()
        .map(|e| EdgeFlags::from_link_count(e.link_faces.len()))
        .collect();

    let nm = edge_flags.iter().filter(|f| f.nm).count();
    let bd = edge_flags.iter().filter(|f| f.bd).count();

    let face_flags: Vec<FaceFlags> = mesh
        .faces()
        .iter()
        .map(|face| {
            let flip = is_flip_suspect(mesh.face_normal(face), mesh.face_center(face), origin);
            FaceFlags {
                ngon: face.len() > 4,
                flip,
                nm: face.edges.iter().any(|&e| edge_flags[e].nm),
                bd: face.edges.iter().any(|&e| edge_flags[e].bd),
            }
        })
        .collect();

    AnalysisResult {
        faces: face_flags.len(),
        ngon: face_flags.iter().filter(|f| f.ngon).count(),
        nm,
        bd,
        uv: mesh.has_uv(),
        flip: face_flags.iter().filter(|f| f.flip).count(),
        face_flags,
        edge_flags,
    }
}

/// Heuristic inverted-face test.
///
/// The face is suspect when its normal points against the direction from
/// the mesh origin to the face center. Centers closer than
/// [`FLIP_EPSILON`] to the origin are never suspect.
pub fn is_flip_suspect(normal: Vec3, center: Vec3, origin: Vec3) -> bool {
    let dir = sub3(center, origin);
    let len = length3(dir);
    if len <= FLIP_EPSILON {
        return false;
    }
    let dir = [dir[0] / len, dir[1] / len, dir[2] / len];
    dot3(normal, dir) < 0.0
}
