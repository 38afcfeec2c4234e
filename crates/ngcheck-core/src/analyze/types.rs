//! Result types produced by the analyzer.

use serde::{Deserialize, Serialize};

/// Classification of one edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeFlags {
    /// Shared by three or more faces.
    pub nm: bool,
    /// Used by exactly one face.
    pub bd: bool,
}

impl EdgeFlags {
    /// Classifies an edge from the number of faces that use it.
    pub fn from_link_count(link_faces: usize) -> Self {
        Self {
            nm: link_faces >= 3,
            bd: link_faces == 1,
        }
    }
}

/// Classification of one face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceFlags {
    /// More than four vertices.
    pub ngon: bool,
    /// Normal points toward the mesh centroid (heuristic).
    pub flip: bool,
    /// At least one side is a non-manifold edge.
    pub nm: bool,
    /// At least one side is a boundary edge.
    pub bd: bool,
}

/// Per-mesh analysis output.
///
/// Owns no references into the analyzed mesh. `face_flags[i]` and
/// `edge_flags[i]` describe face `i` and edge `i` of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Total face count.
    pub faces: usize,
    /// Faces with more than four vertices.
    pub ngon: usize,
    /// Edges shared by three or more faces.
    pub nm: usize,
    /// Edges used by exactly one face.
    pub bd: usize,
    /// Whether the mesh has at least one UV layer.
    pub uv: bool,
    /// Flip-suspect face count.
    pub flip: usize,
    /// Flags per face index.
    pub face_flags: Vec<FaceFlags>,
    /// Flags per edge index.
    pub edge_flags: Vec<EdgeFlags>,
}

impl AnalysisResult {
    /// Fraction of flip-suspect faces; 0.0 for a mesh without faces.
    pub fn flip_ratio(&self) -> f64 {
        if self.faces == 0 {
            0.0
        } else {
            self.flip as f64 / self.faces as f64
        }
    }

    /// Number of analyzed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_flags.len()
    }

    /// Flags of face `index`, if it exists.
    pub fn face(&self, index: usize) -> Option<&FaceFlags> {
        self.face_flags.get(index)
    }

    /// Flags of edge `index`, if it exists.
    pub fn edge(&self, index: usize) -> Option<&EdgeFlags> {
        self.edge_flags.get(index)
    }
}
