//! Element and object selection derived from analysis flags.
//!
//! Selections are index lists; applying them to an editor is up to the host.
//! Every element selection replaces the previous one, so an empty list means
//! "deselect everything".

use serde::{Deserialize, Serialize};

use crate::analyze::AnalysisResult;
use crate::batch::BatchEntry;
use crate::checks::{face_is_ng, verdict, CheckConfig};

/// Element type a selection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMode {
    Face,
    Edge,
}

/// Selected element indices, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub mode: SelectMode,
    pub indices: Vec<usize>,
}

impl Selection {
    /// Number of selected elements.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Faces that fail any enabled check.
pub fn select_ng_faces(result: &AnalysisResult, config: &CheckConfig) -> Selection {
    Selection {
        mode: SelectMode::Face,
        indices: result
            .face_flags
            .iter()
            .enumerate()
            .filter(|(_, f)| face_is_ng(f, result.uv, config))
            .map(|(i, _)| i)
            .collect(),
    }
}

/// Faces with more than four vertices.
pub fn select_ngon_faces(result: &AnalysisResult) -> Selection {
    Selection {
        mode: SelectMode::Face,
        indices: result
            .face_flags
            .iter()
            .enumerate()
            .filter(|(_, f)| f.ngon)
            .map(|(i, _)| i)
            .collect(),
    }
}

/// Edges shared by three or more faces.
pub fn select_non_manifold_edges(result: &AnalysisResult) -> Selection {
    Selection {
        mode: SelectMode::Edge,
        indices: result
            .edge_flags
            .iter()
            .enumerate()
            .filter(|(_, e)| e.nm)
            .map(|(i, _)| i)
            .collect(),
    }
}

/// Edges used by exactly one face.
pub fn select_boundary_edges(result: &AnalysisResult) -> Selection {
    Selection {
        mode: SelectMode::Edge,
        indices: result
            .edge_flags
            .iter()
            .enumerate()
            .filter(|(_, e)| e.bd)
            .map(|(i, _)| i)
            .collect(),
    }
}

/// Object selection after a batch check.
///
/// Objects are identified by batch position. Names are only unique within
/// one scene file, so two NG objects called `Cube` from different files are
/// both selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSelection {
    /// Batch positions of the NG objects, ascending.
    pub indices: Vec<usize>,
    /// Names of the selected objects, parallel to `indices`.
    pub selected: Vec<String>,
    /// The object that becomes active (the first NG object).
    pub active: Option<String>,
}

impl ObjectSelection {
    /// True when no object is NG; the host keeps its current selection.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Collects the NG objects of a batch.
pub fn ng_object_selection(entries: &[BatchEntry], config: &CheckConfig) -> ObjectSelection {
    let (indices, selected): (Vec<usize>, Vec<String>) = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| match &entry.outcome {
            Ok(result) => verdict(result, config).is_ng(),
            Err(_) => false,
        })
        .map(|(i, entry)| (i, entry.name.clone()))
        .unzip();
    let active = selected.first().cloned();
    ObjectSelection {
        indices,
        selected,
        active,
    }
}
