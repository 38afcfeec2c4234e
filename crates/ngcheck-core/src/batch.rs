//! Batch analysis over many scene objects.
//!
//! Objects are analyzed independently; a failure is recorded for that object
//! and the batch moves on. With the `parallel` feature the analyses run on
//! the rayon thread pool. Entries always come back in input order.

use serde::{Deserialize, Serialize};

use crate::analyze::{analyze_object, AnalysisResult};
use crate::error::AnalyzeError;
use crate::scene::SceneObject;

/// Outcome of analyzing one object.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// Object name.
    pub name: String,
    /// The analysis result, or why the object could not be analyzed.
    pub outcome: Result<AnalysisResult, AnalyzeError>,
}

impl BatchEntry {
    /// Creates an entry.
    pub fn new(name: impl Into<String>, outcome: Result<AnalysisResult, AnalyzeError>) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }

    /// The result, if analysis succeeded.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.outcome.as_ref().ok()
    }
}

/// Analyzes every object in order.
#[cfg(not(feature = "parallel"))]
pub fn analyze_batch(objects: &[SceneObject]) -> Vec<BatchEntry> {
    objects.iter().map(analyze_entry).collect()
}

/// Analyzes every object on the rayon pool, preserving input order.
#[cfg(feature = "parallel")]
pub fn analyze_batch(objects: &[SceneObject]) -> Vec<BatchEntry> {
    use rayon::prelude::*;

    objects.par_iter().map(analyze_entry).collect()
}

fn analyze_entry(object: &SceneObject) -> BatchEntry {
    BatchEntry::new(object.name(), analyze_object(Some(object)))
}

/// Counts of a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub ng: usize,
    pub ok: usize,
    pub errors: usize,
}

impl BatchSummary {
    /// True when every object was analyzed and none is NG.
    pub fn all_ok(&self) -> bool {
        self.ng == 0 && self.errors == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Mesh, PolygonSoup};
    use crate::scene::ObjectKind;

    fn triangle() -> PolygonSoup {
        PolygonSoup::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![vec![0, 1, 2]],
            vec![],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_errors_do_not_abort_the_batch() {
        let objects = vec![
            SceneObject::stored_mesh("Tri", triangle()),
            SceneObject::without_mesh("Light", ObjectKind::Light),
            SceneObject::edit_mesh("Empty", Mesh::empty()),
        ];
        let entries = analyze_batch(&objects);

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Tri", "Light", "Empty"]);
        assert_eq!(entries[0].result().map(|r| r.bd), Some(3));
        assert!(matches!(entries[1].outcome, Err(AnalyzeError::InvalidInput { .. })));
        assert_eq!(entries[2].result(), Some(&AnalysisResult::default()));
    }

    #[test]
    fn test_empty_batch() {
        assert!(analyze_batch(&[]).is_empty());
    }
}
