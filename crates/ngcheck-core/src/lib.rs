//! Topology checks for polygon meshes.
//!
//! Finds n-gons, non-manifold and boundary edges, missing UV layers and
//! faces whose normal appears to point inward, then classifies each mesh
//! as OK or NG under a [`CheckConfig`].
//!
//! # Example
//!
//! ```no_run
//! use ngcheck_core::{analyze_batch, io, BatchReport, CheckConfig};
//! use std::path::Path;
//!
//! let objects = io::load_scene(Path::new("scene.obj")).unwrap();
//! let entries = analyze_batch(&objects);
//! let report = BatchReport::build(&entries, &CheckConfig::default());
//!
//! println!("{}", report.full_text());
//! if !report.summary.all_ok() {
//!     eprintln!("{}", report.status_line());
//! }
//! ```

pub mod analyze;
pub mod batch;
pub mod checks;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod report;
pub mod scene;
pub mod select;

pub use analyze::{analyze, analyze_mesh, analyze_object, AnalysisResult, EdgeFlags, FaceFlags};
pub use batch::{analyze_batch, BatchEntry, BatchSummary};
pub use checks::{verdict, Check, CheckConfig, Verdict, DEFAULT_FLIP_RATIO_THRESHOLD};
pub use error::{AnalyzeError, ConfigError, LoadError, MeshError};
pub use mesh::{Edge, Face, Mesh, MeshSource, PolygonSoup};
pub use report::{BatchReport, EntryStatus, ReportEntry};
pub use scene::{MeshData, ObjectKind, SceneObject};
pub use select::{ObjectSelection, SelectMode, Selection};
