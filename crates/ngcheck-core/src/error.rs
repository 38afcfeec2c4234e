//! Error types for mesh construction, loading, analysis and configuration.

use std::path::PathBuf;

/// Errors raised while building a [`Mesh`](crate::mesh::Mesh) from raw
/// polygon data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// A face has fewer than three vertices.
    #[error("face {face} has {count} vertices, at least 3 are required")]
    FaceTooSmall { face: usize, count: usize },

    /// A face references a vertex that does not exist.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex { face: usize, vertex: usize },

    /// A face uses the same vertex twice in its loop.
    #[error("face {face} uses vertex {vertex} more than once")]
    DuplicateVertex { face: usize, vertex: usize },

    /// A loose edge references a vertex that does not exist.
    #[error("loose edge {edge} references invalid vertex index {vertex}")]
    InvalidEdgeVertex { edge: usize, vertex: usize },

    /// A loose edge starts and ends on the same vertex.
    #[error("loose edge {edge} connects vertex {vertex} to itself")]
    DegenerateEdge { edge: usize, vertex: usize },
}

/// Errors raised by the analysis entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    /// No object was supplied, or the object does not carry mesh data.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl AnalyzeError {
    /// Shorthand for an [`AnalyzeError::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading a scene file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Failed to read the file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not a supported scene format.
    #[error("unsupported scene format: {extension}")]
    UnsupportedFormat { extension: String },

    /// A line of a text format could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The glTF document could not be imported.
    #[error("failed to import glTF: {0}")]
    Gltf(String),

    /// Parsed data produced an invalid mesh.
    #[error("object '{object}' has invalid topology: {source}")]
    Mesh {
        object: String,
        #[source]
        source: MeshError,
    },
}

/// Errors raised while reading or validating a [`CheckConfig`](crate::checks::CheckConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid JSON for a check configuration.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The flip ratio threshold is outside `[0, 1]`.
    #[error("flip ratio threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    /// An unknown check id was requested.
    #[error("unknown check '{0}', expected one of: ngon, non-manifold, boundary, uv-missing, flip")]
    UnknownCheck(String),
}
