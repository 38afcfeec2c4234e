//! Machine-readable output shared by the commands.
//!
//! Every command accepts `--format text|json`. In JSON mode nothing colored
//! is printed and problems are reported as [`JsonError`] entries.

use serde::{Deserialize, Serialize};

/// Stable error codes for JSON output.
pub mod error_codes {
    /// Scene file could not be loaded
    pub const SCENE_LOAD: &str = "NG_001";
    /// No mesh object in any input
    pub const NO_MESH: &str = "NG_002";
    /// Report file could not be written
    pub const REPORT_WRITE: &str = "NG_003";
}

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown format '{}', expected 'text' or 'json'", s)),
        }
    }
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "NG_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Input file the error belongs to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Attaches the input file.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
