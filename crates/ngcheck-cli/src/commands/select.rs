//! Select command implementation
//!
//! Analyzes one object and prints the indices of the flagged faces or edges.

use anyhow::{Context, Result};
use colored::Colorize;
use ngcheck_core::io::load_scene;
use ngcheck_core::select::{
    select_boundary_edges, select_ng_faces, select_ngon_faces, select_non_manifold_edges,
};
use ngcheck_core::{analyze_object, CheckConfig, SelectMode, Selection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{print_json, OutputFormat};

/// Which elements to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectTarget {
    /// Faces that fail any enabled check
    NgFaces,
    /// Faces with more than four vertices
    Ngon,
    /// Edges shared by three or more faces
    NonManifold,
    /// Edges used by exactly one face
    Boundary,
}

impl SelectTarget {
    /// The `--mode` value for this target.
    pub fn as_str(self) -> &'static str {
        match self {
            SelectTarget::NgFaces => "ng-faces",
            SelectTarget::Ngon => "ngon",
            SelectTarget::NonManifold => "non-manifold",
            SelectTarget::Boundary => "boundary",
        }
    }
}

impl std::str::FromStr for SelectTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ng-faces" => Ok(SelectTarget::NgFaces),
            "ngon" => Ok(SelectTarget::Ngon),
            "non-manifold" => Ok(SelectTarget::NonManifold),
            "boundary" => Ok(SelectTarget::Boundary),
            _ => Err(format!(
                "unknown mode '{}', expected ng-faces, ngon, non-manifold or boundary",
                s
            )),
        }
    }
}

/// JSON output for the select command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOutput {
    pub object: String,
    pub mode: SelectTarget,
    pub selection: Selection,
}

/// Run the select command.
///
/// Without `object`, the first mesh object of the file is used (or the first
/// object when the file has no mesh, which then fails as not a mesh).
pub fn run(
    input: &str,
    object: Option<&str>,
    target: SelectTarget,
    config: &CheckConfig,
    format: OutputFormat,
) -> Result<ExitCode> {
    let objects = load_scene(Path::new(input))
        .with_context(|| format!("Failed to load scene: {}", input))?;

    let chosen = match object {
        Some(name) => objects.iter().find(|o| o.name() == name),
        None => objects
            .iter()
            .find(|o| o.is_mesh())
            .or_else(|| objects.first()),
    };

    let result = analyze_object(chosen)?;
    let name = chosen.map(|o| o.name().to_string()).unwrap_or_default();

    let selection = match target {
        SelectTarget::NgFaces => select_ng_faces(&result, config),
        SelectTarget::Ngon => select_ngon_faces(&result),
        SelectTarget::NonManifold => select_non_manifold_edges(&result),
        SelectTarget::Boundary => select_boundary_edges(&result),
    };

    match format {
        OutputFormat::Json => print_json(&SelectOutput {
            object: name,
            mode: target,
            selection,
        })?,
        OutputFormat::Text => print_text_output(&name, target, &selection),
    }

    Ok(ExitCode::SUCCESS)
}

fn print_text_output(name: &str, target: SelectTarget, selection: &Selection) {
    println!(
        "{} {} ({})",
        "Selecting:".cyan().bold(),
        name,
        target.as_str()
    );

    if selection.is_empty() {
        println!("{}", "Nothing selected".dimmed());
        return;
    }

    let noun = match selection.mode {
        SelectMode::Face => "face(s)",
        SelectMode::Edge => "edge(s)",
    };
    let indices = selection
        .indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("{} {} selected: {}", selection.len(), noun, indices);
}
