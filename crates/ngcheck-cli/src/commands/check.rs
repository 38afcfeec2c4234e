//! Check command implementation
//!
//! Loads scene files, analyzes every mesh object and classifies it as OK or
//! NG under the active check configuration.

use anyhow::{Context, Result};
use colored::Colorize;
use ngcheck_core::io::{is_scene_file, load_scene};
use ngcheck_core::{analyze_batch, BatchReport, CheckConfig, EntryStatus, SceneObject};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

use super::json_output::{error_codes, print_json, JsonError, OutputFormat};

/// JSON output for the check command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutput {
    /// Whether every object is OK and every file loaded.
    pub success: bool,
    /// Scene files that were read, in processing order.
    pub files: Vec<String>,
    /// The batch report; absent when no mesh object was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<BatchReport>,
    /// Load and I/O problems.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

/// Run the check command.
///
/// # Arguments
/// * `inputs` - Scene files to check
/// * `input_dir` - Optional directory scanned recursively for scene files
/// * `config` - Effective check configuration
/// * `report_path` - Where to write the full text report
/// * `format` - Output format (text or json)
///
/// # Returns
/// Exit code: 0 if every object is OK, 1 if any object is NG or a file failed
pub fn run(
    inputs: &[String],
    input_dir: Option<&str>,
    config: &CheckConfig,
    report_path: Option<&str>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let mut files: Vec<PathBuf> = inputs.iter().map(PathBuf::from).collect();
    if let Some(dir) = input_dir {
        files.extend(scan_dir(Path::new(dir))?);
    }

    let mut errors = Vec::new();
    let mut objects: Vec<SceneObject> = Vec::new();

    for path in &files {
        if format == OutputFormat::Text {
            println!("{} {}", "Checking:".cyan().bold(), path.display());
        }
        match load_scene(path) {
            Ok(scene) => objects.extend(scene.into_iter().filter(SceneObject::is_mesh)),
            Err(e) => {
                if format == OutputFormat::Text {
                    eprintln!(
                        "{}: skipping {}: {}",
                        "warning".yellow().bold(),
                        path.display(),
                        e
                    );
                }
                errors.push(
                    JsonError::new(error_codes::SCENE_LOAD, e.to_string())
                        .with_file(path.display().to_string()),
                );
            }
        }
    }

    let file_names: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();

    if objects.is_empty() {
        if format == OutputFormat::Json {
            errors.push(JsonError::new(error_codes::NO_MESH, "No mesh selected"));
            print_json(&CheckOutput {
                success: false,
                files: file_names,
                report: None,
                errors,
            })?;
            return Ok(ExitCode::from(1));
        }
        anyhow::bail!("No mesh selected");
    }

    let entries = analyze_batch(&objects);
    let report = BatchReport::build(&entries, config);

    if let Some(path) = report_path {
        if let Err(e) = write_report(Path::new(path), &report) {
            if format == OutputFormat::Json {
                errors.push(JsonError::new(error_codes::REPORT_WRITE, format!("{:#}", e)));
            } else {
                return Err(e);
            }
        } else if format == OutputFormat::Text {
            println!("{} {}", "Report written to:".dimmed(), path);
        }
    }

    let success = report.summary.all_ok() && errors.is_empty();

    match format {
        OutputFormat::Json => print_json(&CheckOutput {
            success,
            files: file_names,
            report: Some(report),
            errors,
        })?,
        OutputFormat::Text => print_text_output(&report, success),
    }

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Scene files under `dir`, sorted for deterministic output.
fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Input path is not a directory: {}", dir.display());
    }
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_scene_file(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    Ok(files)
}

fn write_report(path: &Path, report: &BatchReport) -> Result<()> {
    fs::write(path, report.full_text())
        .with_context(|| format!("Failed to write report file: {}", path.display()))
}

/// Print the check results in human-readable text format.
fn print_text_output(report: &BatchReport, success: bool) {
    println!();
    for entry in &report.entries {
        let tag = match entry.status {
            EntryStatus::Ok => "OK".green().bold(),
            EntryStatus::Ng => "NG".red().bold(),
            EntryStatus::Error => "ERROR".red().bold(),
        };
        match (&entry.reason, &entry.error) {
            (Some(reason), _) => println!("{} {} ({})", tag, entry.name, reason),
            (None, Some(error)) => println!("{} {} ({})", tag, entry.name, error),
            (None, None) => println!("{} {}", tag, entry.name),
        }
    }

    println!("\n{}", report.last_result_text());
    println!("{}", report.status_line());

    let summary = format!(
        "{} object(s): {} NG, {} OK, {} error(s)",
        report.summary.total, report.summary.ng, report.summary.ok, report.summary.errors
    );
    if success {
        println!("\n{} {}", "PASSED".green().bold(), summary.dimmed());
    } else {
        println!("\n{} {}", "FAILED".red().bold(), summary.dimmed());
    }
}
