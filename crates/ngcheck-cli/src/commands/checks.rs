//! Checks command implementation
//!
//! Lists the available checks and their default state.

use anyhow::Result;
use colored::Colorize;
use ngcheck_core::{Check, CheckConfig};
use serde::{Deserialize, Serialize};
use std::process::ExitCode;

use super::json_output::{print_json, OutputFormat};

/// Metadata for one check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInfo {
    pub id: String,
    pub label: String,
    pub description: String,
    pub enabled_by_default: bool,
}

/// JSON output for the checks command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecksOutput {
    pub checks: Vec<CheckInfo>,
    pub default_flip_ratio_threshold: f64,
}

impl ChecksOutput {
    /// Describes every check under the default configuration.
    pub fn collect() -> Self {
        let defaults = CheckConfig::default();
        Self {
            checks: Check::ALL
                .into_iter()
                .map(|check| CheckInfo {
                    id: check.id().to_string(),
                    label: check.label().to_string(),
                    description: check.description().to_string(),
                    enabled_by_default: defaults.is_enabled(check),
                })
                .collect(),
            default_flip_ratio_threshold: defaults.flip_ratio_threshold,
        }
    }
}

/// Run the checks command.
pub fn run(format: OutputFormat) -> Result<ExitCode> {
    let output = ChecksOutput::collect();

    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Text => {
            println!("{}", "Checks:".cyan().bold());
            for info in &output.checks {
                let state = if info.enabled_by_default {
                    "on".green()
                } else {
                    "off".dimmed()
                };
                println!(
                    "  {:<14} {:<3} {} - {}",
                    info.id.bold(),
                    state,
                    info.label,
                    info.description.dimmed()
                );
            }
            println!(
                "\n{} {}",
                "Default flip ratio threshold:".dimmed(),
                output.default_flip_ratio_threshold
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
