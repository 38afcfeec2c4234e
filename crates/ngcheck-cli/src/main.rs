//! ngcheck - mesh NG checker
//!
//! Reports n-gons, non-manifold and boundary edges, missing UVs and
//! inward-facing faces in OBJ and glTF scenes.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use ngcheck_cli::commands;
use ngcheck_cli::commands::json_output::OutputFormat;

/// ngcheck - Mesh topology NG checker
#[derive(Parser)]
#[command(name = "ngcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every mesh object in the given scene files
    Check {
        /// Scene files to check (OBJ, glTF, GLB; can be repeated)
        #[arg(short, long = "input", value_name = "FILE")]
        inputs: Vec<String>,

        /// Directory to recursively scan for scene files
        #[arg(long)]
        input_dir: Option<String>,

        /// Path to a JSON check configuration
        #[arg(short, long)]
        config: Option<String>,

        /// Disable specific checks (can be repeated)
        #[arg(long = "disable-check", value_name = "CHECK_ID")]
        disable_checks: Vec<String>,

        /// Only run these checks (comma-separated list)
        #[arg(long = "only-checks", value_name = "CHECK_IDS")]
        only_checks: Option<String>,

        /// Flip-suspect face ratio above which a mesh is NG (0.0 - 1.0)
        #[arg(long)]
        flip_threshold: Option<f64>,

        /// Write the full text report to this file
        #[arg(short, long)]
        report: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Select flagged faces or edges of one object
    Select {
        /// Scene file to read
        #[arg(short, long)]
        input: String,

        /// Object name (default: the first mesh object)
        #[arg(short, long)]
        object: Option<String>,

        /// Which elements to select
        #[arg(long, value_parser = ["ng-faces", "ngon", "non-manifold", "boundary"])]
        mode: String,

        /// Path to a JSON check configuration
        #[arg(short, long)]
        config: Option<String>,

        /// Disable specific checks (can be repeated)
        #[arg(long = "disable-check", value_name = "CHECK_ID")]
        disable_checks: Vec<String>,

        /// Only run these checks (comma-separated list)
        #[arg(long = "only-checks", value_name = "CHECK_IDS")]
        only_checks: Option<String>,

        /// Flip-suspect face ratio above which a face counts as flipped (0.0 - 1.0)
        #[arg(long)]
        flip_threshold: Option<f64>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List the available checks
    Checks {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

fn parse_format(format: &str) -> anyhow::Result<OutputFormat> {
    format.parse::<OutputFormat>().map_err(anyhow::Error::msg)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            inputs,
            input_dir,
            config,
            disable_checks,
            only_checks,
            flip_threshold,
            report,
            format,
        } => parse_format(&format).and_then(|output_format| {
            let config = commands::config::build_config(
                config.as_deref(),
                &disable_checks,
                only_checks.as_deref(),
                flip_threshold,
            )?;
            commands::check::run(
                &inputs,
                input_dir.as_deref(),
                &config,
                report.as_deref(),
                output_format,
            )
        }),
        Commands::Select {
            input,
            object,
            mode,
            config,
            disable_checks,
            only_checks,
            flip_threshold,
            format,
        } => parse_format(&format).and_then(|output_format| {
            let target = mode
                .parse::<commands::select::SelectTarget>()
                .map_err(anyhow::Error::msg)?;
            let config = commands::config::build_config(
                config.as_deref(),
                &disable_checks,
                only_checks.as_deref(),
                flip_threshold,
            )?;
            commands::select::run(&input, object.as_deref(), target, &config, output_format)
        }),
        Commands::Checks { format } => {
            parse_format(&format).and_then(commands::checks::run)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
