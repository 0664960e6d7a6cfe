//! UV Project CLI
//!
//! Commands: beds, ink-modes, build, inspect
//! Outputs JSON to stdout, logs to stderr
//! Returns non-zero on failure

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use uvproject_core::{
    archive::{self, PROJECT_INFO_PATH},
    sha256_hex, GeneratorError, InkMode, JobFile, PrintBed, ENGINE_VERSION,
};

#[derive(Parser)]
#[command(name = "uvproject-cli")]
#[command(version, about = "UV Project CLI - build printer project archives")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported print beds
    Beds,

    /// List ink modes and the layer channels they use
    InkModes,

    /// Build a project archive from a job file
    Build {
        /// Job file (JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Output archive path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List the entries of a project archive
    Inspect {
        /// Archive path
        #[arg(short, long)]
        archive: PathBuf,
    },
}

fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Beds => {
            let beds: Vec<_> = PrintBed::ALL
                .iter()
                .map(|bed| {
                    let [width_mm, height_mm] = bed.profile().format_size_mm();
                    serde_json::json!({
                        "id": bed,
                        "profile": bed.profile(),
                        "format_size_mm": { "width": width_mm, "height": height_mm },
                    })
                })
                .collect();
            print_json(&serde_json::Value::Array(beds))
        }

        Commands::InkModes => {
            let modes: Vec<_> = InkMode::ALL
                .iter()
                .map(|mode| serde_json::json!({
                    "name": mode.name(),
                    "code": mode.code(),
                    "layers": mode.applicability(),
                }))
                .collect();
            print_json(&serde_json::Value::Array(modes))
        }

        Commands::Build { job, output } => match build(&job, &output) {
            Ok(summary) => print_json(&summary),
            Err(e) => {
                tracing::error!(error = %e, "build failed");
                let output = serde_json::json!({
                    "success": false,
                    "error": e.to_string(),
                });
                println!("{}", output);
                ExitCode::from(2)
            }
        },

        Commands::Inspect { archive } => match inspect(&archive) {
            Ok(summary) => print_json(&summary),
            Err(e) => {
                let output = serde_json::json!({
                    "success": false,
                    "error": e.to_string(),
                });
                println!("{}", output);
                ExitCode::FAILURE
            }
        },
    }
}

fn build(job_path: &Path, output: &Path) -> Result<serde_json::Value, GeneratorError> {
    let job = JobFile::load(job_path)?;
    let base_dir = job_path.parent().unwrap_or_else(|| Path::new("."));
    let generator = job.into_generator(base_dir)?;

    let bytes = generator.archive_bytes()?;
    archive::write_archive(output, &bytes)?;
    tracing::info!(path = %output.display(), objects = generator.objects().len(), "archive written");

    Ok(serde_json::json!({
        "success": true,
        "engine_version": ENGINE_VERSION,
        "output": output.display().to_string(),
        "bed": generator.bed(),
        "canvas_id": generator.canvas_id(),
        "project_id": generator.project_id(),
        "objects": generator.objects().len(),
        "bytes": bytes.len(),
        "sha256": sha256_hex(&bytes),
    }))
}

fn inspect(path: &Path) -> Result<serde_json::Value, GeneratorError> {
    let bytes = std::fs::read(path)?;
    let entries = archive::list_entries(&bytes)?;

    let canvas_objects = entries
        .iter()
        .find(|e| e.name.starts_with("Asset/project_file/canvas_"))
        .map(|entry| -> Result<usize, GeneratorError> {
            let data = archive::read_entry(&bytes, &entry.name)?;
            let doc: serde_json::Value = serde_json::from_slice(&data)?;
            Ok(doc["objects"].as_array().map_or(0, |objects| objects.len()))
        })
        .transpose()?;

    let has_project_info = entries.iter().any(|e| e.name == PROJECT_INFO_PATH);

    Ok(serde_json::json!({
        "success": true,
        "entries": entries,
        "canvas_objects": canvas_objects,
        "has_project_info": has_project_info,
        "sha256": sha256_hex(&bytes),
    }))
}

fn print_json(value: &serde_json::Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to encode output: {}", e);
            ExitCode::FAILURE
        }
    }
}
