//! Tableschema CLI
//!
//! Casts values against a field descriptor, infers formats and translates
//! date/time patterns.
//!
//! # Usage
//!
//! ```bash
//! # Cast values given on the command line
//! tableschema cast --field price.json "1,234.50" "n/a"
//!
//! # Cast one value per stdin line, skipping constraints
//! cat column.txt | tableschema cast --field price.json --no-constraints
//!
//! # Declared date formats are already native notation
//! TABLESCHEMA_NATIVE_FORMATS=true tableschema cast --field born.yaml 01.02.1990
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tableschema::{load_field, Field, FieldOptions, FieldType};
use temporal_format::translate;

#[derive(Parser)]
#[command(name = "tableschema")]
#[command(about = "Cast, format and check tabular field values")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast values with a field descriptor and print one JSON line per value
    Cast {
        /// Field descriptor file (.json, .yaml or .yml)
        #[arg(long)]
        field: PathBuf,

        /// Skip constraint checks
        #[arg(long)]
        no_constraints: bool,

        /// Treat the declared format as native date/time notation
        #[arg(long, env = "TABLESCHEMA_NATIVE_FORMATS")]
        native_formats: bool,

        /// Values to cast; read from stdin, one per line, when omitted
        values: Vec<String>,
    },

    /// Print the inferred format of a sample value
    Infer {
        /// Field type, e.g. string, geopoint, geojson
        #[arg(long = "type")]
        field_type: String,

        /// Sample value
        sample: String,
    },

    /// Translate a portable %-pattern into native date/time notation
    Translate {
        /// Portable pattern, e.g. "%Y-%m-%d"
        pattern: String,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cast {
            field,
            no_constraints,
            native_formats,
            values,
        } => {
            let mut loaded = load_field(&field)
                .with_context(|| format!("Failed to load field descriptor from {field:?}"))?
                .with_native_formats(native_formats);
            loaded
                .validate()
                .with_context(|| format!("Invalid field descriptor in {field:?}"))?;

            let values = if values.is_empty() {
                read_stdin_lines()?
            } else {
                values
            };
            run_cast(&mut loaded, &values, !no_constraints)?;
        }
        Commands::Infer { field_type, sample } => {
            let field_type = FieldType::from_tag(&field_type);
            let field = Field::for_type(field_type, "sample");
            println!("{}", field.infer_format(&sample));
        }
        Commands::Translate { pattern } => {
            println!("{}", translate(&pattern));
        }
    }

    Ok(())
}

fn read_stdin_lines() -> anyhow::Result<Vec<String>> {
    io::stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to read values from stdin")
}

fn run_cast(field: &mut Field, values: &[String], enforce_constraints: bool) -> anyhow::Result<()> {
    tracing::info!(
        field = field.name(),
        field_type = %field.field_type(),
        count = values.len(),
        "Casting values"
    );

    let options = FieldOptions::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0usize;

    for raw in values {
        let line = match field.cast_value(raw, enforce_constraints, &options) {
            Ok(Some(value)) => {
                let cast = field.format_value_for_json(&value)?;
                json!({ "value": raw, "cast": cast })
            }
            Ok(None) => json!({ "value": raw, "cast": null }),
            Err(e) => {
                failed += 1;
                json!({ "value": raw, "error": e.to_string() })
            }
        };
        writeln!(out, "{line}")?;
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} values failed", values.len());
    }
    Ok(())
}
