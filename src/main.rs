//! restyle: command-line front end for reformatting .docx documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use restyle::editor::{FormatTemplate, StyleUpdateReport, session};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "restyle")]
#[command(about = "List, restyle and reformat Word (.docx) documents")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every body paragraph with its style
    Paragraphs {
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the heading outline
    Headings {
        file: PathBuf,

        /// Print JSON instead of an indented outline
        #[arg(long)]
        json: bool,
    },

    /// Assign a paragraph style by name ("Heading 2", "Normal", ...)
    SetStyle {
        file: PathBuf,
        index: usize,
        style: String,
    },

    /// Turn a paragraph into a heading of the given level
    SetHeading {
        file: PathBuf,
        index: usize,
        level: u32,
    },

    /// Apply the formatting template to the whole document
    Format {
        file: PathBuf,

        /// YAML template overriding the built-in values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the result here instead of overwriting the input
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Set every paragraph back to "Normal"
    Reset { file: PathBuf },

    /// Save a copy named Modified_<name> into a directory
    Export { file: PathBuf, dir: PathBuf },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Paragraphs { file, json } => {
            let paragraphs = session::list_paragraphs(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&paragraphs)?);
            } else {
                for p in &paragraphs {
                    println!("{:>4}  {:<16}  {}", p.index, p.style_name, p.text);
                }
            }
        },
        Command::Headings { file, json } => {
            let headings = session::list_headings(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&headings)?);
            } else {
                for h in &headings {
                    let pad = usize::try_from(h.indent / 10).unwrap_or(0);
                    println!("{:>4}  {:pad$}{}", h.index, "", h.text, pad = pad);
                }
            }
        },
        Command::SetStyle { file, index, style } => {
            return print_report(&session::update_paragraph_style(&file, index, &style));
        },
        Command::SetHeading { file, index, level } => {
            return print_report(&session::update_heading_level(&file, index, level));
        },
        Command::Format {
            file,
            config,
            output,
        } => {
            let template = load_template(config.as_deref())?;
            let written = session::apply_format(&file, &template, output.as_deref())
                .with_context(|| format!("Failed to format {}", file.display()))?;
            println!("Formatted {}", written.display());
        },
        Command::Reset { file } => {
            let count = session::reset_to_normal(&file)
                .with_context(|| format!("Failed to reset {}", file.display()))?;
            println!("Reset {} paragraphs to Normal", count);
        },
        Command::Export { file, dir } => {
            let written = session::export_copy(&file, &dir)
                .with_context(|| format!("Failed to export {}", file.display()))?;
            println!("{}", written.display());
        },
    }
    Ok(ExitCode::SUCCESS)
}

/// `RUST_LOG` directives as given, or warnings only when unset or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn load_template(path: Option<&Path>) -> Result<FormatTemplate> {
    match path {
        Some(path) => FormatTemplate::load(path).context("Failed to load formatting template"),
        None => Ok(FormatTemplate::default()),
    }
}

fn print_report(report: &StyleUpdateReport) -> Result<ExitCode> {
    println!("{}", serde_json::to_string(report)?);
    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
