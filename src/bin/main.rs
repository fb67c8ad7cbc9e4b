use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use grader_core::config::{self, GraderConfig};
use grader_core::core::types::GradeReport;
use grader_core::error::GradeError;
use grader_core::persistence::{load_expected, save_report};
use grader_core::recognizer::{build_prompt, RecognizerMode, RecordedRecognizer};
use grader_core::GradingEngine;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = config::APP_NAME, version, about = "Grade handwritten vocalized Arabic against an expected list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a saved recognizer payload with the expected list
    Grade {
        /// JSON array of expected sentences
        #[arg(long)]
        expected: PathBuf,
        /// Raw recognizer output
        #[arg(long)]
        payload: PathBuf,
        /// Payload shape: positional or keyed
        #[arg(long, default_value = "keyed")]
        mode: RecognizerMode,
        /// Grader configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Name the missing vowel mark in notes
        #[arg(long)]
        fine_notes: bool,
        /// Also write the report here
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the JSON report instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Print the instructions sent to the recognizer
    Prompt {
        #[arg(long)]
        expected: PathBuf,
        #[arg(long, default_value = "keyed")]
        mode: RecognizerMode,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GradeError> {
    match cli.command {
        Commands::Grade { expected, payload, mode, config, fine_notes, out, json } => {
            let expected = load_expected(&expected)?;
            let payload = std::fs::read_to_string(&payload)?;

            let mut grader_config = match config {
                Some(path) => GraderConfig::load(&path)?,
                None => GraderConfig::default(),
            }
            .with_env_overrides();
            if fine_notes {
                grader_config.fine_grained_notes = true;
            }

            let engine = GradingEngine::new(grader_config);
            let recognizer = RecordedRecognizer::new(mode, payload);
            let report = engine.grade(&recognizer, &[], &expected)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            if let Some(path) = out {
                save_report(&report, &path)?;
                tracing::info!(path = %path.display(), "report saved");
            }
            Ok(())
        }
        Commands::Prompt { expected, mode } => {
            let expected = load_expected(&expected)?;
            println!("{}", build_prompt(mode, &expected));
            Ok(())
        }
    }
}

fn print_report(report: &GradeReport) {
    for (i, verdict) in report.items.iter().enumerate() {
        let mark = if verdict.ok() { "✓".green().bold() } else { "✗".red().bold() };
        if verdict.ok() {
            println!("{:>3}. {} {}", i + 1, mark, verdict.expected());
        } else {
            println!("{:>3}. {} {}  {}", i + 1, mark, verdict.expected(), verdict.note().as_str().yellow());
        }
    }
    println!("---------------------------------------------------------------");
    println!("{}/{} correct", report.passed(), report.items.len());
}
