// crates/scenario-harness-gen/src/main.rs
// ============================================================================
// Module: Scenario Harness Generator CLI
// Description: CLI entrypoint for Go scenario harness generation.
// Purpose: Render, verify, and validate harnesses from description files.
// Dependencies: clap, scenario-harness-gen, tracing, tracing-subscriber
// ============================================================================

//! ## Overview
//! The generator CLI loads a service description (TOML or JSON), renders the
//! Go scenario test harness, and either writes it, checks an existing file
//! for drift, or only reports validation problems.
//!
//! Logs go to stderr and are filtered by `RUST_LOG`; stdout carries only
//! generated source when no output file is given.

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use scenario_harness_gen::GenerationError;
use scenario_harness_gen::HarnessGenerator;
use scenario_harness_gen::model::DescriptionFormat;
use scenario_harness_gen::model::LoadError;
use scenario_harness_gen::model::load_description;
use scenario_harness_gen::output::OutputError;
use scenario_harness_gen::output::check_output;
use scenario_harness_gen::output::write_output;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "scenario_harness_gen=info,scenario_harness_model=info,warn";

/// CLI arguments for harness generation.
#[derive(Debug, Parser)]
#[command(
    name = "scenario-harness-gen",
    version,
    about = "Generate scenario-driven Go test harnesses for gRPC services."
)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Description input shared by all subcommands.
#[derive(Debug, clap::Args)]
struct DescriptionArgs {
    /// Service description file (.toml or .json).
    #[arg(long, value_name = "FILE")]
    description: PathBuf,
    /// Description format; inferred from the file extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

/// Description formats accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl From<FormatArg> for DescriptionFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Toml => Self::Toml,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the harness source.
    Generate {
        /// Description input.
        #[command(flatten)]
        input: DescriptionArgs,
        /// Output file; the harness is written to stdout when omitted.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Verify an existing harness file matches the generated output.
    Check {
        /// Description input.
        #[command(flatten)]
        input: DescriptionArgs,
        /// Harness file to verify.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Report every structural problem in a description.
    Validate {
        /// Description input.
        #[command(flatten)]
        input: DescriptionArgs,
    },
}

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
enum CliError {
    /// Description could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Rendering failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// Output could not be written or is stale.
    #[error(transparent)]
    Output(#[from] OutputError),
    /// Description has structural problems.
    #[error("{count} validation problem(s) in {path}")]
    Invalid {
        /// Number of violations found.
        count: usize,
        /// Description path.
        path: String,
    },
    /// Writing to stdout or stderr failed.
    #[error("output error: {0}")]
    Stream(String),
}

// ============================================================================
// SECTION: Command Dispatch
// ============================================================================

/// CLI entrypoint.
fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

/// Installs the stderr tracing subscriber.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();
}

/// Dispatches the CLI command.
fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            input,
            out,
        } => generate(&input, out.as_deref()),
        Command::Check {
            input,
            out,
        } => check(&input, &out),
        Command::Validate {
            input,
        } => validate(&input),
    }
}

/// Loads the description and binds a generator to it.
fn load_generator(input: &DescriptionArgs) -> Result<HarnessGenerator, CliError> {
    let generator = HarnessGenerator::load(&input.description, input.format.map(Into::into))?;
    Ok(generator)
}

/// Writes the harness to `out`, or to stdout when no path is given.
fn generate(input: &DescriptionArgs, out: Option<&Path>) -> Result<(), CliError> {
    let rendered = load_generator(input)?.generate()?;
    match out {
        Some(path) => write_output(path, &rendered)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|err| CliError::Stream(err.to_string()))?;
        }
    }
    Ok(())
}

/// Verifies the harness at `out` matches the generated content.
fn check(input: &DescriptionArgs, out: &Path) -> Result<(), CliError> {
    let rendered = load_generator(input)?.generate()?;
    check_output(out, &rendered)?;
    Ok(())
}

/// Reports every violated invariant of the description.
fn validate(input: &DescriptionArgs) -> Result<(), CliError> {
    let description = load_description(&input.description, input.format.map(Into::into))?;
    let violations = description.violations();
    if violations.is_empty() {
        tracing::info!(
            path = %input.description.display(),
            methods = description.methods.len(),
            "service description is valid"
        );
        return Ok(());
    }
    let mut stderr = std::io::stderr().lock();
    for violation in &violations {
        writeln!(stderr, "{violation}").map_err(|err| CliError::Stream(err.to_string()))?;
    }
    Err(CliError::Invalid {
        count: violations.len(),
        path: input.description.display().to_string(),
    })
}

/// Reports a CLI error to stderr.
fn report_error(err: &CliError) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{err}");
    ExitCode::FAILURE
}
