//! stopgate - inspect an agent termination payload
//!
//! Reads a model response from a file or stdin, validates it against the
//! termination-decision contract and prints the canonical wire form.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use stopgate_core::app::DecisionReader;
use stopgate_core::ports::PayloadSource;
use stopgate_core::typed::{DEFAULT_MAX_PAYLOAD_BYTES, StructuredResponse};
use stopgate_core::{DecisionError, DecodeOptions, Extraction, TerminationDecision};

mod source;

use source::{FileSource, StdinSource};

/// Payload failed validation.
const EXIT_MALFORMED: u8 = 2;
/// Payload could not be obtained.
const EXIT_SOURCE: u8 = 3;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "stopgate", version, about = "Validate agent termination decisions")]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a payload and print the decision
    Check {
        /// Payload file; stdin when absent or `-`
        path: Option<PathBuf>,

        /// Locate the JSON object inside free-form model output
        #[arg(long)]
        lenient: bool,

        /// Reject payloads larger than this many bytes
        #[arg(long, default_value_t = DEFAULT_MAX_PAYLOAD_BYTES)]
        max_bytes: usize,

        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Exit 0 when the agent should terminate, 1 when it should continue
        #[arg(long)]
        exit_code: bool,
    },
    /// Print the wire fields of the decision payload
    Schema,
}

#[derive(Debug, Serialize)]
struct SchemaField {
    name: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    required: bool,
}

fn initialize_tracing(level: LogLevel, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_filter_directive()));

    // stdout carries the result only
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn decode_options(lenient: bool, max_bytes: usize) -> DecodeOptions {
    let options = if lenient {
        DecodeOptions::lenient()
    } else {
        DecodeOptions::default()
    };
    options.with_max_payload_bytes(max_bytes)
}

fn render(decision: &TerminationDecision, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(decision).context("encoding decision"),
        OutputFormat::Text => Ok(format!(
            "terminate: {}\nreason: {}",
            decision.should_terminate(),
            decision.termination_reason()
        )),
    }
}

fn exit_code_for(decision: &TerminationDecision, exit_code: bool) -> ExitCode {
    if exit_code && !decision.should_terminate() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn failure_code(err: &DecisionError) -> u8 {
    if err.is_malformed() {
        EXIT_MALFORMED
    } else {
        EXIT_SOURCE
    }
}

fn schema_fields() -> Vec<SchemaField> {
    TerminationDecision::FIELDS
        .iter()
        .map(|spec| SchemaField {
            name: spec.wire_name,
            kind: spec.kind.name(),
            required: true,
        })
        .collect()
}

async fn check<S: PayloadSource>(
    source: S,
    options: DecodeOptions,
    format: OutputFormat,
    exit_code: bool,
) -> Result<ExitCode> {
    debug!(
        source = %source.describe(),
        lenient = options.extraction == Extraction::Lenient,
        max_bytes = options.max_payload_bytes,
        "checking payload"
    );
    let reader = DecisionReader::new(source, options);

    match reader.read().await {
        Ok(decision) => {
            println!("{}", render(&decision, format)?);
            Ok(exit_code_for(&decision, exit_code))
        }
        Err(err) => {
            eprintln!("error: {err}");
            Ok(ExitCode::from(failure_code(&err)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level, cli.log_json);

    match cli.command {
        Command::Check {
            path,
            lenient,
            max_bytes,
            format,
            exit_code,
        } => {
            let options = decode_options(lenient, max_bytes);
            match path {
                Some(p) if p.as_os_str() != "-" => {
                    check(FileSource::new(p, max_bytes), options, format, exit_code).await
                }
                _ => check(StdinSource::new(max_bytes), options, format, exit_code).await,
            }
        }
        Command::Schema => {
            let rendered =
                serde_json::to_string_pretty(&schema_fields()).context("encoding schema")?;
            println!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
