//! # laminate-cli
//!
//! Layer configuration documents on top of each other.
//!
//! This is the entry point of the `laminate` binary. It parses flags (and
//! their `LAMINATE_*` environment variables), sets up logging on stderr,
//! installs the interrupt handler and runs the layering pipeline, printing
//! the merged document on stdout.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use laminate_config::{LayerRequest, Pipeline};
use laminate_core::error::LaminateResult;
use laminate_source::SourceResolver;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod output;
mod signal;

use output::errors::ErrorFormatter;
use signal::Cancellation;

/// Layer configuration documents from many sources into one
#[derive(Debug, Parser)]
#[command(name = "laminate", version, about = "Layer configuration documents from many sources")]
pub struct Cli {
    /// Base document locator (path, `-`, or scheme[+format]://...)
    #[arg(short, long, env = "LAMINATE_SOURCE")]
    pub source: String,

    /// Patch document locator; repeat to apply several patches in order
    #[arg(short, long, env = "LAMINATE_PATCH", value_delimiter = ',')]
    pub patch: Vec<String>,

    /// How lists are combined: overwrite or preserve
    #[arg(long, env = "LAMINATE_MERGE_STRATEGY", default_value = "overwrite")]
    pub merge_strategy: String,

    /// Output format (json, yaml, yml, toml, hcl); defaults to the source's format
    #[arg(short, long, env = "LAMINATE_OUTPUT_FORMAT")]
    pub output_format: Option<String>,

    /// Enable debug logging
    #[arg(long, env = "LAMINATE_DEBUG")]
    pub debug: bool,

    /// Log level
    #[arg(short, long, env = "LAMINATE_LOGLEVEL", value_enum)]
    pub loglevel: Option<LogLevel>,

    /// Log format
    #[arg(short = 'f', long, env = "LAMINATE_LOGFORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub logformat: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact single-line text
    Text,
    /// One JSON object per event
    Json,
    /// Multi-line human readable output
    Rich,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(&cli);
    setup_panic_handler();

    let cancellation = match Cancellation::install() {
        Ok(cancellation) => cancellation,
        Err(e) => {
            eprintln!("{}", ErrorFormatter::new().format_warning(&format!("cannot install signal handler: {}", e)));
            Cancellation::detached()
        },
    };

    debug!("Starting laminate v{}", env!("CARGO_PKG_VERSION"));

    if cancellation.is_requested() {
        debug!("Interrupted before start, exiting");
        return ExitCode::SUCCESS;
    }

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> LaminateResult<()> {
    let request = build_request(cli);
    let resolver = SourceResolver::new()?;
    let result = Pipeline::new(&resolver).run(&request)?;

    info!("Writing {} document", result.format);
    output::write_document(&result.bytes)
}

fn build_request(cli: Cli) -> LayerRequest {
    let mut request = LayerRequest::new(cli.source)
        .with_patches(cli.patch)
        .with_merge_strategy(cli.merge_strategy);
    if let Some(format) = cli.output_format {
        request = request.with_output_format(format);
    }
    request
}

/// Log filter: `--debug`, then `--loglevel`, then `RUST_LOG`, then `info`
fn log_filter(debug: bool, level: Option<LogLevel>, rust_log: Option<&str>) -> String {
    let level = match (debug, level, rust_log) {
        (true, _, _) => LogLevel::Debug.as_str(),
        (false, Some(level), _) => level.as_str(),
        (false, None, Some(directives)) => return directives.to_string(),
        (false, None, None) => LogLevel::Info.as_str(),
    };

    ["laminate", "laminate_core", "laminate_source", "laminate_config"]
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

fn setup_logging(cli: &Cli) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = EnvFilter::new(log_filter(cli.debug, cli.loglevel, rust_log.as_deref()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // Ignore a subscriber that is already set
    let _ = match cli.logformat {
        LogFormat::Text => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Rich => builder.pretty().try_init(),
    };
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("laminate encountered an unexpected error: {}", panic_info);
        eprintln!("laminate crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/mad-weaver/laminate/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
