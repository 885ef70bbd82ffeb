// # -----------------------------
// # crates/cli/src/main.rs
// # -----------------------------
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{debug, error};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use jcmp_cli::core::serde_api::{mismatch_error, std_error_from_compare_error};
use jcmp_cli::core::{ComparatorKind, CompareConfig, CompareEngine, CompareError, CompareMode};
use jcmp_cli::{OutputFormat, StdResponse};

const EXIT_PASS: u8 = 0;
const EXIT_MISMATCH: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "jcmp", version, about = "jcmp - structural JSON comparison", long_about = None)]
struct Cli {
    /// Output format: pretty human-readable report (default is JSON)
    #[arg(long = "pretty", global = true)]
    pretty: bool,
    /// Log level (trace, debug, info, warn, error, off). Overrides RUST_LOG if set.
    #[arg(long = "log-level", global = true, value_name = "LEVEL")]
    log_level: Option<String>,
    /// Configuration file (defaults to JCMP_CONFIG, then ./jcmp.toml)
    #[arg(long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare an expected JSON document against an actual one.
    ///
    /// Examples:
    /// ```
    /// jcmp compare expected.json response.json
    /// jcmp compare --inline '[{"id":1}]' '[{"id":2},{"id":1}]' --pretty
    /// ```
    Compare {
        /// Expected document (path, or JSON text with --inline)
        expected: String,
        /// Actual document (path, or JSON text with --inline)
        actual: String,
        /// Compare mode (strict|lenient|non-extensible|strict-order)
        #[arg(long)]
        mode: Option<String>,
        /// Comparator (default|subset|array-size)
        #[arg(long)]
        comparator: Option<String>,
        /// Treat EXPECTED and ACTUAL as JSON text rather than file paths
        #[arg(long)]
        inline: bool,
        /// Maximum differences listed in the output (0 = all)
        #[arg(long)]
        max_entries: Option<usize>,
    },
    /// List compare modes and comparators
    Modes,
}

/// Initialize logging based on CLI arguments and environment
fn init_logging(log_level: Option<&str>) {
    // CLI arg overrides RUST_LOG
    let filter = if let Some(level) = log_level {
        match level.to_lowercase().as_str() {
            "off" => EnvFilter::new("off"),
            "error" => EnvFilter::new("error"),
            "warn" | "warning" => EnvFilter::new("warn"),
            "info" => EnvFilter::new("info"),
            "debug" => EnvFilter::new("debug"),
            "trace" => EnvFilter::new("trace"),
            _ => {
                eprintln!("Warning: Invalid log level '{}', using 'warn'", level);
                EnvFilter::new("warn")
            }
        }
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stdout carries the response, logs go to stderr
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!(error = %err, "jcmp failed");
            eprintln!("Error: {:#}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    match &cli.command {
        Commands::Modes => {
            print_modes(OutputFormat::from_pretty_flag(cli.pretty))?;
            Ok(EXIT_PASS)
        }
        Commands::Compare {
            expected,
            actual,
            mode,
            comparator,
            inline,
            max_entries,
        } => {
            let request_id = Uuid::new_v4();
            let overrides = Overrides {
                mode: mode.as_deref(),
                comparator: comparator.as_deref(),
                max_entries: *max_entries,
                pretty: cli.pretty,
            };
            let config = match load_config(cli.config.clone(), &overrides) {
                Ok(config) => config,
                Err(err) => {
                    let format = OutputFormat::from_pretty_flag(cli.pretty);
                    return emit_error(&err, format, request_id);
                }
            };
            let format = OutputFormat::from_pretty_flag(config.output.pretty);
            let engine = CompareEngine::new(config);

            let outcome = if *inline {
                engine.compare_str(expected, actual)
            } else {
                engine.compare_files(Path::new(expected), Path::new(actual))
            };
            let result = match outcome {
                Ok(result) => result,
                Err(err) => return emit_error(&err, format, request_id),
            };

            let report = engine.report(&result);
            debug!(%request_id, passed = report.passed, "writing report");
            match format {
                OutputFormat::Pretty => write_stdout(&report.to_pretty())?,
                OutputFormat::Json => {
                    let response = if report.passed {
                        StdResponse::success(&report, Some(request_id))
                    } else {
                        StdResponse::rejected(&report, mismatch_error(&report), Some(request_id))
                    };
                    let line =
                        serde_json::to_string(&response).context("serializing response")?;
                    write_stdout(&format!("{}\n", line))?;
                }
            }
            Ok(if report.passed {
                EXIT_PASS
            } else {
                EXIT_MISMATCH
            })
        }
    }
}

struct Overrides<'a> {
    mode: Option<&'a str>,
    comparator: Option<&'a str>,
    max_entries: Option<usize>,
    pretty: bool,
}

fn load_config(path: Option<PathBuf>, overrides: &Overrides<'_>) -> Result<CompareConfig, CompareError> {
    let mut config = CompareConfig::from_sources(path)?;
    if let Some(mode) = overrides.mode {
        config.mode = mode.parse()?;
    }
    if let Some(comparator) = overrides.comparator {
        config.comparator = comparator.parse()?;
    }
    if let Some(max) = overrides.max_entries {
        config.output.max_entries = max;
    }
    if overrides.pretty {
        config.output.pretty = true;
    }
    config.validate()?;
    Ok(config)
}

fn emit_error(err: &CompareError, format: OutputFormat, request_id: Uuid) -> Result<u8> {
    error!(code = err.error_code(), error = %err, "comparison could not run");
    match format {
        OutputFormat::Pretty => {
            eprintln!("Error [{}]: {}", err.error_code(), err);
            for hint in err.recovery_hints() {
                eprintln!("  hint: {}", hint);
            }
        }
        OutputFormat::Json => {
            let response: StdResponse<()> =
                StdResponse::error(std_error_from_compare_error(err), Some(request_id));
            let line = serde_json::to_string(&response).context("serializing error response")?;
            write_stdout(&format!("{}\n", line))?;
        }
    }
    Ok(EXIT_ERROR)
}

fn print_modes(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => {
            let mut out = String::from("Modes:\n");
            for mode in CompareMode::ALL {
                out.push_str(&format!(
                    "  {:<15} extensible={:<5} strict_order={:<5} {}\n",
                    mode.as_str(),
                    mode.is_extensible(),
                    mode.has_strict_order(),
                    mode.description()
                ));
            }
            out.push_str("Comparators:\n");
            for kind in ComparatorKind::ALL {
                out.push_str(&format!("  {}\n", kind));
            }
            write_stdout(&out)
        }
        OutputFormat::Json => {
            let modes: Vec<_> = CompareMode::ALL
                .iter()
                .map(|mode| {
                    json!({
                        "name": mode.as_str(),
                        "extensible": mode.is_extensible(),
                        "strict_order": mode.has_strict_order(),
                        "description": mode.description(),
                    })
                })
                .collect();
            let comparators: Vec<_> = ComparatorKind::ALL.iter().map(|k| k.as_str()).collect();
            let response = StdResponse::success(
                json!({ "modes": modes, "comparators": comparators }),
                None,
            );
            let line = serde_json::to_string(&response).context("serializing modes")?;
            write_stdout(&format!("{}\n", line))
        }
    }
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("writing to stdout")?;
    stdout.flush().context("flushing stdout")
}
