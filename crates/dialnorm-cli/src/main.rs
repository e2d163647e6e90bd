mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, normalize, timezones, Context};
use crate::error::{exit_code_for, report_error};
use dialnorm_config as config;
use dialnorm_core::{Normalizer, PhoneOracle as _};

#[derive(Debug, Parser)]
#[command(name = "dialnorm", version, about = "dialnorm CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Normalize phone numbers to +<country code><national number>
    Normalize(normalize::NormalizeArgs),
    /// Check international-format phone numbers
    Validate(normalize::ValidateArgs),
    /// Print the region code for a timezone
    Region(timezones::RegionArgs),
    /// List known timezones
    Timezones(timezones::TimezonesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let normalizer =
                Normalizer::libphonenumber().with_max_recovery_depth(app_config.max_recovery_depth);
            if verbose {
                debug!(
                    calling_codes = normalizer.oracle().supported_calling_codes().len(),
                    max_recovery_depth = app_config.max_recovery_depth,
                    "normalizer ready"
                );
            }

            let ctx = Context {
                normalizer: &normalizer,
                json,
                config: &app_config,
            };

            match command {
                Command::Normalize(args) => normalize::normalize(&ctx, args),
                Command::Validate(args) => normalize::validate(&ctx, args),
                Command::Region(args) => timezones::region(&ctx, args),
                Command::Timezones(args) => timezones::list_timezones(&ctx, args),
                Command::Completions(_) => {
                    unreachable!("completions command handled before config load")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
