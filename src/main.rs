//! Autolabel - stable labels for interactive page elements
//!
//! Main entry point for the autolabel CLI.

mod cli;
mod cmd_config;
mod cmd_draw;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use autolabel_config::{Config, ConfigLoader};

use crate::cli::{Cli, Commands};

fn autolabel_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".autolabel"))
        .unwrap_or_else(|| PathBuf::from(".autolabel"))
}

/// Load the configuration.
///
/// An explicitly given file must exist; the default file is optional.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let path = PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy()));
            let config = ConfigLoader::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            debug!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => {
            let path = autolabel_dir().join("config.toml");
            ConfigLoader::load_or_default(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
    }
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing with console output and, with `log_dir`, daily log files.
///
/// `RUST_LOG` is honoured unless `-v` is given. Console output goes to stderr
/// so reports on stdout stay machine-readable.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = if verbose > 0 {
        EnvFilter::new(level_for(verbose))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("autolabel")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keep the writer alive for the program duration.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_dir.as_deref())?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Draw {
            snapshot,
            format,
            output,
            remove,
        } => cmd_draw::handle_draw(&config, &snapshot, format, output.as_deref(), remove),
        Commands::Stylesheet => cmd_config::print_stylesheet(&config),
        Commands::CheckConfig => cmd_config::check_config(&config),
    }
}
