use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{filter::Targets, prelude::*};

pub fn setup_tracing(verbose: bool, logfile: &Option<PathBuf>) -> Result<()> {
    let filter = if verbose {
        Targets::new()
            // connection pool chatter
            .with_target("hyper", Level::INFO)
            .with_target("hyper_util", Level::INFO)
            .with_target("reqwest", Level::INFO)
            .with_default(Level::DEBUG)
    } else {
        Targets::default()
            .with_target("hyper", Level::WARN)
            .with_default(Level::INFO)
    };
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_line_number(verbose);
    let file_log = match logfile {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to open logfile {:?}", path))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(file_log)
        .with(filter)
        .try_init()
        .context("failed to install tracing subscriber")
}
