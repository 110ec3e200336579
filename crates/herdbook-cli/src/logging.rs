// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, parse_level};

pub const LOG_ENV: &str = "HERDBOOK_LOG";

/// Installs the global subscriber. The terminal belongs to the grid while it
/// runs, so every event goes to the log file.
pub fn init(config: &Config) -> Result<PathBuf> {
    let path = config.log_file()?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| {
            format!(
                "open log file {}; set [log].file to a writable path",
                path.display()
            )
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(env::var(LOG_ENV).ok(), config.log_level())?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;

    info!(log_file = %path.display(), "logging started");
    Ok(path)
}

/// `HERDBOOK_LOG` accepts full filter directives and wins over the
/// configured level.
fn env_filter(from_env: Option<String>, configured: &str) -> Result<EnvFilter> {
    match from_env.filter(|directives| !directives.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {LOG_ENV} filter {directives:?}")),
        None => Ok(EnvFilter::default().add_directive(parse_level(configured)?.into())),
    }
}
