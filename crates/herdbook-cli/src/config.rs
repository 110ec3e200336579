// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use herdbook_grid::{Accessor, ColumnSpec, DEFAULT_ROWS_PER_PAGE, GridOptions, SelectionMode};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

pub const APP_NAME: &str = "herdbook";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_NAME: &str = "herdbook.log";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub grid: Grid,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            grid: Grid::default(),
            log: Log::default(),
            columns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Grid {
    pub rows_per_page: Option<usize>,
    pub show_pagination: Option<bool>,
    pub show_search_and_filter: Option<bool>,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            rows_per_page: Some(DEFAULT_ROWS_PER_PAGE),
            show_pagination: Some(true),
            show_search_and_filter: Some(true),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("HERDBOOK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set HERDBOOK_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` at the top and keep settings under [grid], [log], and [[columns]]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(rows) = self.grid.rows_per_page
            && rows == 0
        {
            bail!(
                "grid.rows_per_page in {} must be positive, got 0",
                path.display()
            );
        }

        if let Some(level) = &self.log.level {
            parse_level(level).with_context(|| format!("log.level in {}", path.display()))?;
        }

        for (index, column) in self.columns.iter().enumerate() {
            Accessor::parse(&column.accessor).with_context(|| {
                format!(
                    "columns[{index}] ({:?}) in {} has an unusable accessor",
                    column.header,
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    /// Grid settings from `[grid]`. `selection` is `None` for the read-only
    /// surface.
    pub fn grid_options(&self, selection: Option<SelectionMode>) -> GridOptions {
        GridOptions {
            rows_per_page: self.grid.rows_per_page.unwrap_or(DEFAULT_ROWS_PER_PAGE),
            show_pagination: self.grid.show_pagination.unwrap_or(true),
            show_search_and_filter: self.grid.show_search_and_filter.unwrap_or(true),
            selection,
        }
    }

    pub fn column_specs(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].file in the config")
        })?;
        Ok(data_root.join(APP_NAME).join(LOG_FILE_NAME))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# herdbook config\n# Place this file at: {}\n\nversion = 1\n\n[grid]\nrows_per_page = {}\nshow_pagination = true\nshow_search_and_filter = true\n\n[log]\nlevel = \"{}\"\n# Optional. Default is platform data dir (for example ~/.local/share/herdbook/herdbook.log)\n# file = \"/absolute/path/to/herdbook.log\"\n\n# Columns for `--data` files. Without any, columns follow the first record's keys.\n# [[columns]]\n# header = \"Tag\"\n# accessor = \"tag\"\n# type = \"text\"  # text, number, date, or currency\n# filterable = true\n",
            path.display(),
            DEFAULT_ROWS_PER_PAGE,
            DEFAULT_LOG_LEVEL,
        )
    }
}

pub fn parse_level(raw: &str) -> Result<LevelFilter> {
    raw.trim().parse::<LevelFilter>().map_err(|_| {
        anyhow!("invalid log level {raw:?}; use one of: off, error, warn, info, debug, trace")
    })
}
