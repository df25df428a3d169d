// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use autoshop_app::UserRole;
use autoshop_data::APP_NAME;
use autoshop_tui::ViewOptions;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

const CONFIG_VERSION: i64 = 1;
const CONFIG_PATH_ENV: &str = "AUTOSHOP_CONFIG_PATH";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub records_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub role: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub show_filters: Option<bool>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            role: Some(UserRole::Admin.as_str().to_owned()),
            user_name: None,
            user_email: None,
            show_filters: Some(true),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
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
                    "config file {} has no version. Add `version = 1` and put values under [data], [ui], and [log]",
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
        if let Some(records_path) = &self.data.records_path {
            autoshop_data::validate_records_path(records_path)
                .with_context(|| format!("invalid [data].records_path in {}", path.display()))?;
        }

        if let Some(role) = &self.ui.role
            && UserRole::parse(role).is_none()
        {
            bail!(
                "ui.role in {} must be \"admin\" or \"staff\", got {role:?}",
                path.display()
            );
        }

        if let Some(level) = &self.log.level {
            parse_level(level)
                .with_context(|| format!("invalid log.level in {}", path.display()))?;
        }

        if let Some(file) = &self.log.file
            && file.trim().is_empty()
        {
            bail!(
                "log.file in {} must not be empty; remove it to use the default",
                path.display()
            );
        }

        Ok(())
    }

    pub fn records_path(&self) -> Option<PathBuf> {
        self.data.records_path.as_deref().map(PathBuf::from)
    }

    pub fn role(&self) -> UserRole {
        self.ui
            .role
            .as_deref()
            .and_then(UserRole::parse)
            .unwrap_or_default()
    }

    pub fn view_options(&self) -> ViewOptions {
        let defaults = ViewOptions::default();
        ViewOptions {
            user_name: self.ui.user_name.clone().unwrap_or(defaults.user_name),
            user_email: self.ui.user_email.clone().unwrap_or(defaults.user_email),
            show_filters: self.ui.show_filters.unwrap_or(defaults.show_filters),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].file in your config")
        })?;
        Ok(data_root.join(APP_NAME).join(format!("{APP_NAME}.log")))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# autoshop config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Optional. Without it the bundled sample records are shown.\n# records_path = \"/absolute/path/to/records.json\"\n\n[ui]\nrole = \"admin\"\nuser_name = \"John Doe\"\nuser_email = \"john@example.com\"\nshow_filters = true\n\n[log]\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/autoshop/autoshop.log)\n# file = \"/absolute/path/to/autoshop.log\"\n",
            path.display(),
        )
    }
}

pub fn parse_level(raw: &str) -> Result<LevelFilter> {
    raw.trim().parse::<LevelFilter>().map_err(|_| {
        anyhow!("unknown log level {raw:?}; use one of: off, error, warn, info, debug, trace")
    })
}
