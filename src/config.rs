//! Runtime settings.
//!
//! Layered, lowest priority first: built-in defaults, an optional config
//! file, then `SHEETVIEW_*` environment variables. Command-line flags are
//! applied last with [`Settings::apply_cli`].

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::ui::ThemeMode;

const ENV_PREFIX: &str = "SHEETVIEW";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log at debug level.
    pub debug: bool,
    /// Skip per-cell column width measurement.
    pub performance: bool,
    pub theme: ThemeMode,
}

impl Settings {
    /// Load settings from `path` (if given) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix(prefix))
            .build()
            .context("Failed to load configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Overlay command-line flags. A flag that is set always wins; an unset
    /// flag keeps the configured value.
    pub fn apply_cli(&mut self, debug: bool, performance: bool, theme: Option<ThemeMode>) {
        self.debug |= debug;
        self.performance |= performance;
        if let Some(theme) = theme {
            self.theme = theme;
        }
    }
}
