//! Configuration loading
//!
//! Settings are layered, later sources winning:
//! 1. defaults (every mode off, no seed)
//! 2. a TOML file: `snusp.toml` in the working directory if present, or the
//!    file named by `SNUSP_CONFIG_PATH` / `--config`, which must exist
//! 3. `SNUSP_*` environment variables (`SNUSP_MODULAR=true`, `SNUSP_SEED=7`)
//! 4. explicit overrides, normally taken from the command line

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::interpreter::ExecutionModes;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "snusp.toml";

/// Prefix of the environment variables read by default
pub const ENV_PREFIX: &str = "SNUSP";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub modular: bool,
    pub bloated: bool,
    pub twist: bool,
    pub eof_zero: bool,
    pub debug: bool,
    /// Seed for `%`; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn modes(&self) -> ExecutionModes {
        ExecutionModes {
            modular: self.modular,
            bloated: self.bloated,
            twist: self.twist,
            eof_zero: self.eof_zero,
            debug: self.debug,
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Values that take precedence over every other source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub modular: Option<bool>,
    pub bloated: Option<bool>,
    pub twist: Option<bool>,
    pub eof_zero: Option<bool>,
    pub debug: Option<bool>,
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(v) = self.modular {
            config.modular = v;
        }
        if let Some(v) = self.bloated {
            config.bloated = v;
        }
        if let Some(v) = self.twist {
            config.twist = v;
        }
        if let Some(v) = self.eof_zero {
            config.eof_zero = v;
        }
        if let Some(v) = self.debug {
            config.debug = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    env_prefix: Option<String>,
    overrides: ConfigOverrides,
}

impl ConfigBuilder {
    /// Explicit config file; it must exist
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Read `<PREFIX>_*` variables instead of `SNUSP_*`
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let prefix = self.env_prefix.as_deref().unwrap_or(ENV_PREFIX);
        let path = self.config_path.or_else(|| {
            std::env::var(format!("{}_CONFIG_PATH", prefix))
                .ok()
                .map(PathBuf::from)
        });

        let file = match &path {
            Some(path) => ::config::File::from(path.as_path()).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mut config: Config = ::config::Config::builder()
            .add_source(file)
            .add_source(::config::Environment::with_prefix(prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;

        self.overrides.apply(&mut config);
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}
