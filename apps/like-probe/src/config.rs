//! Layered runner configuration.
//!
//! Sources, lowest precedence first:
//! 1) built-in defaults
//! 2) YAML file passed with `--config`
//! 3) environment variables `LIKE_PROBE__<SECTION>__<KEY>`
//! 4) CLI overrides

use std::path::{Path, PathBuf};

use anyhow::Result;
use blogs::{DatabaseConfig, ProbeConfig, SeedConfig};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "LIKE_PROBE__";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub capture: CaptureConfig,
    pub seed: SeedConfig,
    pub probes: ProbeConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Diagnostic trace of every captured line; `null` disables it.
    pub trace_file: Option<PathBuf>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            trace_file: Some(std::env::temp_dir().join("sql.txt")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
        }
    }
}

/// Values given on the command line; `None` leaves the layered value alone.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub database_url: Option<String>,
    pub search: Option<String>,
    pub trace_file: Option<PathBuf>,
}

impl AppConfig {
    /// Merge defaults, the optional YAML file and the environment.
    ///
    /// # Errors
    ///
    /// Fails when a source cannot be read or holds unknown or mistyped keys.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(url) = overrides.database_url {
            self.database.url = url;
        }
        if let Some(search) = overrides.search {
            self.probes.search = search;
        }
        if let Some(path) = overrides.trace_file {
            self.capture.trace_file = Some(path);
        }
    }
}
