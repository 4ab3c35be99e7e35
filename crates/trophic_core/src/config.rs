//! Configuration management.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `trophic.toml` file. Only the operational side of the simulation is
//! configurable: seeding, scheduling, the HTTP bind address and logging. The
//! ecosystem rules themselves are fixed in [`crate::rules`].
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `trophic.toml` file (overrides defaults)
//! 3. Command-line flags and `RUST_LOG` (override the file)
//!
//! ## Example `trophic.toml`
//!
//! ```toml
//! [engine]
//! seed = 42
//! schedule = "parallel"
//! workers = 4
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! static_dir = "public"
//!
//! [log]
//! filter = "info"
//! summary_interval = 100
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::engine::Schedule;

/// Engine-level configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub schedule: Schedule,
    /// Worker threads for the parallel schedule.
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            schedule: Schedule::Sequential,
            workers: 4,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `index.html` and its assets.
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: "public".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub filter: String,
    /// Ticks between info-level population summaries.
    pub summary_interval: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            summary_interval: 100,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.engine.workers > 0, "Worker count must be positive");
        anyhow::ensure!(
            self.engine.workers <= 256,
            "Worker count too large (max 256)"
        );

        anyhow::ensure!(
            !self.server.host.trim().is_empty(),
            "Server host must not be empty"
        );
        anyhow::ensure!(
            !self.server.static_dir.trim().is_empty(),
            "Static directory must not be empty"
        );

        anyhow::ensure!(
            !self.log.filter.trim().is_empty(),
            "Log filter must not be empty"
        );
        anyhow::ensure!(
            self.log.summary_interval > 0,
            "Summary interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration at `path`.
    ///
    /// A missing file yields the defaults, which are written to `path` so
    /// they can be edited. A present but invalid file is an error.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let default = Self::default();
            match toml::to_string(&default) {
                Ok(text) => {
                    if let Err(e) = std::fs::write(path, text) {
                        tracing::warn!("Could not write default config to {}: {}", path.display(), e);
                    }
                }
                Err(e) => tracing::warn!("Could not serialize default config: {}", e),
            }
            return Ok(default);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// `host:port` the HTTP server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
