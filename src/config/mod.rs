//! Configuration management for the engine host.
//!
//! Provides hierarchical configuration loading and validation with:
//! - Default values as code base
//! - Configuration file support
//! - Environment variable overrides
//! - Section-wise validation
mod joiner;
mod network;
mod packet;
mod platform;
mod worker;
pub use joiner::*;
pub use network::*;
pub use packet::*;
pub use platform::*;
pub use worker::*;

use std::env;
use std::fmt::Debug;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Result;

/// Main configuration container for the engine host
///
/// Combines all section configurations with hierarchical override support:
/// 1. Default values from code implementation
/// 2. Configuration file specified by `CONFIG_PATH`
/// 3. Environment variables (highest priority)
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct HostConfig {
    /// Host vs. coprocessor operation and NAT64
    #[serde(default)]
    pub platform: PlatformConfig,
    /// Default dataset applied when the engine is not commissioned
    #[serde(default)]
    pub network: NetworkConfig,
    /// Joiner credential and descriptive strings
    #[serde(default)]
    pub joiner: JoinerConfig,
    /// Dedicated worker thread parameters
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Packet list sizing
    #[serde(default)]
    pub packet: PacketConfig,
}

impl Debug for HostConfig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("HostConfig")
            .field("platform", &self.platform)
            .field("network", &self.network)
            .field("worker", &self.worker)
            .finish_non_exhaustive()
    }
}

impl HostConfig {
    /// Loads configuration from hierarchical sources without validation.
    ///
    /// Configuration sources are merged in the following order (later sources override earlier):
    /// 1. Type defaults (lowest priority)
    /// 2. Configuration file from `CONFIG_PATH` environment variable (if set)
    /// 3. Environment variables with `OT__` prefix (highest priority)
    ///
    /// # Note
    /// This method does NOT validate the configuration. Callers MUST call `validate()`
    /// before using the configuration.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("OT__NETWORK__CHANNEL", "15");
    /// let cfg = HostConfig::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("OT")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Applies additional configuration overrides from file without validation.
    ///
    /// Merging order (later sources override earlier):
    /// 1. Current configuration values
    /// 2. New configuration file
    /// 3. Latest environment variables (highest priority)
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("OT")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validates every section and returns the validated instance.
    pub fn validate(self) -> Result<Self> {
        self.platform.validate()?;
        self.network.validate()?;
        self.joiner.validate()?;
        self.worker.validate()?;
        self.packet.validate()?;
        Ok(self)
    }

    pub fn is_coprocessor(&self) -> bool {
        self.platform.mode == PlatformMode::Coprocessor
    }
}
