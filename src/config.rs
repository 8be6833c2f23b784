//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub link: LinkConfig,

    #[serde(default)]
    pub preamble: PreambleConfig,

    #[serde(default)]
    pub demo: DemoConfig,
}

/// Serial link configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LinkConfig {
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
}

/// Synchronization preamble configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PreambleConfig {
    #[serde(default = "default_preamble_enabled")]
    pub enabled: bool,

    #[serde(default = "default_preamble_gap_us")]
    pub gap_us: u64,
}

/// Demo channel sweep configuration (binary only)
#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    #[serde(default = "default_sweep_channel")]
    pub sweep_channel: usize,

    #[serde(default = "default_sweep_period_ms")]
    pub sweep_period_ms: u64,
}

// Default value functions
fn default_baud_rate() -> u32 { 420_000 }
fn default_update_interval_ms() -> u64 { 20 }

fn default_preamble_enabled() -> bool { true }
fn default_preamble_gap_us() -> u64 { 100 }

fn default_sweep_channel() -> usize { 0 }
fn default_sweep_period_ms() -> u64 { 2000 }

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: default_baud_rate(),
            update_interval_ms: default_update_interval_ms(),
        }
    }
}

impl Default for PreambleConfig {
    fn default() -> Self {
        Self {
            enabled: default_preamble_enabled(),
            gap_us: default_preamble_gap_us(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sweep_channel: default_sweep_channel(),
            sweep_period_ms: default_sweep_period_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link: LinkConfig::default(),
            preamble: PreambleConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, TOML parsing fails, or
    /// validation fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use crsf_softtx::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Spacing between frame transmissions.
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.link.update_interval_ms)
    }

    /// Post-preamble gap, or `None` when the preamble is disabled.
    pub fn preamble_gap(&self) -> Option<Duration> {
        self.preamble
            .enabled
            .then(|| Duration::from_micros(self.preamble.gap_us))
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        // Software bit timing gets unreliable well before hardware UART
        // rates do; cap at a rate a spin loop can still hold.
        if self.link.baud_rate < 9600 || self.link.baud_rate > 460_800 {
            return Err(crate::error::SoftTxError::Config(
                toml::de::Error::custom("baud_rate must be between 9600 and 460800")
            ));
        }

        if self.link.update_interval_ms == 0 || self.link.update_interval_ms > 1000 {
            return Err(crate::error::SoftTxError::Config(
                toml::de::Error::custom("update_interval_ms must be between 1 and 1000")
            ));
        }

        if self.preamble.gap_us > 10_000 {
            return Err(crate::error::SoftTxError::Config(
                toml::de::Error::custom("gap_us must be at most 10000")
            ));
        }

        if self.demo.sweep_channel > 15 {
            return Err(crate::error::SoftTxError::Config(
                toml::de::Error::custom("sweep_channel must be between 0 and 15")
            ));
        }

        if self.demo.sweep_period_ms < 100 || self.demo.sweep_period_ms > 60_000 {
            return Err(crate::error::SoftTxError::Config(
                toml::de::Error::custom("sweep_period_ms must be between 100 and 60000")
            ));
        }

        Ok(())
    }
}
