use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{DsxError, Result};
use crate::Viewport;

/// Resolved tool configuration: built-in defaults overlaid with an optional
/// TOML config file; CLI flags take precedence over both (handled by the
/// binary's settings layer).
#[derive(Debug, Clone)]
pub struct Config {
    pub viewport: Viewport,
    pub threshold: f64,
    pub wait: Duration,
    pub timeouts: Timeouts,
}

#[derive(Debug, Clone)]
pub struct Timeouts {
    pub navigation: Duration,
    pub process: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(30),
            process: Duration::from_secs(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            // 95% accounts for minor rendering differences (anti-aliasing,
            // subpixel) across environments.
            threshold: 95.0,
            // Settle delay before screenshots so dynamic content and
            // animations complete.
            wait: Duration::from_millis(2000),
            timeouts: Timeouts::default(),
        }
    }
}

/// On-disk layout of the TOML config file; every field optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    viewport: Option<String>,
    threshold: Option<f64>,
    #[serde(default, with = "humantime_serde")]
    wait: Option<Duration>,
    #[serde(default, with = "humantime_serde")]
    nav_timeout: Option<Duration>,
    #[serde(default, with = "humantime_serde")]
    process_timeout: Option<Duration>,
}

impl Config {
    /// Load config from a TOML file, or return defaults when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();
        let Some(path) = path else {
            return Ok(config);
        };

        let raw = std::fs::read_to_string(path)
            .map_err(|e| DsxError::Config(format!("Failed to read config {}: {}", path.display(), e)))?;
        let file: ConfigFile = toml::from_str(&raw)
            .map_err(|e| DsxError::Config(format!("Invalid config {}: {}", path.display(), e)))?;

        if let Some(viewport) = file.viewport {
            config.viewport = viewport
                .parse()
                .map_err(|e| DsxError::Config(format!("Invalid config viewport: {}", e)))?;
        }
        if let Some(threshold) = file.threshold {
            config.threshold = threshold;
        }
        if let Some(wait) = file.wait {
            config.wait = wait;
        }
        if let Some(nav) = file.nav_timeout {
            config.timeouts.navigation = nav;
        }
        if let Some(process) = file.process_timeout {
            config.timeouts.process = process;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(DsxError::Config(format!(
                "Threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
