use std::path::Path;
use std::time::Duration;

use dsx_lib::{Config, DsxError, Viewport};

/// Tracks which CLI flags were explicitly provided vs. defaulted, so config
/// file values only apply where the user did not pass a flag.
#[derive(Debug, Default)]
pub struct CompareFlagSources {
    pub viewport: bool,
    pub threshold: bool,
    pub wait: bool,
    pub nav_timeout: bool,
    pub process_timeout: bool,
}

impl CompareFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            viewport: flag_present(args, "--viewport"),
            threshold: flag_present(args, "--threshold"),
            wait: flag_present(args, "--wait"),
            nav_timeout: flag_present(args, "--nav-timeout"),
            process_timeout: flag_present(args, "--process-timeout"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Resolved settings after merging CLI args and config file.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCompareSettings {
    pub viewport: Viewport,
    pub threshold: f64,
    pub wait: Duration,
    pub navigation_timeout: Duration,
    pub process_timeout: Duration,
}

/// Merge CLI arguments with the config file, preferring CLI when flags are
/// explicitly present.
pub fn resolve_compare_settings(
    cli_viewport: Viewport,
    cli_threshold: f64,
    cli_wait_ms: u64,
    cli_nav_timeout_secs: u64,
    cli_process_timeout_secs: u64,
    config: &Config,
    flags: &CompareFlagSources,
) -> ResolvedCompareSettings {
    ResolvedCompareSettings {
        viewport: if flags.viewport {
            cli_viewport
        } else {
            config.viewport
        },
        threshold: if flags.threshold {
            cli_threshold
        } else {
            config.threshold
        },
        wait: if flags.wait {
            Duration::from_millis(cli_wait_ms)
        } else {
            config.wait
        },
        navigation_timeout: if flags.nav_timeout {
            Duration::from_secs(cli_nav_timeout_secs)
        } else {
            config.timeouts.navigation
        },
        process_timeout: if flags.process_timeout {
            Duration::from_secs(cli_process_timeout_secs)
        } else {
            config.timeouts.process
        },
    }
}

/// Load config from an optional TOML file path.
pub fn load_config(path: Option<&Path>) -> Result<Config, DsxError> {
    Config::load(path)
}

/// Log the effective configuration to stderr (verbose mode).
pub fn log_effective_config(
    config_path: Option<&Path>,
    settings: &ResolvedCompareSettings,
) {
    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults/built-in".to_string());
    eprintln!(
        "Effective config (source: {}): viewport={} threshold={} wait={:?} nav_timeout={:?} process_timeout={:?}",
        source,
        settings.viewport,
        settings.threshold,
        settings.wait,
        settings.navigation_timeout,
        settings.process_timeout,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flag_present_handles_both_syntaxes() {
        let raw = args(&["dsx", "compare", "--threshold", "90", "--viewport=800x600"]);
        assert!(flag_present(&raw, "--threshold"));
        assert!(flag_present(&raw, "--viewport"));
        assert!(!flag_present(&raw, "--wait"));
    }

    #[test]
    fn config_fills_in_unflagged_values() {
        let mut config = Config::default();
        config.threshold = 85.0;
        config.wait = Duration::from_millis(500);

        let flags = CompareFlagSources {
            threshold: false,
            wait: false,
            viewport: true,
            nav_timeout: false,
            process_timeout: false,
        };
        let resolved = resolve_compare_settings(
            Viewport {
                width: 800,
                height: 600,
            },
            95.0,
            2000,
            30,
            60,
            &config,
            &flags,
        );

        assert_eq!(resolved.viewport.width, 800);
        assert!((resolved.threshold - 85.0).abs() < f64::EPSILON);
        assert_eq!(resolved.wait, Duration::from_millis(500));
        assert_eq!(resolved.navigation_timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_flags_beat_config() {
        let mut config = Config::default();
        config.threshold = 85.0;

        let flags = CompareFlagSources {
            threshold: true,
            ..Default::default()
        };
        let resolved = resolve_compare_settings(
            Viewport::default(),
            99.0,
            2000,
            30,
            60,
            &config,
            &flags,
        );
        assert!((resolved.threshold - 99.0).abs() < f64::EPSILON);
    }
}
