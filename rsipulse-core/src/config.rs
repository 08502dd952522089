//! Dashboard configuration, TOML-loadable, validated before any fetch.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Interval;

/// Configuration errors. All of these are fatal to session construction:
/// an invalid config is reported before a single fetch happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RSI period must be >= 2, got {got}")]
    InvalidPeriod { got: usize },

    #[error("refresh interval must be >= 1 second, got {got}")]
    InvalidRefresh { got: u64 },

    #[error("history capacity must be >= 1, got {got}")]
    InvalidCapacity { got: usize },

    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables for one dashboard session.
///
/// Every field has a default, so a partial TOML file (or none at all)
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// RSI lookback in deltas. Shared by both timeframes.
    pub rsi_period: usize,
    /// Fine-grained timeframe; also supplies the displayed last price.
    pub fast_interval: Interval,
    /// Coarse timeframe for confirmation.
    pub slow_interval: Interval,
    /// Seconds between refresh cycles.
    pub refresh_secs: u64,
    /// Refresh cycles retained in the rolling history.
    pub history_capacity: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            fast_interval: Interval::M5,
            slow_interval: Interval::M15,
            refresh_secs: 60,
            history_capacity: crate::history::MAX_HISTORY,
        }
    }
}

impl DashboardConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every constraint, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rsi_period < 2 {
            return Err(ConfigError::InvalidPeriod {
                got: self.rsi_period,
            });
        }
        if self.refresh_secs < 1 {
            return Err(ConfigError::InvalidRefresh {
                got: self.refresh_secs,
            });
        }
        if self.history_capacity < 1 {
            return Err(ConfigError::InvalidCapacity {
                got: self.history_capacity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rsi_period, 14);
        assert_eq!(config.refresh_secs, 60);
        assert_eq!(config.history_capacity, 100);
    }

    #[test]
    fn period_below_2_is_rejected() {
        let mut config = DashboardConfig::default();
        config.rsi_period = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPeriod { got: 1 })
        ));

        config.rsi_period = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_refresh_and_capacity_are_rejected() {
        let mut config = DashboardConfig::default();
        config.refresh_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRefresh { got: 0 })
        ));

        let mut config = DashboardConfig::default();
        config.history_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCapacity { got: 0 })
        ));
    }

    #[test]
    fn partial_toml_takes_defaults() {
        let config = DashboardConfig::from_toml("rsi_period = 21\n").unwrap();
        assert_eq!(config.rsi_period, 21);
        assert_eq!(config.fast_interval, Interval::M5);
        assert_eq!(config.slow_interval, Interval::M15);
        assert_eq!(config.refresh_secs, 60);
    }

    #[test]
    fn full_toml_roundtrip() {
        let config = DashboardConfig {
            rsi_period: 9,
            fast_interval: Interval::M1,
            slow_interval: Interval::M30,
            refresh_secs: 30,
            history_capacity: 50,
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = DashboardConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn invalid_toml_is_rejected_at_parse() {
        let result = DashboardConfig::from_toml("rsi_period = 1\n");
        assert!(matches!(result, Err(ConfigError::InvalidPeriod { got: 1 })));

        let result = DashboardConfig::from_toml("fast_interval = \"7m\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn config_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rsipulse.toml");
        std::fs::write(&path, "refresh_secs = 15\nfast_interval = \"1m\"\n").unwrap();
        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.refresh_secs, 15);
        assert_eq!(config.fast_interval, Interval::M1);
    }
}
