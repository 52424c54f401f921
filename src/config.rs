use chrono::{NaiveDate, Utc};
use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Business-rule parameters for the quote engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Fraction of eligible remaining value advanced (e.g., 0.80 = 80%)
    #[serde(default = "default_advance_rate")]
    pub advance_rate: Decimal,
    /// Per-agent ceiling on the advance amount
    #[serde(default = "default_advance_cap")]
    pub advance_cap: Decimal,
    /// Days that must have elapsed since policy submission
    #[serde(default = "default_eligibility_days")]
    pub eligibility_days: i64,
    /// Fixed reference date for reproducible runs; ignored when
    /// `use_current_date` is set.
    #[serde(default = "default_frozen_today")]
    pub frozen_today: NaiveDate,
    /// Evaluate eligibility against the real current UTC date instead of
    /// `frozen_today`.
    #[serde(default)]
    pub use_current_date: bool,
}

impl EngineConfig {
    /// The "today" every eligibility decision in one run is made against.
    pub fn reference_today(&self) -> NaiveDate {
        if self.use_current_date {
            Utc::now().date_naive()
        } else {
            self.frozen_today
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            advance_rate: default_advance_rate(),
            advance_cap: default_advance_cap(),
            eligibility_days: default_eligibility_days(),
            frozen_today: default_frozen_today(),
            use_current_date: false,
        }
    }
}

fn default_advance_rate() -> Decimal {
    dec!(0.80)
}

fn default_advance_cap() -> Decimal {
    dec!(2000.00)
}

fn default_eligibility_days() -> i64 {
    7
}

fn default_frozen_today() -> NaiveDate {
    // Reproducibility anchor shared with the test fixtures.
    NaiveDate::from_ymd_opt(2025, 7, 6).expect("valid calendar date")
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("ADVANCER_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (ADVANCER_ENGINE__ADVANCE_RATE, etc.)
            .add_source(
                Environment::with_prefix("ADVANCER")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.engine.advance_rate <= Decimal::ZERO || self.engine.advance_rate > Decimal::ONE {
            errors.push("advance_rate must be in (0, 1]".to_string());
        }

        if self.engine.advance_cap < Decimal::ZERO {
            errors.push("advance_cap must be non-negative".to_string());
        }

        if self.engine.eligibility_days < 0 {
            errors.push("eligibility_days must be non-negative".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_business_rules() {
        let config = AppConfig::default();
        assert_eq!(config.engine.advance_rate, dec!(0.80));
        assert_eq!(config.engine.advance_cap, dec!(2000.00));
        assert_eq!(config.engine.eligibility_days, 7);
        assert_eq!(
            config.engine.reference_today(),
            NaiveDate::from_ymd_opt(2025, 7, 6).unwrap()
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_rate() {
        let mut config = AppConfig::default();
        config.engine.advance_rate = dec!(1.5);
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("advance_rate"));
    }

    #[test]
    fn missing_config_dir_yields_defaults() {
        let config = AppConfig::load_from("/nonexistent-config-dir").unwrap();
        assert_eq!(config.engine.eligibility_days, 7);
        assert_eq!(config.server.port, 8080);
    }
}
