//! Configuration loading and validation for the sealer tool.
//!
//! Values are read from `SEALER_`-prefixed environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated sealer configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Secret the per-token AES key is derived from. **Required.**
    pub encrypt_key: String,

    /// Secret the per-token MAC key is derived from. **Required.**
    pub validate_key: String,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or invalid.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("SEALER"))
            .build()
            .context("failed to build sealer configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise sealer configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.encrypt_key, "SEALER_ENCRYPT_KEY")?;
        ensure_non_empty(&self.validate_key, "SEALER_VALIDATE_KEY")?;
        if self.encrypt_key == self.validate_key {
            anyhow::bail!("SEALER_ENCRYPT_KEY and SEALER_VALIDATE_KEY must differ");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("encrypt_key", &"[REDACTED]")
            .field("validate_key", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            encrypt_key: "somesecretkey".into(),
            validate_key: "anothersecretstring".into(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_encrypt_key() {
        let cfg = Config {
            encrypt_key: "".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_validate_key() {
        let cfg = Config {
            validate_key: "".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_identical_keys() {
        let cfg = Config {
            validate_key: "somesecretkey".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_redacts_keys() {
        let printed = format!("{:?}", valid());
        assert!(!printed.contains("somesecretkey"));
        assert!(printed.contains("info"));
    }
}
