//! Server settings
//!
//! Defaults overridable through `BLUEWATCH_*` environment variables,
//! e.g. `BLUEWATCH_BIND_ADDR=0.0.0.0:9090`.

use crate::rate_limit::RateLimitConfig;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// API server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Listen address
    pub bind_addr: String,
    /// Rate limit replenish interval (seconds per request)
    pub rate_limit_per_second: u64,
    /// Rate limit burst size
    pub rate_limit_burst: u32,
}

impl ApiSettings {
    /// Load settings from defaults plus environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")?
            .set_default("rate_limit_per_second", 2i64)?
            .set_default("rate_limit_burst", 5i64)?
            .add_source(Environment::with_prefix("BLUEWATCH"))
            .build()?
            .try_deserialize()
    }

    /// Rate limit view of the settings
    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            per_second: self.rate_limit_per_second,
            burst_size: self.rate_limit_burst,
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            rate_limit_per_second: 2,
            rate_limit_burst: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_without_env() {
        let settings = ApiSettings::load().unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.rate_limit_per_second, 2);
        assert_eq!(settings.rate_limit_burst, 5);
    }

    #[test]
    fn rate_limit_view_copies_fields() {
        let settings = ApiSettings::default();
        let limits = settings.rate_limit();
        assert_eq!(limits.per_second, 2);
        assert_eq!(limits.burst_size, 5);
    }
}
