//! Rate limiting for the room endpoints
//!
//! GCRA via tower_governor, keyed by peer IP. Requires serving with
//! `into_make_service_with_connect_info::<SocketAddr>()` so the key
//! extractor can see the remote address.

use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config keyed by peer IP, with X-RateLimit-* headers
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Replenish interval: one request allowed per this many seconds
    pub per_second: u64,
    /// Burst size (requests that can be made immediately)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 2,
            burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    /// Tight limits for room creation
    pub fn strict() -> Self {
        Self {
            per_second: 4,
            burst_size: 2,
        }
    }
}

/// Build the governor config for the router layer
pub fn create_governor_config(config: &RateLimitConfig) -> Arc<DefaultGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.per_second)
            .burst_size(config.burst_size)
            .use_headers()
            .finish()
            .expect("valid governor configuration"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_allows_small_bursts() {
        let config = RateLimitConfig::default();
        assert_eq!(config.per_second, 2);
        assert_eq!(config.burst_size, 5);
    }

    #[test]
    fn strict_config_is_tighter() {
        let config = RateLimitConfig::strict();
        assert!(config.per_second >= RateLimitConfig::default().per_second);
        assert!(config.burst_size <= RateLimitConfig::default().burst_size);
    }

    #[test]
    fn governor_config_builds() {
        let governor = create_governor_config(&RateLimitConfig::default());
        assert!(Arc::strong_count(&governor) > 0);
    }
}
