//! Configuration for resolving dereferenceable content states

use std::env;
use std::time::Duration;

/// Accept header sent when fetching a referenced resource
pub const DEFAULT_ACCEPT: &str =
    "application/ld+json;profile=\"http://iiif.io/api/presentation/3/context.json\", application/json;q=0.9";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Request timeout. `None` leaves timing out to the caller.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    pub accept: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            timeout: None,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Build a config from `IIIF_RESOLVER_*` variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = ResolverConfig::default();
        ResolverConfig {
            timeout: env::var("IIIF_RESOLVER_TIMEOUT_SECS")
                .ok()
                .and_then(|secs| secs.parse().ok())
                .map(Duration::from_secs),
            user_agent: env::var("IIIF_RESOLVER_USER_AGENT").unwrap_or(defaults.user_agent),
            accept: env::var("IIIF_RESOLVER_ACCEPT").unwrap_or(defaults.accept),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
