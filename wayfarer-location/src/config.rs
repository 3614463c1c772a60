//! Resolver configuration.

use std::time::Duration;

use crate::{Accuracy, AccuracyTier};

const FIVE_MINUTES: Duration = Duration::from_secs(5 * 60);
const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_PERMISSION_PROMPT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_REVERSE_GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Placeholder used when reverse geocoding yields nothing.
pub const ADDRESS_UNAVAILABLE: &str = "address unavailable";

/// Progressive-accuracy tiers tried in order when no recent fix exists.
pub const DEFAULT_TIERS: [AccuracyTier; 3] = [
    AccuracyTier::new(Accuracy::Low, Duration::from_secs(10)),
    AccuracyTier::new(Accuracy::Balanced, Duration::from_secs(15)),
    AccuracyTier::new(Accuracy::High, Duration::from_secs(20)),
];

/// Configuration for [`crate::LocationResolver`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wayfarer_location::LocationResolverConfig;
///
/// let config = LocationResolverConfig::default().with_cache_ttl(Duration::from_secs(60));
/// assert_eq!(config.cache_ttl, Duration::from_secs(60));
/// assert_eq!(config.tiers.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LocationResolverConfig {
    /// How long a resolved location is served from cache.
    pub cache_ttl: Duration,
    /// Oldest last-known fix accepted by the fast path.
    pub last_known_max_age: Duration,
    /// Worst claimed accuracy, in metres, accepted by the fast path.
    pub last_known_max_accuracy_m: f64,
    /// Live tiers in the order they are tried.
    pub tiers: Vec<AccuracyTier>,
    /// Address reported when reverse geocoding fails.
    pub address_placeholder: String,
    /// Bound on the permission, service-enabled and last-known queries.
    pub query_timeout: Duration,
    /// Bound on the permission prompt; an unanswered prompt counts as denial.
    pub permission_prompt_timeout: Duration,
    /// Bound on reverse geocoding; a late address becomes the placeholder.
    pub reverse_geocode_timeout: Duration,
}

impl Default for LocationResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl: FIVE_MINUTES,
            last_known_max_age: FIVE_MINUTES,
            last_known_max_accuracy_m: 1_000.0,
            tiers: DEFAULT_TIERS.to_vec(),
            address_placeholder: ADDRESS_UNAVAILABLE.to_owned(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            permission_prompt_timeout: DEFAULT_PERMISSION_PROMPT_TIMEOUT,
            reverse_geocode_timeout: DEFAULT_REVERSE_GEOCODE_TIMEOUT,
        }
    }
}

impl LocationResolverConfig {
    /// Set the cache time-to-live.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the fast-path limits for last-known fixes.
    #[must_use]
    pub const fn with_last_known_limits(mut self, max_age: Duration, max_accuracy_m: f64) -> Self {
        self.last_known_max_age = max_age;
        self.last_known_max_accuracy_m = max_accuracy_m;
        self
    }

    /// Replace the live accuracy tiers.
    #[must_use]
    pub fn with_tiers(mut self, tiers: Vec<AccuracyTier>) -> Self {
        self.tiers = tiers;
        self
    }

    /// Set the placeholder address.
    #[must_use]
    pub fn with_address_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.address_placeholder = placeholder.into();
        self
    }

    /// Set the bounds on the status queries and on the permission prompt.
    #[must_use]
    pub const fn with_query_timeouts(mut self, query: Duration, permission_prompt: Duration) -> Self {
        self.query_timeout = query;
        self.permission_prompt_timeout = permission_prompt;
        self
    }

    /// Set the bound on reverse geocoding.
    #[must_use]
    pub const fn with_reverse_geocode_timeout(mut self, timeout: Duration) -> Self {
        self.reverse_geocode_timeout = timeout;
        self
    }

    /// Longest time the tiered search can take.
    #[must_use]
    pub fn worst_case_search(&self) -> Duration {
        self.tiers.iter().map(|tier| tier.timeout).sum()
    }

    /// Longest time a whole resolution can take: three status queries, one
    /// prompt, the tiered search and reverse geocoding.
    #[must_use]
    pub fn worst_case_resolve(&self) -> Duration {
        self.query_timeout * 3
            + self.permission_prompt_timeout
            + self.worst_case_search()
            + self.reverse_geocode_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_search_is_bounded_by_tier_timeouts() {
        assert_eq!(
            LocationResolverConfig::default().worst_case_search(),
            Duration::from_secs(45)
        );
    }

    #[rstest]
    fn builders_override_defaults() {
        let config = LocationResolverConfig::default()
            .with_last_known_limits(Duration::from_secs(30), 50.0)
            .with_tiers(vec![AccuracyTier::new(Accuracy::High, Duration::from_secs(5))])
            .with_address_placeholder("unknown");
        assert_eq!(config.last_known_max_age, Duration::from_secs(30));
        assert_eq!(config.last_known_max_accuracy_m, 50.0);
        assert_eq!(config.worst_case_search(), Duration::from_secs(5));
        assert_eq!(config.address_placeholder, "unknown");
    }

    #[rstest]
    fn whole_resolution_is_bounded() {
        let config = LocationResolverConfig::default()
            .with_query_timeouts(Duration::from_secs(2), Duration::from_secs(20))
            .with_reverse_geocode_timeout(Duration::from_secs(4));

        assert_eq!(config.worst_case_resolve(), Duration::from_secs(6 + 20 + 45 + 4));
    }
}
