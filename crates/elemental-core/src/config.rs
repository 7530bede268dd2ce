//! Engine configuration

use crate::error::ConfigError;
use crate::types::TraversalOrder;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which expansions enforce the tier rule
///
/// With the rule on, a combination is only recorded when the result's tier
/// is strictly greater than both ingredient tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierPolicy {
    /// Depth-first expansion is tier-checked, breadth-first is not
    #[default]
    ByTraversal,
    /// Always tier-checked
    Always,
    /// Never tier-checked
    Never,
}

impl TierPolicy {
    /// Whether an expansion in `order` checks tiers
    #[inline]
    #[must_use]
    pub fn is_checked(self, order: TraversalOrder) -> bool {
        match self {
            Self::ByTraversal => order == TraversalOrder::DepthFirst,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Search engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum resolve tasks in flight at once
    pub max_concurrent_resolvers: usize,
    /// Maximum plan items perturbed by alternative generation
    pub max_perturbed_items: usize,
    /// RESOLVE deadline in milliseconds (`None` = no deadline)
    pub deadline_ms: Option<u64>,
    /// Tier rule policy
    pub tier_policy: TierPolicy,
    /// Expand the full closure instead of stopping once the target is saturated
    pub exhaustive_expansion: bool,
}

impl SearchConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With max concurrent resolvers
    #[inline]
    #[must_use]
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrent_resolvers = max;
        self
    }

    /// With max perturbed items
    #[inline]
    #[must_use]
    pub fn with_max_perturbed_items(mut self, max: usize) -> Self {
        self.max_perturbed_items = max;
        self
    }

    /// With deadline
    #[inline]
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline_ms = deadline.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// With tier policy
    #[inline]
    #[must_use]
    pub fn with_tier_policy(mut self, policy: TierPolicy) -> Self {
        self.tier_policy = policy;
        self
    }

    /// With exhaustive expansion
    #[inline]
    #[must_use]
    pub fn with_exhaustive_expansion(mut self, exhaustive: bool) -> Self {
        self.exhaustive_expansion = exhaustive;
        self
    }

    /// RESOLVE deadline
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Validate configuration
    ///
    /// # Errors
    /// - `ConfigError::ZeroConcurrency` if no resolver could ever run
    /// - `ConfigError::ZeroPerturbation` if no item could be perturbed
    /// - `ConfigError::ZeroDeadline` if the deadline is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_resolvers == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.max_perturbed_items == 0 {
            return Err(ConfigError::ZeroPerturbation);
        }
        if self.deadline_ms == Some(0) {
            return Err(ConfigError::ZeroDeadline);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_resolvers: 3,
            max_perturbed_items: 3,
            deadline_ms: Some(30_000),
            tier_policy: TierPolicy::default(),
            exhaustive_expansion: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SearchConfig::new();
        assert_eq!(config.max_concurrent_resolvers, 3);
        assert_eq!(config.max_perturbed_items, 3);
        assert_eq!(config.deadline(), Some(Duration::from_secs(30)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn tier_policy_by_traversal() {
        let policy = TierPolicy::ByTraversal;
        assert!(policy.is_checked(TraversalOrder::DepthFirst));
        assert!(!policy.is_checked(TraversalOrder::BreadthFirst));
        assert!(TierPolicy::Always.is_checked(TraversalOrder::BreadthFirst));
        assert!(!TierPolicy::Never.is_checked(TraversalOrder::DepthFirst));
    }

    #[test]
    fn rejects_zero_limits() {
        assert_eq!(
            SearchConfig::new().with_max_concurrency(0).validate(),
            Err(ConfigError::ZeroConcurrency)
        );
        assert_eq!(
            SearchConfig::new().with_max_perturbed_items(0).validate(),
            Err(ConfigError::ZeroPerturbation)
        );
        assert_eq!(
            SearchConfig::new()
                .with_deadline(Some(Duration::ZERO))
                .validate(),
            Err(ConfigError::ZeroDeadline)
        );
    }

    #[test]
    fn deserializes_partial_json() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"max_concurrent_resolvers": 8, "tier_policy": "always"}"#)
                .unwrap();
        assert_eq!(config.max_concurrent_resolvers, 8);
        assert_eq!(config.tier_policy, TierPolicy::Always);
        assert_eq!(config.max_perturbed_items, 3);
    }
}
