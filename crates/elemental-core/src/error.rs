//! Error types for the search engine
//!
//! Provides error handling for:
//! - Unreachable targets (typed not-found, never a crash)
//! - Cancelled searches
//! - RESOLVE phases where every task faulted
//! - Invalid engine configuration

use elemental_graph::Item;

/// Main search error type
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Target never became craftable from the base items
    #[error("no recipes found: {target} is not craftable from base items")]
    UnreachableTarget {
        /// Requested item
        target: Item,
        /// Items expanded before giving up
        visits: usize,
    },

    /// Search was cancelled by the caller
    #[error("search cancelled")]
    Cancelled,

    /// Every resolve task faulted, so no path survived
    #[error("all {faulted} resolve tasks failed")]
    ResolveFailed {
        /// Number of faulted tasks
        faulted: usize,
    },

    /// Engine configuration rejected
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl SearchError {
    /// Check if this is the not-found outcome
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnreachableTarget { .. })
    }

    /// Create not-found error
    #[inline]
    pub fn unreachable(target: impl Into<Item>, visits: usize) -> Self {
        Self::UnreachableTarget {
            target: target.into(),
            visits,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Admission gate would never admit a task
    #[error("max_concurrent_resolvers must be at least 1")]
    ZeroConcurrency,

    /// Alternative generation could never perturb anything
    #[error("max_perturbed_items must be at least 1")]
    ZeroPerturbation,

    /// Deadline of zero would cancel every search immediately
    #[error("deadline_ms must be positive when set")]
    ZeroDeadline,
}
