//! Core request and outcome types for crafting-path search

use crate::path::RecipePath;
use crate::tree::TreeStats;
use elemental_graph::Item;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ulid::Ulid;

/// Unique search identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SearchId(pub Ulid);

impl SearchId {
    /// Generate new search ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SearchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SearchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How many paths a search returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Only the path with the fewest steps
    #[default]
    Shortest,
    /// Every distinct path up to the result budget
    All,
}

/// Frontier discipline of the expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    /// FIFO frontier
    #[default]
    BreadthFirst,
    /// LIFO frontier
    DepthFirst,
}

impl TraversalOrder {
    /// Short label used in logs
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::BreadthFirst => "bfs",
            Self::DepthFirst => "dfs",
        }
    }
}

/// One search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Item to craft
    pub target: Item,
    /// Shortest or all
    pub mode: SearchMode,
    /// Breadth- or depth-first expansion
    pub order: TraversalOrder,
    /// Result budget; zero is treated as one
    pub max_results: usize,
}

impl SearchRequest {
    /// Create request for the shortest breadth-first path
    #[must_use]
    pub fn new(target: impl Into<Item>) -> Self {
        Self {
            target: target.into(),
            mode: SearchMode::Shortest,
            order: TraversalOrder::BreadthFirst,
            max_results: 1,
        }
    }

    /// Create request from the flag form of the search entry point
    #[must_use]
    pub fn from_flags(
        target: impl Into<Item>,
        shortest_only: bool,
        breadth_first: bool,
        max_results: usize,
    ) -> Self {
        Self {
            target: target.into(),
            mode: if shortest_only {
                SearchMode::Shortest
            } else {
                SearchMode::All
            },
            order: if breadth_first {
                TraversalOrder::BreadthFirst
            } else {
                TraversalOrder::DepthFirst
            },
            max_results,
        }
    }

    /// With mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// With traversal order
    #[inline]
    #[must_use]
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    /// With result budget
    #[inline]
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Result budget, never zero
    #[inline]
    #[must_use]
    pub fn budget(&self) -> usize {
        self.max_results.max(1)
    }
}

/// A returned path with its tree statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPath {
    /// The path
    pub path: RecipePath,
    /// Statistics of its tree
    pub stats: TreeStats,
}

/// Result of a successful search
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Search identifier
    pub search_id: SearchId,
    /// Requested item
    pub target: Item,
    /// Returned paths, fewest steps first
    pub paths: Vec<RankedPath>,
    /// Node count of the shortest path, or summed over all returned paths
    pub total_node_count: usize,
    /// Distinct paths found before the shortest-mode cut
    pub found_count: usize,
    /// Items expanded while computing the closure
    pub expansion_visits: usize,
    /// Wall time of the whole search
    pub elapsed: Duration,
    /// RESOLVE stopped at the deadline; `paths` may be partial
    pub deadline_hit: bool,
}

impl SearchOutcome {
    /// Shortest returned path
    #[inline]
    #[must_use]
    pub fn shortest(&self) -> Option<&RecipePath> {
        self.paths.first().map(|ranked| &ranked.path)
    }

    /// Iterate returned paths
    pub fn iter_paths(&self) -> impl Iterator<Item = &RecipePath> {
        self.paths.iter().map(|ranked| &ranked.path)
    }

    /// Check if any path was found
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        !self.paths.is_empty()
    }
}
