//! Search engine
//!
//! Drives one search through its three phases, with no backtracking:
//! - EXPAND: single-threaded reachability and variant discovery
//! - RESOLVE: canonical plan plus alternatives per top-level variant, the
//!   only concurrent phase
//! - SELECT: single-threaded merge, dedup, sort, truncate and statistics

use crate::cancel::{CancelFlag, CancelReason};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::expander::{expand, ExpansionOptions};
use crate::path::RecipePath;
use crate::pool::{ResolveContext, ResolvePool};
use crate::selector::{select, Selection};
use crate::types::{SearchId, SearchOutcome, SearchRequest};
use elemental_graph::{Item, RecipeGraph, RecipeStep};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Crafting-path search engine
///
/// Owns an immutable graph shared by every search it runs. Reloading means
/// building a new engine around a new graph.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    graph: Arc<RecipeGraph>,
    config: SearchConfig,
    pool: ResolvePool,
}

impl SearchEngine {
    /// Create engine
    ///
    /// # Errors
    /// - `SearchError::InvalidConfig` if `config` fails validation
    pub fn new(graph: Arc<RecipeGraph>, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            pool: ResolvePool::new(config.max_concurrent_resolvers),
            graph,
            config,
        })
    }

    /// Create engine with default configuration
    #[must_use]
    pub fn with_defaults(graph: Arc<RecipeGraph>) -> Self {
        let config = SearchConfig::default();
        Self {
            pool: ResolvePool::new(config.max_concurrent_resolvers),
            graph,
            config,
        }
    }

    /// Get graph
    #[inline]
    #[must_use]
    pub fn graph(&self) -> &Arc<RecipeGraph> {
        &self.graph
    }

    /// Get config
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for crafting paths to `request.target`
    ///
    /// # Errors
    /// - `SearchError::UnreachableTarget` if no path exists
    /// - `SearchError::ResolveFailed` if every resolve task faulted
    pub async fn search(&self, request: SearchRequest) -> Result<SearchOutcome, SearchError> {
        self.search_with_cancel(request, CancelFlag::new()).await
    }

    /// Search with a caller-held cancel flag
    ///
    /// The flag belongs to this search alone; the engine trips it itself
    /// when the configured deadline expires.
    ///
    /// # Workflow
    /// 1. Short-circuit base items and items no recipe produces
    /// 2. Expand the craftable closure and record variants
    /// 3. Resolve each top-level variant concurrently
    /// 4. Select, dedup and rank
    ///
    /// # Errors
    /// - `SearchError::UnreachableTarget` if no path exists
    /// - `SearchError::Cancelled` if `cancel` was tripped by the caller
    /// - `SearchError::ResolveFailed` if every resolve task faulted
    pub async fn search_with_cancel(
        &self,
        request: SearchRequest,
        cancel: CancelFlag,
    ) -> Result<SearchOutcome, SearchError> {
        let search_id = SearchId::new();
        let span = tracing::info_span!(
            "search",
            id = %search_id,
            item = %request.target,
            order = request.order.label(),
        );
        self.run(search_id, request, cancel).instrument(span).await
    }

    async fn run(
        &self,
        search_id: SearchId,
        request: SearchRequest,
        cancel: CancelFlag,
    ) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();
        let target = request.target.clone();
        let budget = request.budget();
        tracing::info!("Searching for {} ({:?}, max {})", target, request.mode, budget);

        if target.is_base() {
            let selection = select(vec![RecipePath::trivial(&target)], request.mode, budget, 0);
            return Ok(Self::outcome(search_id, target, selection, 0, started, false));
        }
        if !self.graph.contains_result(&target) {
            tracing::info!("No recipe produces {}", target);
            return Err(SearchError::unreachable(target, 0));
        }
        if cancel.reason() == Some(CancelReason::Cancelled) {
            return Err(SearchError::Cancelled);
        }

        // EXPAND
        let options = ExpansionOptions::new(budget)
            .with_order(request.order)
            .with_tier_check(self.config.tier_policy.is_checked(request.order))
            .with_exhaustive(self.config.exhaustive_expansion);
        let expansion = expand(&self.graph, &target, &options);
        if !expansion.found {
            tracing::info!("{} not craftable after {} visits", target, expansion.visits);
            return Err(SearchError::unreachable(target, expansion.visits));
        }

        // RESOLVE
        let jobs: Vec<RecipeStep> = expansion
            .variants
            .get(&target)
            .iter()
            .take(budget)
            .cloned()
            .collect();
        tracing::debug!("Resolving {} top-level variants", jobs.len());
        let context = Arc::new(ResolveContext {
            graph: Arc::clone(&self.graph),
            target: target.clone(),
            variants: expansion.variants,
            max_candidates: self.config.max_perturbed_items,
            budget,
            cancel: cancel.clone(),
        });
        let report = self
            .pool
            .run(jobs, &cancel, self.config.deadline(), move |top| context.resolve(top))
            .await;

        if cancel.reason() == Some(CancelReason::Cancelled) {
            tracing::info!("Search cancelled");
            return Err(SearchError::Cancelled);
        }
        if report.dispatched > 0 && report.faulted == report.dispatched {
            return Err(SearchError::ResolveFailed {
                faulted: report.faulted,
            });
        }
        let deadline_hit = report.deadline_hit;

        // SELECT
        let selection = select(report.into_candidates(), request.mode, budget, expansion.visits);
        if selection.paths.is_empty() {
            return Err(SearchError::unreachable(target, expansion.visits));
        }
        for warning in selection.paths.iter().flat_map(|ranked| ranked.path.warnings()) {
            tracing::warn!("Partial path for {}: {}", target, warning);
        }

        tracing::info!(
            "Found {} paths for {} ({} nodes) in {:?}",
            selection.found_count,
            target,
            selection.total_node_count,
            started.elapsed()
        );
        Ok(Self::outcome(
            search_id,
            target,
            selection,
            expansion.visits,
            started,
            deadline_hit,
        ))
    }

    fn outcome(
        search_id: SearchId,
        target: Item,
        selection: Selection,
        visits: usize,
        started: Instant,
        deadline_hit: bool,
    ) -> SearchOutcome {
        SearchOutcome {
            search_id,
            target,
            paths: selection.paths,
            total_node_count: selection.total_node_count,
            found_count: selection.found_count,
            expansion_visits: visits,
            elapsed: started.elapsed(),
            deadline_hit,
        }
    }
}
