//! Path selection
//!
//! Merges the candidates of every resolve task: stable sort by step count,
//! dedup by step set, truncate, then compute tree statistics.

use crate::path::RecipePath;
use crate::tree::TreeStats;
use crate::types::{RankedPath, SearchMode};
use elemental_graph::RecipeStep;
use std::collections::{BTreeSet, HashSet};

/// Selected paths with their diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Surfaced paths, fewest steps first
    pub paths: Vec<RankedPath>,
    /// Node count summed over surfaced paths
    pub total_node_count: usize,
    /// Distinct paths kept before the shortest-mode cut
    pub found_count: usize,
}

/// Select the surfaced paths from all candidates
///
/// Candidates must arrive in a deterministic order; ties in step count keep
/// that order, and the first of several equal step sets wins.
#[must_use]
pub fn select(candidates: Vec<RecipePath>, mode: SearchMode, max_results: usize, visits: usize) -> Selection {
    let mut candidates = candidates;
    candidates.sort_by_key(RecipePath::step_count);

    let mut seen: HashSet<BTreeSet<RecipeStep>> = HashSet::with_capacity(candidates.len());
    let mut kept: Vec<RecipePath> = candidates
        .into_iter()
        .filter(|path| seen.insert(path.step_set()))
        .collect();
    kept.truncate(max_results.max(1));

    let found_count = kept.len();
    if mode == SearchMode::Shortest {
        kept.truncate(1);
    }

    let paths: Vec<RankedPath> = kept
        .into_iter()
        .map(|path| {
            let stats = TreeStats::of(path.tree()).with_visits(visits);
            RankedPath { path, stats }
        })
        .collect();
    let total_node_count = paths.iter().map(|ranked| ranked.stats.node_count).sum();

    Selection {
        paths,
        total_node_count,
        found_count,
    }
}
