//! Reachability expansion
//!
//! Computes the craftable closure from the base items and records a bounded
//! list of recipe variants per item, in discovery order. Runs synchronously;
//! every step is an in-memory lookup against the shared graph.

use crate::types::TraversalOrder;
use elemental_graph::{Item, RecipeGraph, RecipeStep};
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashSet, VecDeque};

/// Bounded, discovery-ordered recipe variants per item
///
/// An entry never holds more than `cap` steps and never two steps with the
/// same unordered ingredient pair. Base items never get an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTable {
    variants: IndexMap<Item, Vec<RecipeStep>>,
    cap: usize,
}

impl VariantTable {
    /// Create empty table with a per-item cap (zero is treated as one)
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            variants: IndexMap::new(),
            cap: cap.max(1),
        }
    }

    /// Per-item cap
    #[inline]
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Record a variant for its result
    ///
    /// Returns `false` when the result is a base item, its list is full, or a
    /// variant with the same ingredient pair already exists.
    pub fn record(&mut self, step: RecipeStep) -> bool {
        if step.result().is_base() {
            return false;
        }
        let entry = self.variants.entry(step.result().clone()).or_default();
        if entry.len() >= self.cap || entry.iter().any(|known| known.pair() == step.pair()) {
            return false;
        }
        entry.push(step);
        true
    }

    /// Variants of `item`, in discovery order
    #[must_use]
    pub fn get(&self, item: &str) -> &[RecipeStep] {
        self.variants
            .get(item)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First recorded variant of `item`
    #[inline]
    #[must_use]
    pub fn first(&self, item: &str) -> Option<&RecipeStep> {
        self.get(item).first()
    }

    /// Check if the variant list of `item` reached the cap
    #[inline]
    #[must_use]
    pub fn is_full(&self, item: &str) -> bool {
        self.get(item).len() >= self.cap
    }

    /// Items with at least one variant, in discovery order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.variants.keys()
    }

    /// Total recorded variants
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.values().map(Vec::len).sum()
    }
}

/// Expansion parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Frontier discipline
    pub order: TraversalOrder,
    /// Require result tier above both ingredient tiers
    pub tier_checked: bool,
    /// Variant cap per item
    pub max_variants: usize,
    /// Keep expanding after the target's variant list fills
    pub exhaustive: bool,
}

impl ExpansionOptions {
    /// Create options for breadth-first, unchecked expansion
    #[must_use]
    pub fn new(max_variants: usize) -> Self {
        Self {
            order: TraversalOrder::BreadthFirst,
            tier_checked: false,
            max_variants,
            exhaustive: false,
        }
    }

    /// With traversal order
    #[inline]
    #[must_use]
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    /// With tier checking
    #[inline]
    #[must_use]
    pub fn with_tier_check(mut self, tier_checked: bool) -> Self {
        self.tier_checked = tier_checked;
        self
    }

    /// With exhaustive expansion
    #[inline]
    #[must_use]
    pub fn with_exhaustive(mut self, exhaustive: bool) -> Self {
        self.exhaustive = exhaustive;
        self
    }
}

/// Expansion result
#[derive(Debug, Clone)]
pub struct Expansion {
    /// Target became craftable
    pub found: bool,
    /// Recorded variants
    pub variants: VariantTable,
    /// Frontier pops, diagnostic only
    pub visits: usize,
    /// Craftable items known when expansion stopped (base items included)
    pub craftable: usize,
}

/// Expand the craftable closure toward `target`
///
/// Stops when the frontier empties or, unless `exhaustive` is set, as soon as
/// the target's variant list is full. The craftable set may then be a strict
/// subset of the full closure.
#[must_use]
pub fn expand(graph: &RecipeGraph, target: &Item, options: &ExpansionOptions) -> Expansion {
    Expander::new(graph, target, options).run()
}

struct Expander<'g> {
    graph: &'g RecipeGraph,
    target: &'g Item,
    options: &'g ExpansionOptions,
    craftable: IndexSet<Item>,
    visited: HashSet<Item>,
    frontier: VecDeque<Item>,
    variants: VariantTable,
    visits: usize,
}

impl<'g> Expander<'g> {
    fn new(graph: &'g RecipeGraph, target: &'g Item, options: &'g ExpansionOptions) -> Self {
        let base = Item::base_items();
        Self {
            graph,
            target,
            options,
            craftable: base.iter().cloned().collect(),
            visited: HashSet::new(),
            frontier: base.into_iter().collect(),
            variants: VariantTable::new(options.max_variants),
            visits: 0,
        }
    }

    fn pop(&mut self) -> Option<Item> {
        match self.options.order {
            TraversalOrder::BreadthFirst => self.frontier.pop_front(),
            TraversalOrder::DepthFirst => self.frontier.pop_back(),
        }
    }

    fn saturated(&self) -> bool {
        !self.options.exhaustive && self.variants.is_full(self.target)
    }

    fn run(mut self) -> Expansion {
        while !self.saturated() {
            let Some(current) = self.pop() else {
                break;
            };
            self.visits += 1;
            if !self.visited.insert(current.clone()) {
                continue;
            }
            self.combine(&current);
        }

        let found = self.craftable.contains(self.target);
        tracing::debug!(
            item = %self.target,
            found,
            visits = self.visits,
            craftable = self.craftable.len(),
            variants = self.variants.variant_count(),
            "expansion finished"
        );

        Expansion {
            found,
            visits: self.visits,
            craftable: self.craftable.len(),
            variants: self.variants,
        }
    }

    /// Combine `current` with every item craftable before this step
    fn combine(&mut self, current: &Item) {
        let graph = self.graph;
        let known = self.craftable.len();

        for index in 0..known {
            let Some(ingredient) = self.craftable.get_index(index).cloned() else {
                break;
            };
            for result in graph.results_of(current, &ingredient) {
                if result.is_base() || !self.tier_allows(result, current, &ingredient) {
                    continue;
                }
                self.variants
                    .record(RecipeStep::new(current.clone(), ingredient.clone(), result.clone()));
                if self.craftable.insert(result.clone()) {
                    self.frontier.push_back(result.clone());
                }
            }
        }
    }

    fn tier_allows(&self, result: &Item, a: &Item, b: &Item) -> bool {
        if !self.options.tier_checked {
            return true;
        }
        let tier = self.graph.tier(result);
        tier > self.graph.tier(a) && tier > self.graph.tier(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elemental_graph::RecipeRecord;
    use elemental_test_utils::fixtures;

    #[test]
    fn lake_breadth_first() {
        let graph = fixtures::four_element_graph();
        let target = Item::from("Lake");
        let expansion = expand(&graph, &target, &ExpansionOptions::new(1));

        assert!(expansion.found);
        assert_eq!(
            expansion.variants.first("Lake"),
            Some(&RecipeStep::new("Mud", "Steam", "Lake"))
        );
        assert_eq!(
            expansion.variants.first("Mud"),
            Some(&RecipeStep::new("Earth", "Water", "Mud"))
        );
        assert!(expansion.visits > 0);
    }

    #[test]
    fn unreachable_target_reports_visits() {
        let graph = fixtures::four_element_graph();
        let target = Item::from("Unicorn");
        let expansion = expand(&graph, &target, &ExpansionOptions::new(3));

        assert!(!expansion.found);
        assert!(expansion.visits >= 4);
        assert_eq!(expansion.craftable, 7);
    }

    #[test]
    fn depth_first_with_tiers() {
        let graph = fixtures::four_element_graph();
        let target = Item::from("Lake");
        let options = ExpansionOptions::new(1)
            .with_order(TraversalOrder::DepthFirst)
            .with_tier_check(true);
        assert!(expand(&graph, &target, &options).found);
    }

    #[test]
    fn tier_check_discards_regressions() {
        // Lake + Water = Mud would regress from tier 2 back to tier 1
        let graph = RecipeGraph::from_records(vec![
            RecipeRecord::new("Mud", 1, ["Earth", "Water"]),
            RecipeRecord::new("Steam", 1, ["Fire", "Water"]),
            RecipeRecord::new("Lake", 2, ["Mud", "Steam"]),
            RecipeRecord::new("Mud", 1, ["Lake", "Water"]),
        ]);
        let target = Item::from("Mud");
        let options = ExpansionOptions::new(5)
            .with_tier_check(true)
            .with_exhaustive(true);
        let expansion = expand(&graph, &target, &options);

        assert_eq!(expansion.variants.get("Mud").len(), 1);

        let unchecked = expand(&graph, &target, &options.with_tier_check(false));
        assert_eq!(unchecked.variants.get("Mud").len(), 2);
    }

    #[test]
    fn variant_cap_and_pair_dedup() {
        let mut table = VariantTable::new(2);
        assert!(table.record(RecipeStep::new("Earth", "Water", "Mud")));
        assert!(!table.record(RecipeStep::new("Water", "Earth", "Mud")));
        assert!(table.record(RecipeStep::new("Earth", "Earth", "Mud")));
        assert!(!table.record(RecipeStep::new("Air", "Earth", "Mud")));
        assert!(!table.record(RecipeStep::new("Air", "Air", "Fire")));

        assert!(table.is_full("Mud"));
        assert_eq!(table.get("Mud").len(), 2);
        assert!(table.get("Fire").is_empty());
    }

    #[test]
    fn early_exit_stops_before_full_closure() {
        let graph = fixtures::branching_graph();
        let target = Item::from("Mud");
        let early = expand(&graph, &target, &ExpansionOptions::new(1));
        let full = expand(
            &graph,
            &target,
            &ExpansionOptions::new(1).with_exhaustive(true),
        );

        assert!(early.found && full.found);
        assert!(early.craftable < full.craftable);
    }
}
