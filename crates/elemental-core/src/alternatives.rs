//! Alternative path generation
//!
//! Perturbs one canonical plan by substituting other recorded variants for
//! items that have them, without rerunning the expander. Lower tiers are
//! perturbed first; single substitutions are emitted before pairs.

use crate::cancel::CancelFlag;
use crate::expander::VariantTable;
use crate::path::RecipePath;
use crate::plan::CraftingPlan;
use elemental_graph::{Item, RecipeGraph, RecipeStep, Tier};
use std::collections::{BTreeSet, HashSet};

/// One perturbable plan item
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    item: Item,
    tier: Tier,
    alternatives: Vec<RecipeStep>,
}

/// Generates up to `budget` paths from one canonical plan
#[derive(Debug, Clone, Copy)]
pub struct AlternativeGenerator<'a> {
    target: &'a Item,
    graph: &'a RecipeGraph,
    variants: &'a VariantTable,
    max_candidates: usize,
}

impl<'a> AlternativeGenerator<'a> {
    /// Create generator
    #[must_use]
    pub fn new(target: &'a Item, graph: &'a RecipeGraph, variants: &'a VariantTable) -> Self {
        Self {
            target,
            graph,
            variants,
            max_candidates: 3,
        }
    }

    /// With candidate cap (zero is treated as one)
    #[inline]
    #[must_use]
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max.max(1);
        self
    }

    /// Emit the canonical path, then single and pairwise substitutions
    ///
    /// Stops at `budget` paths or once `cancel` trips. Plans repeating an
    /// earlier step set are skipped without using budget; cyclic plans are
    /// emitted with a warning.
    #[must_use]
    pub fn generate(&self, canonical: &CraftingPlan, budget: usize, cancel: &CancelFlag) -> Vec<RecipePath> {
        let mut emitter = Emitter::new(self.target, budget);
        emitter.emit(canonical);

        let candidates = self.candidates(canonical);
        tracing::trace!(
            item = %self.target,
            candidates = candidates.len(),
            "perturbing canonical plan"
        );

        for candidate in &candidates {
            for alternative in &candidate.alternatives {
                if emitter.is_full() || cancel.is_cancelled() {
                    return emitter.finish();
                }
                emitter.emit(&self.substitute(canonical, &[alternative]));
            }
        }

        for (index, first) in candidates.iter().enumerate() {
            for second in &candidates[index + 1..] {
                for a in &first.alternatives {
                    for b in &second.alternatives {
                        if emitter.is_full() || cancel.is_cancelled() {
                            return emitter.finish();
                        }
                        emitter.emit(&self.substitute(canonical, &[a, b]));
                    }
                }
            }
        }

        emitter.finish()
    }

    /// Plan items with alternatives, lowest tier first, capped
    fn candidates(&self, plan: &CraftingPlan) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = plan
            .steps()
            .filter(|chosen| chosen.result() != self.target)
            .filter_map(|chosen| {
                let alternatives: Vec<RecipeStep> = self
                    .variants
                    .get(chosen.result())
                    .iter()
                    .filter(|variant| variant.pair() != chosen.pair())
                    .cloned()
                    .collect();
                (!alternatives.is_empty()).then(|| Candidate {
                    item: chosen.result().clone(),
                    tier: self.graph.tier(chosen.result()),
                    alternatives,
                })
            })
            .collect();

        candidates.sort_by(|a, b| a.tier.cmp(&b.tier).then_with(|| a.item.cmp(&b.item)));
        candidates.truncate(self.max_candidates);
        candidates
    }

    /// Clone the plan, swap in `replacements`, then repair and prune
    fn substitute(&self, base: &CraftingPlan, replacements: &[&RecipeStep]) -> CraftingPlan {
        let mut plan = base.clone();
        let mut stack = Vec::new();
        for step in replacements {
            plan.replace((*step).clone());
            stack.extend(
                step.crafted_ingredients()
                    .filter(|ingredient| !plan.contains(ingredient))
                    .filter_map(|ingredient| self.variants.first(ingredient))
                    .cloned(),
            );
        }
        plan.resolve(stack, self.variants);
        plan.retain_reachable(self.target);
        plan
    }
}

/// Collects emitted paths, skipping repeats
struct Emitter<'a> {
    target: &'a Item,
    budget: usize,
    seen: HashSet<BTreeSet<RecipeStep>>,
    paths: Vec<RecipePath>,
}

impl<'a> Emitter<'a> {
    fn new(target: &'a Item, budget: usize) -> Self {
        Self {
            target,
            budget: budget.max(1),
            seen: HashSet::new(),
            paths: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.paths.len() >= self.budget
    }

    fn emit(&mut self, plan: &CraftingPlan) {
        if self.is_full() || !self.seen.insert(plan.step_set()) {
            return;
        }
        self.paths.push(RecipePath::from_plan(self.target, plan));
    }

    fn finish(self) -> Vec<RecipePath> {
        self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::{expand, ExpansionOptions};
    use elemental_graph::RecipeRecord;
    use elemental_test_utils::fixtures;
    use pretty_assertions::assert_eq;

    /// P1..P4 at tiers 1..4, each with one alternative swapping a base ingredient
    const CHAIN: [(&str, u32, [&str; 2]); 9] = [
        ("P1", 1, ["Air", "Earth"]),
        ("P1", 1, ["Air", "Fire"]),
        ("P2", 2, ["P1", "Air"]),
        ("P2", 2, ["P1", "Earth"]),
        ("P3", 3, ["P2", "Air"]),
        ("P3", 3, ["P2", "Earth"]),
        ("P4", 4, ["P3", "Air"]),
        ("P4", 4, ["P3", "Earth"]),
        ("Top", 5, ["P4", "Air"]),
    ];

    fn chain() -> (RecipeGraph, VariantTable) {
        let graph = RecipeGraph::from_records(
            CHAIN
                .iter()
                .map(|(result, tier, pair)| RecipeRecord::new(result, *tier, *pair)),
        );
        let mut variants = VariantTable::new(2);
        for (result, _, [a, b]) in CHAIN {
            variants.record(RecipeStep::new(a, b, result));
        }
        (graph, variants)
    }

    /// Items whose step differs from the canonical plan, joined with `+`
    fn perturbed(canonical: &CraftingPlan, paths: &[RecipePath]) -> Vec<String> {
        paths
            .iter()
            .map(|path| {
                let mut items: Vec<&str> = path
                    .steps()
                    .iter()
                    .filter(|step| canonical.get(step.result()) != Some(*step))
                    .map(|step| step.result().as_str())
                    .collect();
                items.sort_unstable();
                items.join("+")
            })
            .collect()
    }

    fn canonical_for(target: &Item, variants: &VariantTable) -> CraftingPlan {
        let top = variants.first(target).cloned().unwrap();
        CraftingPlan::canonical(top, variants)
    }

    #[test]
    fn canonical_emitted_first() {
        let graph = fixtures::branching_graph();
        let target = Item::from("Brick");
        let expansion = expand(&graph, &target, &ExpansionOptions::new(4).with_exhaustive(true));
        let canonical = canonical_for(&target, &expansion.variants);

        let paths = AlternativeGenerator::new(&target, &graph, &expansion.variants)
            .generate(&canonical, 10, &CancelFlag::new());

        assert!(!paths.is_empty());
        assert_eq!(paths[0].step_set(), canonical.step_set());
    }

    #[test]
    fn respects_budget_and_dedups() {
        let graph = fixtures::branching_graph();
        let target = Item::from("House");
        let expansion = expand(&graph, &target, &ExpansionOptions::new(4).with_exhaustive(true));
        let canonical = canonical_for(&target, &expansion.variants);
        let generator = AlternativeGenerator::new(&target, &graph, &expansion.variants);

        for budget in 1..6 {
            let paths = generator.generate(&canonical, budget, &CancelFlag::new());
            assert!(paths.len() <= budget);
            let distinct: HashSet<_> = paths.iter().map(RecipePath::step_set).collect();
            assert_eq!(distinct.len(), paths.len());
        }
    }

    #[test]
    fn alternatives_are_repaired() {
        let graph = fixtures::branching_graph();
        let target = Item::from("House");
        let expansion = expand(&graph, &target, &ExpansionOptions::new(4).with_exhaustive(true));
        let canonical = canonical_for(&target, &expansion.variants);

        let paths = AlternativeGenerator::new(&target, &graph, &expansion.variants)
            .generate(&canonical, 20, &CancelFlag::new());

        assert!(paths.len() > 1);
        for path in &paths {
            let produced: HashSet<&Item> = path.steps().iter().map(RecipeStep::result).collect();
            for step in path.steps() {
                for ingredient in step.crafted_ingredients() {
                    assert!(produced.contains(ingredient), "{ingredient} dangling in {step}");
                }
            }
        }
    }

    #[test]
    fn target_is_never_perturbed() {
        let graph = fixtures::branching_graph();
        let target = Item::from("Brick");
        let expansion = expand(&graph, &target, &ExpansionOptions::new(4).with_exhaustive(true));
        let canonical = canonical_for(&target, &expansion.variants);
        let top = canonical.get("Brick").cloned();

        let paths = AlternativeGenerator::new(&target, &graph, &expansion.variants)
            .generate(&canonical, 20, &CancelFlag::new());
        for path in &paths {
            assert!(path.steps().iter().any(|step| Some(step) == top.as_ref()));
        }
    }

    #[test]
    fn cancelled_emits_only_canonical() {
        let graph = fixtures::branching_graph();
        let target = Item::from("House");
        let expansion = expand(&graph, &target, &ExpansionOptions::new(4).with_exhaustive(true));
        let canonical = canonical_for(&target, &expansion.variants);
        let cancel = CancelFlag::new();
        cancel.cancel();

        let paths = AlternativeGenerator::new(&target, &graph, &expansion.variants)
            .generate(&canonical, 20, &cancel);
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn singles_by_tier_then_pairs() {
        let (graph, variants) = chain();
        let target = Item::from("Top");
        let canonical = canonical_for(&target, &variants);
        assert_eq!(canonical.len(), 5);

        let paths = AlternativeGenerator::new(&target, &graph, &variants)
            .generate(&canonical, 10, &CancelFlag::new());

        assert_eq!(
            perturbed(&canonical, &paths),
            ["", "P1", "P2", "P3", "P1+P2", "P1+P3", "P2+P3"]
        );
    }

    #[test]
    fn candidate_cap_is_configurable() {
        let (graph, variants) = chain();
        let target = Item::from("Top");
        let canonical = canonical_for(&target, &variants);

        let paths = AlternativeGenerator::new(&target, &graph, &variants)
            .with_max_candidates(4)
            .generate(&canonical, 20, &CancelFlag::new());

        let labels = perturbed(&canonical, &paths);
        assert_eq!(labels.len(), 11);
        assert_eq!(labels[4], "P4");
        assert_eq!(labels[10], "P3+P4");
    }

    #[test]
    fn budget_cuts_pairs_first() {
        let (graph, variants) = chain();
        let target = Item::from("Top");
        let canonical = canonical_for(&target, &variants);

        let paths = AlternativeGenerator::new(&target, &graph, &variants)
            .generate(&canonical, 5, &CancelFlag::new());
        assert_eq!(perturbed(&canonical, &paths), ["", "P1", "P2", "P3", "P1+P2"]);
    }
}
