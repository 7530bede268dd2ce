//! Crafting plans
//!
//! A [`CraftingPlan`] maps each item to exactly one chosen recipe step: a
//! flattened dependency DAG where shared sub-ingredients appear once.

use crate::expander::VariantTable;
use elemental_graph::{Item, RecipeStep};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Single-choice-per-item dependency map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CraftingPlan {
    steps: IndexMap<Item, RecipeStep>,
}

impl CraftingPlan {
    /// Create empty plan
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a top-level step into its canonical plan
    ///
    /// Every crafted ingredient is resolved through its first recorded
    /// variant. Ingredients without a variant stay unresolved; see
    /// [`CraftingPlan::unresolved`].
    #[must_use]
    pub fn canonical(top: RecipeStep, variants: &VariantTable) -> Self {
        let mut plan = Self::new();
        plan.resolve(vec![top], variants);
        plan
    }

    /// Chosen step for `item`
    #[inline]
    #[must_use]
    pub fn get(&self, item: &str) -> Option<&RecipeStep> {
        self.steps.get(item)
    }

    /// Check if `item` has a chosen step
    #[inline]
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.steps.contains_key(item)
    }

    /// Insert a step unless its result already has one
    pub fn insert(&mut self, step: RecipeStep) -> bool {
        if self.steps.contains_key(step.result()) {
            return false;
        }
        self.steps.insert(step.result().clone(), step);
        true
    }

    /// Replace the chosen step for the step's result
    pub fn replace(&mut self, step: RecipeStep) -> Option<RecipeStep> {
        self.steps.insert(step.result().clone(), step)
    }

    /// Number of chosen steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if plan is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate chosen steps in insertion order
    pub fn steps(&self) -> impl Iterator<Item = &RecipeStep> {
        self.steps.values()
    }

    /// Chosen steps as an order-free set
    #[must_use]
    pub fn step_set(&self) -> BTreeSet<RecipeStep> {
        self.steps.values().cloned().collect()
    }

    /// Drain a work stack into the plan
    ///
    /// Popped steps are inserted if their result is still absent, then each
    /// crafted ingredient not yet in the plan pushes its first variant.
    pub fn resolve(&mut self, mut stack: Vec<RecipeStep>, variants: &VariantTable) {
        while let Some(step) = stack.pop() {
            if self.contains(step.result()) {
                continue;
            }
            for ingredient in step.crafted_ingredients() {
                if self.contains(ingredient) {
                    continue;
                }
                if let Some(variant) = variants.first(ingredient) {
                    stack.push(variant.clone());
                }
            }
            self.insert(step);
        }
    }

    /// Crafted ingredients referenced by some step but without a chosen step
    #[must_use]
    pub fn unresolved(&self) -> BTreeSet<Item> {
        self.steps
            .values()
            .flat_map(RecipeStep::crafted_ingredients)
            .filter(|ingredient| !self.contains(ingredient))
            .cloned()
            .collect()
    }

    /// Drop steps the target no longer depends on
    pub fn retain_reachable(&mut self, target: &Item) {
        let mut reachable: HashSet<Item> = HashSet::new();
        let mut stack = vec![target.clone()];
        while let Some(item) = stack.pop() {
            let Some(step) = self.steps.get(&item) else {
                continue;
            };
            if !reachable.insert(item) {
                continue;
            }
            stack.extend(step.crafted_ingredients().cloned());
        }
        self.steps.retain(|item, _| reachable.contains(item));
    }

    /// Steps ordered so every ingredient is crafted before it is used
    ///
    /// Returns `None` if the chosen steps depend on each other in a cycle.
    #[must_use]
    pub fn topological_steps(&self) -> Option<Vec<RecipeStep>> {
        let order = self.dependency_order();
        (order.len() == self.steps.len()).then(|| self.collect_steps(order))
    }

    /// Steps in dependency order, cyclic ones last
    ///
    /// Steps blocked by a cycle follow the ordered ones in reverse plan
    /// order, so ingredients still tend to precede their consumers.
    #[must_use]
    pub fn ordered_steps(&self) -> Vec<RecipeStep> {
        let mut order = self.dependency_order();
        if order.len() < self.steps.len() {
            let placed: HashSet<&Item> = order.iter().copied().collect();
            let blocked: Vec<&Item> = self
                .steps
                .keys()
                .rev()
                .filter(|item| !placed.contains(item))
                .collect();
            order.extend(blocked);
        }
        self.collect_steps(order)
    }

    fn collect_steps(&self, order: Vec<&Item>) -> Vec<RecipeStep> {
        order
            .into_iter()
            .filter_map(|item| self.steps.get(item))
            .cloned()
            .collect()
    }

    /// Kahn's algorithm over the chosen steps; cyclic items are left out
    fn dependency_order(&self) -> Vec<&Item> {
        let mut pending: HashMap<&Item, usize> = HashMap::with_capacity(self.steps.len());
        let mut dependents: HashMap<&Item, Vec<&Item>> = HashMap::new();

        for (item, step) in &self.steps {
            let inputs: BTreeSet<&Item> = step
                .crafted_ingredients()
                .filter(|ingredient| self.contains(ingredient))
                .collect();
            pending.insert(item, inputs.len());
            for input in inputs {
                dependents.entry(input).or_default().push(item);
            }
        }

        let mut ready: VecDeque<&Item> = self
            .steps
            .keys()
            .filter(|item| pending.get(item) == Some(&0))
            .collect();
        let mut ordered = Vec::with_capacity(self.steps.len());

        while let Some(item) = ready.pop_front() {
            ordered.push(item);
            for dependent in dependents.get(item).into_iter().flatten() {
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(*dependent);
                    }
                }
            }
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lake_variants() -> VariantTable {
        let mut variants = VariantTable::new(2);
        variants.record(RecipeStep::new("Earth", "Water", "Mud"));
        variants.record(RecipeStep::new("Fire", "Water", "Steam"));
        variants.record(RecipeStep::new("Mud", "Steam", "Lake"));
        variants
    }

    #[test]
    fn canonical_lake_plan() {
        let plan = CraftingPlan::canonical(RecipeStep::new("Mud", "Steam", "Lake"), &lake_variants());

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.get("Mud"), Some(&RecipeStep::new("Earth", "Water", "Mud")));
        assert!(plan.unresolved().is_empty());

        let order = plan.topological_steps().unwrap();
        assert_eq!(order.last().map(RecipeStep::result), Some(&Item::from("Lake")));
    }

    #[test]
    fn missing_variant_left_unresolved() {
        let mut variants = VariantTable::new(1);
        variants.record(RecipeStep::new("Earth", "Water", "Mud"));
        let plan = CraftingPlan::canonical(RecipeStep::new("Mud", "Steam", "Lake"), &variants);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.unresolved(), BTreeSet::from([Item::from("Steam")]));
    }

    #[test]
    fn insert_keeps_first_choice() {
        let mut plan = CraftingPlan::new();
        assert!(plan.insert(RecipeStep::new("Earth", "Water", "Mud")));
        assert!(!plan.insert(RecipeStep::new("Earth", "Earth", "Mud")));
        assert_eq!(plan.get("Mud"), Some(&RecipeStep::new("Earth", "Water", "Mud")));

        let old = plan.replace(RecipeStep::new("Earth", "Earth", "Mud"));
        assert_eq!(old, Some(RecipeStep::new("Earth", "Water", "Mud")));
    }

    #[test]
    fn retain_reachable_prunes_orphans() {
        let mut plan = CraftingPlan::canonical(RecipeStep::new("Mud", "Steam", "Lake"), &lake_variants());
        plan.replace(RecipeStep::new("Mud", "Mud", "Lake"));
        plan.retain_reachable(&Item::from("Lake"));

        assert_eq!(plan.len(), 2);
        assert!(!plan.contains("Steam"));
    }

    #[test]
    fn cycle_has_no_topological_order() {
        let mut plan = CraftingPlan::new();
        plan.insert(RecipeStep::new("Stone", "Water", "Sand"));
        plan.insert(RecipeStep::new("Sand", "Fire", "Stone"));
        assert!(plan.topological_steps().is_none());
    }

    #[test]
    fn ordered_steps_keep_cyclic_steps_last() {
        let mut plan = CraftingPlan::new();
        plan.insert(RecipeStep::new("Lake", "Water", "Mud"));
        plan.insert(RecipeStep::new("Mud", "Steam", "Lake"));
        plan.insert(RecipeStep::new("Fire", "Water", "Steam"));

        assert!(plan.topological_steps().is_none());
        let steps = plan.ordered_steps();
        let results: Vec<&str> = steps.iter().map(|step| step.result().as_str()).collect();
        assert_eq!(results, ["Steam", "Lake", "Mud"]);
    }
}
