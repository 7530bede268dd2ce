//! Recipe paths
//!
//! A [`RecipePath`] is one complete answer: the steps used, ordered so every
//! ingredient is crafted before it is consumed, plus the ingredient tree.

use crate::plan::CraftingPlan;
use crate::tree::IngredientNode;
use elemental_graph::{Item, RecipeStep};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Non-fatal gap in a path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathWarning {
    /// A chosen step uses an ingredient with no recorded variant
    IncompleteDependency {
        /// Ingredient left unresolved
        item: Item,
    },
    /// A chosen step depends on its own result, directly or through others
    CyclicDependency {
        /// Item the cycle guard cut off
        item: Item,
    },
}

impl fmt::Display for PathWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteDependency { item } => {
                write!(f, "no recorded recipe for ingredient {item}")
            }
            Self::CyclicDependency { item } => {
                write!(f, "recipe for {item} depends on itself")
            }
        }
    }
}

/// One crafting path for a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipePath {
    target: Item,
    steps: Vec<RecipeStep>,
    tree: IngredientNode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<PathWarning>,
}

impl RecipePath {
    /// Create path from a plan
    ///
    /// Unresolved ingredients and items cut off by the tree's cycle guard
    /// are reported as warnings; the path itself is always produced.
    #[must_use]
    pub fn from_plan(target: &Item, plan: &CraftingPlan) -> Self {
        let tree = IngredientNode::build(target, plan);
        let warnings = plan
            .unresolved()
            .into_iter()
            .map(|item| PathWarning::IncompleteDependency { item })
            .chain(
                tree.cycle_items()
                    .into_iter()
                    .map(|item| PathWarning::CyclicDependency { item }),
            )
            .collect();

        Self {
            target: target.clone(),
            steps: plan.ordered_steps(),
            tree,
            warnings,
        }
    }

    /// Create the zero-step path of a base item
    #[must_use]
    pub fn trivial(target: &Item) -> Self {
        Self {
            target: target.clone(),
            steps: Vec::new(),
            tree: IngredientNode::build(target, &CraftingPlan::new()),
            warnings: Vec::new(),
        }
    }

    /// Target item
    #[inline]
    #[must_use]
    pub fn target(&self) -> &Item {
        &self.target
    }

    /// Steps, ingredients before their consumers
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[RecipeStep] {
        &self.steps
    }

    /// Number of combination steps
    #[inline]
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Ingredient tree
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &IngredientNode {
        &self.tree
    }

    /// Warnings
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[PathWarning] {
        &self.warnings
    }

    /// Check if every crafted ingredient is resolved and no step is cyclic
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Steps as an order-free set; two paths are the same iff these match
    #[must_use]
    pub fn step_set(&self) -> BTreeSet<RecipeStep> {
        self.steps.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::VariantTable;
    use crate::tree::NodeKind;

    #[test]
    fn lake_path_orders_ingredients_first() {
        let mut variants = VariantTable::new(1);
        variants.record(RecipeStep::new("Earth", "Water", "Mud"));
        variants.record(RecipeStep::new("Fire", "Water", "Steam"));
        let plan = CraftingPlan::canonical(RecipeStep::new("Mud", "Steam", "Lake"), &variants);

        let path = RecipePath::from_plan(&Item::from("Lake"), &plan);
        assert_eq!(path.step_count(), 3);
        assert!(path.is_complete());
        assert_eq!(path.steps()[2], RecipeStep::new("Steam", "Mud", "Lake"));
    }

    #[test]
    fn gaps_become_warnings() {
        let mut plan = CraftingPlan::new();
        plan.insert(RecipeStep::new("Mud", "Fire", "Brick"));
        let path = RecipePath::from_plan(&Item::from("Brick"), &plan);

        assert!(!path.is_complete());
        assert_eq!(
            path.warnings(),
            [PathWarning::IncompleteDependency {
                item: Item::from("Mud")
            }]
        );
    }

    #[test]
    fn trivial_path_has_no_steps() {
        let path = RecipePath::trivial(&Item::from("Water"));
        assert_eq!(path.step_count(), 0);
        assert!(path.tree().is_leaf());
    }

    #[test]
    fn cyclic_plan_is_kept_with_warning() {
        let mut plan = CraftingPlan::new();
        plan.insert(RecipeStep::new("Lake", "Water", "Mud"));
        plan.insert(RecipeStep::new("Mud", "Steam", "Lake"));
        plan.insert(RecipeStep::new("Fire", "Water", "Steam"));
        let path = RecipePath::from_plan(&Item::from("Mud"), &plan);

        assert_eq!(path.step_count(), 3);
        assert!(!path.is_complete());
        assert_eq!(
            path.warnings(),
            [PathWarning::CyclicDependency {
                item: Item::from("Mud")
            }]
        );
        assert_eq!(path.steps()[0], RecipeStep::new("Fire", "Water", "Steam"));
    }

    #[test]
    fn self_referential_step_is_kept_with_warning() {
        let mut plan = CraftingPlan::new();
        plan.insert(RecipeStep::new("Lake", "Air", "Lake"));
        let path = RecipePath::from_plan(&Item::from("Lake"), &plan);

        assert_eq!(path.step_count(), 1);
        assert_eq!(path.tree().children().unwrap()[1].kind(), NodeKind::Cycle);
        assert_eq!(
            path.warnings(),
            [PathWarning::CyclicDependency {
                item: Item::from("Lake")
            }]
        );
    }
}
