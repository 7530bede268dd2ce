//! Ingredient trees
//!
//! Turns a flattened [`CraftingPlan`] into a recursive decomposition for
//! presentation and statistics. The ancestor set is an `im::HashSet` threaded
//! by value, so sibling subtrees never observe each other's ancestry and
//! extending it for a child is a structural-sharing clone.

use crate::plan::CraftingPlan;
use elemental_graph::{Item, RecipeStep};
use serde::Serialize;
use std::collections::BTreeSet;

/// Why a node has no children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Decomposed through its chosen step
    Crafted,
    /// Base item
    Base,
    /// No chosen step in the plan
    Unresolved,
    /// Already on the current ancestor path
    Cycle,
}

/// One node of an ingredient tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientNode {
    item: Item,
    kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<RecipeStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Box<[IngredientNode; 2]>>,
}

impl IngredientNode {
    /// Create leaf node
    #[inline]
    #[must_use]
    pub fn leaf(item: Item, kind: NodeKind) -> Self {
        Self {
            item,
            kind,
            step: None,
            children: None,
        }
    }

    /// Build the tree rooted at `item`
    #[must_use]
    pub fn build(item: &Item, plan: &CraftingPlan) -> Self {
        Self::build_with_ancestors(item, plan, im::HashSet::new())
    }

    fn build_with_ancestors(item: &Item, plan: &CraftingPlan, ancestors: im::HashSet<Item>) -> Self {
        if item.is_base() {
            return Self::leaf(item.clone(), NodeKind::Base);
        }
        if ancestors.contains(item) {
            return Self::leaf(item.clone(), NodeKind::Cycle);
        }
        let Some(step) = plan.get(item) else {
            return Self::leaf(item.clone(), NodeKind::Unresolved);
        };

        let ancestors = ancestors.update(item.clone());
        let [a, b] = step.ingredients();
        let first = Self::build_with_ancestors(a, plan, ancestors.clone());
        let second = Self::build_with_ancestors(b, plan, ancestors);

        Self {
            item: item.clone(),
            kind: NodeKind::Crafted,
            step: Some(step.clone()),
            children: Some(Box::new([first, second])),
        }
    }

    /// Item at this node
    #[inline]
    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Node kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Chosen step, for crafted nodes
    #[inline]
    #[must_use]
    pub fn step(&self) -> Option<&RecipeStep> {
        self.step.as_ref()
    }

    /// The two ingredient subtrees, for crafted nodes
    #[inline]
    #[must_use]
    pub fn children(&self) -> Option<&[IngredientNode; 2]> {
        self.children.as_deref()
    }

    /// Check if node has no children
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Items cut off by the cycle guard anywhere below this node
    #[must_use]
    pub fn cycle_items(&self) -> BTreeSet<Item> {
        let mut items = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.kind == NodeKind::Cycle {
                items.insert(node.item.clone());
            }
            stack.extend(node.children().into_iter().flatten());
        }
        items
    }
}

/// Diagnostic statistics of one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TreeStats {
    /// Nodes in the tree, leaves included
    pub node_count: usize,
    /// Levels on the longest root-to-leaf path; a single leaf has depth 1
    pub max_depth: usize,
    /// Expansion visits of the search that produced the tree
    pub visit_count: usize,
}

impl TreeStats {
    /// Accumulate statistics depth-first
    #[must_use]
    pub fn of(root: &IngredientNode) -> Self {
        let mut stats = Self::default();
        let mut stack = vec![(root, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            stats.node_count += 1;
            stats.max_depth = stats.max_depth.max(depth);
            if let Some(children) = node.children() {
                stack.extend(children.iter().map(|child| (child, depth + 1)));
            }
        }
        stats
    }

    /// With visit count
    #[inline]
    #[must_use]
    pub fn with_visits(mut self, visit_count: usize) -> Self {
        self.visit_count = visit_count;
        self
    }
}
