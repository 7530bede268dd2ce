//! Presentation export
//!
//! Converts ingredient trees into the nested `{name, recipes}` form consumed
//! by presentation layers. A node lists one two-element decomposition per
//! path; base and leaf nodes list none.

use crate::error::SearchError;
use crate::path::RecipePath;
use crate::tree::{IngredientNode, NodeKind};
use crate::types::SearchOutcome;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Nested external tree form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeTreeView {
    /// Item name
    pub name: String,
    /// Decompositions, each exactly two ingredient subtrees
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipes: Vec<[RecipeTreeView; 2]>,
}

impl RecipeTreeView {
    /// Convert one ingredient tree
    #[must_use]
    pub fn from_node(node: &IngredientNode) -> Self {
        let recipes = node
            .children()
            .map(|[a, b]| vec![[Self::from_node(a), Self::from_node(b)]])
            .unwrap_or_default();
        Self {
            name: node.item().to_string(),
            recipes,
        }
    }

    /// Check if this view has no decomposition
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Merge the trees of paths sharing one target under a single root
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn export_paths<'a>(paths: impl IntoIterator<Item = &'a RecipePath>) -> Option<RecipeTreeView> {
    let mut paths = paths.into_iter();
    let first = paths.next()?;
    let mut root = RecipeTreeView::from_node(first.tree());
    for path in paths {
        root.recipes
            .extend(RecipeTreeView::from_node(path.tree()).recipes);
    }
    Some(root)
}

/// Render an ingredient tree as indented ASCII
#[must_use]
pub fn render_tree(root: &IngredientNode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", label(root));
    render_children(root, &mut out, "");
    out
}

fn render_children(node: &IngredientNode, out: &mut String, prefix: &str) {
    let Some(children) = node.children() else {
        return;
    };
    for (index, child) in children.iter().enumerate() {
        let (branch, indent) = if index + 1 == children.len() {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let _ = writeln!(out, "{prefix}{branch}{}", label(child));
        render_children(child, out, &format!("{prefix}{indent}"));
    }
}

fn label(node: &IngredientNode) -> String {
    match node.kind() {
        NodeKind::Crafted | NodeKind::Base => node.item().to_string(),
        NodeKind::Unresolved => format!("{} (unresolved)", node.item()),
        NodeKind::Cycle => format!("{} (cycle)", node.item()),
    }
}

/// Response document of one search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    /// Merged decomposition tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RecipeTreeView>,
    /// Node count of the returned paths
    pub node_count: usize,
    /// Distinct paths found
    pub recipe_found: usize,
    /// Wall time in milliseconds
    pub time: f64,
    /// Error messages; empty when the search succeeded
    #[serde(default)]
    pub errors: Vec<String>,
}

impl SearchReport {
    /// Report of a successful search
    #[must_use]
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        Self {
            data: export_paths(outcome.iter_paths()),
            node_count: outcome.total_node_count,
            recipe_found: outcome.found_count,
            time: outcome.elapsed.as_secs_f64() * 1000.0,
            errors: Vec::new(),
        }
    }

    /// Report of a failed search
    #[must_use]
    pub fn from_error(err: &SearchError) -> Self {
        Self {
            data: None,
            node_count: 0,
            recipe_found: 0,
            time: 0.0,
            errors: vec![err.to_string()],
        }
    }
}
