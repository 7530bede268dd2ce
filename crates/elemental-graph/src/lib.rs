//! Elemental Recipe Graph
//!
//! Immutable combination graph consumed by the crafting-path search.
//!
//! # Core Concepts
//!
//! - [`Item`]: Cheap-clone string identity of an element
//! - [`IngredientPair`]: Unordered pair of ingredients, normalised on construction
//! - [`RecipeStep`]: One combination `A + B → C`, equal regardless of ingredient order
//! - [`RecipeGraph`]: Result → recipes mapping plus a tier per item and a pair index
//! - [`RecipeRecord`]: Raw record shape supplied by the recipe source
//!
//! # Example
//!
//! ```rust
//! use elemental_graph::{RecipeGraph, RecipeRecord};
//!
//! let graph = RecipeGraph::from_records(vec![
//!     RecipeRecord::new("Mud", 1, ["Earth", "Water"]),
//!     RecipeRecord::new("Steam", 1, ["Fire", "Water"]),
//! ]);
//!
//! assert_eq!(graph.results_of("Water", "Earth"), ["Mud"]);
//! assert_eq!(graph.tier("Steam"), 1);
//! ```

// Core modules
mod error;
mod graph;
mod item;
mod record;
mod step;

// Re-exports
pub use error::GraphLoadError;
pub use graph::{GraphSummary, RecipeGraph};
pub use item::{is_base_item, Item, Tier, BASE_ITEMS};
pub use record::RecipeRecord;
pub use step::{IngredientPair, RecipeStep};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn base_items_are_tier_zero_in_any_graph() {
        let graph = RecipeGraph::empty();
        for base in BASE_ITEMS {
            assert!(is_base_item(base));
            assert_eq!(graph.tier(base), 0);
        }
    }

    #[test]
    fn records_to_lookup() {
        let graph = RecipeGraph::from_records(vec![
            RecipeRecord::new("Mud", 1, ["Earth", "Water"]),
            RecipeRecord::new("Lake", 2, ["Mud", "Steam"]),
        ]);

        let step = RecipeStep::new("Steam", "Mud", "Lake");
        let recipes = graph.recipes_for("Lake");
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0], *step.pair());
    }
}
