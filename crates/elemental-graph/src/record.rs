//! Recipe source records
//!
//! The shape produced by the data-acquisition side: one record per known
//! recipe, `{"result": "Mud", "tier": 1, "recipe": ["Earth", "Water"]}`.

use crate::item::Tier;
use serde::{Deserialize, Serialize};

/// One recipe as supplied by the recipe source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// Produced item
    pub result: String,
    /// Tier of the produced item
    #[serde(default)]
    pub tier: Tier,
    /// Ingredient list; only two-ingredient records are loaded
    #[serde(default)]
    pub recipe: Vec<String>,
}

impl RecipeRecord {
    /// Create two-ingredient record
    #[must_use]
    pub fn new(result: &str, tier: Tier, ingredients: [&str; 2]) -> Self {
        Self {
            result: result.to_string(),
            tier,
            recipe: ingredients.iter().map(ToString::to_string).collect(),
        }
    }

    /// Ingredient pair, if this record holds exactly two ingredients
    #[inline]
    #[must_use]
    pub fn ingredients(&self) -> Option<(&str, &str)> {
        match self.recipe.as_slice() {
            [a, b] => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }
}
