//! Recipe steps and ingredient pairs
//!
//! Combinations are unordered: `Earth + Water` and `Water + Earth` are the same
//! pair. [`IngredientPair`] normalises on construction so derived equality,
//! hashing and ordering are order-independent everywhere downstream.

use crate::item::Item;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Unordered pair of ingredients
///
/// Invariant: `first <= second`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "[Item; 2]", from = "[Item; 2]")]
pub struct IngredientPair {
    first: Item,
    second: Item,
}

impl IngredientPair {
    /// Create normalised pair
    #[must_use]
    pub fn new(a: impl Into<Item>, b: impl Into<Item>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Lexicographically smaller ingredient
    #[inline]
    #[must_use]
    pub fn first(&self) -> &Item {
        &self.first
    }

    /// Lexicographically larger ingredient
    #[inline]
    #[must_use]
    pub fn second(&self) -> &Item {
        &self.second
    }

    /// Both ingredients
    #[inline]
    #[must_use]
    pub fn items(&self) -> [&Item; 2] {
        [&self.first, &self.second]
    }

    /// Check if either ingredient is `item`
    #[inline]
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.first == *item || self.second == *item
    }

    /// Check if both ingredients are base items
    #[inline]
    #[must_use]
    pub fn is_base_pair(&self) -> bool {
        self.first.is_base() && self.second.is_base()
    }
}

impl From<[Item; 2]> for IngredientPair {
    fn from([a, b]: [Item; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<IngredientPair> for [Item; 2] {
    fn from(pair: IngredientPair) -> Self {
        [pair.first, pair.second]
    }
}

impl Display for IngredientPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.first, self.second)
    }
}

/// One combination: two ingredients produce one result
///
/// Ordering sorts by result first, then by pair, so a sorted collection of
/// steps groups all variants of an item together.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecipeStep {
    result: Item,
    pair: IngredientPair,
}

impl RecipeStep {
    /// Create step `a + b → result`
    #[must_use]
    pub fn new(a: impl Into<Item>, b: impl Into<Item>, result: impl Into<Item>) -> Self {
        Self {
            result: result.into(),
            pair: IngredientPair::new(a, b),
        }
    }

    /// Create step from an existing pair
    #[inline]
    #[must_use]
    pub fn from_pair(pair: IngredientPair, result: Item) -> Self {
        Self { result, pair }
    }

    /// Produced item
    #[inline]
    #[must_use]
    pub fn result(&self) -> &Item {
        &self.result
    }

    /// Ingredient pair
    #[inline]
    #[must_use]
    pub fn pair(&self) -> &IngredientPair {
        &self.pair
    }

    /// Both ingredients
    #[inline]
    #[must_use]
    pub fn ingredients(&self) -> [&Item; 2] {
        self.pair.items()
    }

    /// Ingredients that are not base items (deduplicated when both are equal)
    pub fn crafted_ingredients(&self) -> impl Iterator<Item = &Item> {
        let [a, b] = self.pair.items();
        let second = (a != b).then_some(b);
        std::iter::once(a)
            .chain(second)
            .filter(|item| !item.is_base())
    }
}

impl Display for RecipeStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.pair, self.result)
    }
}
