//! Recipe graph
//!
//! Provides [`RecipeGraph`], the immutable result → recipes mapping shared
//! read-only by every search. Built once from recipe records; a reload means
//! building a new graph and swapping the `Arc`, never mutating in place.

use crate::error::GraphLoadError;
use crate::item::{is_base_item, Item, Tier};
use crate::record::RecipeRecord;
use crate::step::IngredientPair;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;

/// Immutable combination graph with tier layering
///
/// Holds three views over the same recipes:
/// - result → ordered list of ingredient pairs (source order)
/// - item → tier
/// - ingredient pair → results it combines into (the lookup the expander needs)
#[derive(Debug, Clone, Default)]
pub struct RecipeGraph {
    recipes: IndexMap<Item, Vec<IngredientPair>>,
    tiers: HashMap<Item, Tier>,
    by_pair: HashMap<IngredientPair, Vec<Item>>,
}

/// Size summary of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphSummary {
    /// Distinct craftable-by-recipe items
    pub result_count: usize,
    /// Distinct (pair, result) recipes
    pub recipe_count: usize,
    /// Highest tier seen
    pub max_tier: Tier,
}

impl RecipeGraph {
    /// Create empty graph (only base items exist)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build graph from recipe records
    ///
    /// Records without exactly two ingredients are skipped. The first tier
    /// seen for a result wins; base items are always tier 0. Repeated
    /// ingredient pairs for the same result collapse to one recipe.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = RecipeRecord>) -> Self {
        let mut graph = Self::empty();
        let mut skipped = 0usize;

        for record in records {
            let result = Item::from(record.result.as_str());
            if !is_base_item(&record.result) {
                graph.tiers.entry(result.clone()).or_insert(record.tier);
            }

            let Some((a, b)) = record.ingredients() else {
                skipped += 1;
                continue;
            };

            let pair = IngredientPair::new(a, b);
            let pairs = graph.recipes.entry(result.clone()).or_default();
            if pairs.contains(&pair) {
                continue;
            }
            pairs.push(pair.clone());
            graph.by_pair.entry(pair).or_default().push(result);
        }

        if skipped > 0 {
            tracing::debug!(skipped, "skipped recipe records without two ingredients");
        }
        tracing::debug!(
            results = graph.recipes.len(),
            recipes = graph.recipe_count(),
            "recipe graph built"
        );

        graph
    }

    /// Parse a JSON array of recipe records
    ///
    /// # Errors
    /// - `GraphLoadError::Parse` if the text is not an array of records
    pub fn from_json_str(json: &str) -> Result<Self, GraphLoadError> {
        let records: Vec<RecipeRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Load a JSON recipe file
    ///
    /// # Errors
    /// - `GraphLoadError::Io` if the file cannot be read
    /// - `GraphLoadError::Parse` if its content is malformed
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, GraphLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GraphLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Load a JSON recipe file, falling back to an empty graph
    ///
    /// Searches against the empty graph find nothing but every base item.
    #[must_use]
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load_json(path.as_ref()) {
            Ok(graph) => graph,
            Err(err) => {
                tracing::warn!(path = %path.as_ref().display(), error = %err, "recipe graph load failed, using empty graph");
                Self::empty()
            }
        }
    }

    /// Results combinable from the unordered pair `(a, b)`
    #[must_use]
    pub fn results_of(&self, a: &str, b: &str) -> &[Item] {
        self.by_pair
            .get(&IngredientPair::new(a, b))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Known recipes for an item, in source order
    #[must_use]
    pub fn recipes_for(&self, item: &str) -> &[IngredientPair] {
        self.recipes
            .get(item)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check if some recipe produces `item`
    #[inline]
    #[must_use]
    pub fn contains_result(&self, item: &str) -> bool {
        self.recipes.contains_key(item)
    }

    /// Tier of an item; base and unknown items are tier 0
    #[inline]
    #[must_use]
    pub fn tier(&self, item: &str) -> Tier {
        self.tiers.get(item).copied().unwrap_or(0)
    }

    /// Iterate results in source order
    pub fn results(&self) -> impl Iterator<Item = &Item> {
        self.recipes.keys()
    }

    /// Number of distinct results
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.recipes.len()
    }

    /// Number of distinct recipes
    #[must_use]
    pub fn recipe_count(&self) -> usize {
        self.recipes.values().map(Vec::len).sum()
    }

    /// Highest tier of any item
    #[must_use]
    pub fn max_tier(&self) -> Tier {
        self.tiers.values().copied().max().unwrap_or(0)
    }

    /// Check if graph holds no recipes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Size summary
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            result_count: self.item_count(),
            recipe_count: self.recipe_count(),
            max_tier: self.max_tier(),
        }
    }
}
