//! Testing utilities for the elemental workspace
//!
//! Shared recipe graph fixtures and proptest strategies.

#![allow(missing_docs)]

pub mod fixtures {
    use elemental_graph::{RecipeGraph, RecipeRecord};

    /// Mud = Earth + Water, Steam = Fire + Water, Lake = Mud + Steam
    pub fn four_element_records() -> Vec<RecipeRecord> {
        vec![
            RecipeRecord::new("Mud", 1, ["Earth", "Water"]),
            RecipeRecord::new("Steam", 1, ["Fire", "Water"]),
            RecipeRecord::new("Lake", 2, ["Mud", "Steam"]),
        ]
    }

    pub fn four_element_graph() -> RecipeGraph {
        RecipeGraph::from_records(four_element_records())
    }

    /// Tiered graph where most crafted items have two recipes
    pub fn branching_records() -> Vec<RecipeRecord> {
        vec![
            RecipeRecord::new("Dust", 1, ["Air", "Earth"]),
            RecipeRecord::new("Steam", 1, ["Fire", "Water"]),
            RecipeRecord::new("Steam", 1, ["Air", "Fire"]),
            RecipeRecord::new("Lava", 1, ["Earth", "Fire"]),
            RecipeRecord::new("Mud", 1, ["Earth", "Water"]),
            RecipeRecord::new("Stone", 2, ["Lava", "Air"]),
            RecipeRecord::new("Stone", 2, ["Mud", "Fire"]),
            RecipeRecord::new("Clay", 2, ["Mud", "Dust"]),
            RecipeRecord::new("Clay", 2, ["Mud", "Earth"]),
            RecipeRecord::new("Lake", 2, ["Mud", "Steam"]),
            RecipeRecord::new("Brick", 3, ["Clay", "Fire"]),
            RecipeRecord::new("Brick", 3, ["Stone", "Mud"]),
            RecipeRecord::new("House", 4, ["Brick", "Stone"]),
            RecipeRecord::new("House", 4, ["Brick", "Clay"]),
        ]
    }

    pub fn branching_graph() -> RecipeGraph {
        RecipeGraph::from_records(branching_records())
    }

    /// Four-element graph plus a recipe that regresses from tier 2 to tier 1
    pub fn regressive_graph() -> RecipeGraph {
        let mut records = four_element_records();
        records.push(RecipeRecord::new("Mud", 1, ["Lake", "Water"]));
        records.push(RecipeRecord::new("Lake", 2, ["Lake", "Air"]));
        RecipeGraph::from_records(records)
    }

    /// Source text of [`four_element_graph`]
    pub fn four_element_json() -> String {
        let records: Vec<String> = four_element_records()
            .iter()
            .map(|r| {
                format!(
                    r#"{{"result": "{}", "tier": {}, "recipe": ["{}", "{}"]}}"#,
                    r.result, r.tier, r.recipe[0], r.recipe[1]
                )
            })
            .collect();
        format!("[{}]", records.join(", "))
    }
}

pub mod strategies {
    use elemental_graph::{RecipeGraph, RecipeRecord, Tier, BASE_ITEMS};
    use proptest::prelude::*;
    use proptest::sample::Index;

    /// Strictly tiered random graph
    #[derive(Debug, Clone)]
    pub struct LayeredGraph {
        pub graph: RecipeGraph,
        /// Crafted item names, lowest tier first
        pub items: Vec<String>,
    }

    /// Layers of items whose recipes only use items from lower layers
    ///
    /// Every crafted item is reachable, and every recipe's result tier is
    /// strictly above both ingredient tiers.
    pub fn layered_graph() -> impl Strategy<Value = LayeredGraph> {
        let recipe = (any::<Index>(), any::<Index>());
        let item = prop::collection::vec(recipe, 1..4);
        let layer = prop::collection::vec(item, 1..4);
        prop::collection::vec(layer, 1..5).prop_map(build_layers)
    }

    fn build_layers(layers: Vec<Vec<Vec<(Index, Index)>>>) -> LayeredGraph {
        let mut pool: Vec<String> = BASE_ITEMS.iter().map(ToString::to_string).collect();
        let mut records = Vec::new();
        let mut items = Vec::new();

        for (depth, layer) in layers.iter().enumerate() {
            let tier = Tier::try_from(depth + 1).unwrap_or(Tier::MAX);
            let lower = pool.len();
            let mut names = Vec::with_capacity(layer.len());
            for (slot, recipes) in layer.iter().enumerate() {
                let name = format!("T{tier}I{slot}");
                for (a, b) in recipes {
                    let a = &pool[a.index(lower)];
                    let b = &pool[b.index(lower)];
                    records.push(RecipeRecord::new(&name, tier, [a.as_str(), b.as_str()]));
                }
                names.push(name);
            }
            items.extend(names.iter().cloned());
            pool.extend(names);
        }

        LayeredGraph {
            graph: RecipeGraph::from_records(records),
            items,
        }
    }
}
