//! Elemental Core
//!
//! Crafting-path search over a two-ingredient recipe graph.
//!
//! # Architecture
//!
//! ```text
//! SearchRequest
//!      │
//!      ▼
//! ┌─────────────┐   VariantTable   ┌──────────────┐   RecipePath*   ┌──────────┐
//! │   EXPAND    │ ───────────────► │   RESOLVE    │ ──────────────► │  SELECT  │
//! │ (closure)   │                  │ (pool, N ≤ k)│                 │ (dedup)  │
//! └─────────────┘                  └──────────────┘                 └──────────┘
//!                                   canonical plan                       │
//!                                   + alternatives                       ▼
//!                                                                  SearchOutcome
//! ```
//!
//! # Example
//!
//! ```no_run
//! use elemental_core::{render_tree, SearchEngine, SearchRequest};
//! use elemental_graph::RecipeGraph;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = Arc::new(RecipeGraph::load_json("recipes.json")?);
//! let engine = SearchEngine::with_defaults(graph);
//! let outcome = engine.search(SearchRequest::new("Lake")).await?;
//! for path in outcome.iter_paths() {
//!     println!("{}", render_tree(path.tree()));
//! }
//! # Ok(())
//! # }
//! ```

pub mod alternatives;
pub mod cancel;
pub mod config;
pub mod engine;
pub mod error;
pub mod expander;
pub mod export;
pub mod path;
pub mod plan;
pub mod pool;
pub mod selector;
pub mod tree;
pub mod types;

pub use alternatives::AlternativeGenerator;
pub use cancel::{CancelFlag, CancelReason};
pub use config::{SearchConfig, TierPolicy};
pub use engine::SearchEngine;
pub use error::{ConfigError, SearchError};
pub use expander::{expand, Expansion, ExpansionOptions, VariantTable};
pub use export::{export_paths, render_tree, RecipeTreeView, SearchReport};
pub use path::{PathWarning, RecipePath};
pub use plan::CraftingPlan;
pub use pool::{ResolveContext, ResolvePool, ResolveReport};
pub use selector::{select, Selection};
pub use tree::{IngredientNode, NodeKind, TreeStats};
pub use types::{RankedPath, SearchId, SearchMode, SearchOutcome, SearchRequest, TraversalOrder};

/// Version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
