//! Subcommand implementations
//!
//! Each command writes its report to the supplied writer so it can be
//! exercised without a terminal.

use crate::config::CliConfig;
use anyhow::Context;
use elemental_core::{render_tree, SearchEngine, SearchOutcome, SearchReport, SearchRequest};
use elemental_graph::RecipeGraph;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments of `elemental search`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    /// Recipe JSON file
    pub recipes: PathBuf,
    /// Item to craft
    pub target: String,
    /// Return every path up to `max` instead of the shortest
    pub all: bool,
    /// Depth-first expansion
    pub dfs: bool,
    /// Result budget
    pub max: usize,
    /// Print the JSON report
    pub json: bool,
}

/// Run one search and print the result
///
/// A recipe file that fails to load is searched as an empty graph.
///
/// # Returns
/// `true` if a path was found, `false` if the target is unreachable.
///
/// # Errors
/// Fails on invalid configuration, a cancelled or failed search, or a
/// write error.
pub async fn search(args: &SearchArgs, config: &CliConfig, out: &mut impl Write) -> anyhow::Result<bool> {
    let graph = Arc::new(RecipeGraph::load_or_empty(&args.recipes));
    let engine = SearchEngine::new(graph, config.search.clone())?;
    let request = SearchRequest::from_flags(args.target.as_str(), !args.all, !args.dfs, args.max);

    match engine.search(request).await {
        Ok(outcome) => {
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &SearchReport::from_outcome(&outcome))?;
                writeln!(out)?;
            } else {
                write_outcome(&outcome, out)?;
            }
            Ok(true)
        }
        Err(err) if err.is_not_found() => {
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &SearchReport::from_error(&err))?;
                writeln!(out)?;
            } else {
                writeln!(out, "{err}")?;
            }
            Ok(false)
        }
        Err(err) => Err(err).context(format!("searching for {}", args.target)),
    }
}

fn write_outcome(outcome: &SearchOutcome, out: &mut impl Write) -> anyhow::Result<()> {
    for (index, ranked) in outcome.paths.iter().enumerate() {
        let path = &ranked.path;
        writeln!(
            out,
            "Path {} ({} steps, depth {}):",
            index + 1,
            path.step_count(),
            ranked.stats.max_depth
        )?;
        for step in path.steps() {
            writeln!(out, "  {step}")?;
        }
        for warning in path.warnings() {
            writeln!(out, "  warning: {warning}")?;
        }
        writeln!(out)?;
        write!(out, "{}", render_tree(path.tree()))?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "Found {} path(s) for {}: {} nodes, {} visits, {:.2} ms{}",
        outcome.found_count,
        outcome.target,
        outcome.total_node_count,
        outcome.expansion_visits,
        outcome.elapsed.as_secs_f64() * 1000.0,
        if outcome.deadline_hit { " (deadline hit, partial)" } else { "" }
    )?;
    Ok(())
}

/// Print a summary of a recipe file
///
/// # Errors
/// Fails if the file cannot be loaded.
pub fn inspect(recipes: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let graph = RecipeGraph::load_json(recipes)
        .with_context(|| format!("loading recipes from {}", recipes.display()))?;
    let summary = graph.summary();

    writeln!(out, "Recipes: {}", recipes.display())?;
    writeln!(out, "  Results:  {}", summary.result_count)?;
    writeln!(out, "  Recipes:  {}", summary.recipe_count)?;
    writeln!(out, "  Max tier: {}", summary.max_tier)?;
    Ok(())
}
