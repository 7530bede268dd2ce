//! Resolve pool
//!
//! Runs one blocking resolve task per top-level variant behind a semaphore
//! admission gate:
//! - Tasks run on the blocking pool and own their plans outright
//! - Results funnel through an mpsc channel and are re-ordered by job index
//! - `join_all` over the task handles is the completion barrier
//! - A panicking task is logged and its output dropped; siblings continue
//! - An optional deadline trips the shared cancel flag; tasks stop at the
//!   next emitted plan and their partial output is kept

use crate::alternatives::AlternativeGenerator;
use crate::cancel::{CancelFlag, CancelReason};
use crate::expander::VariantTable;
use crate::path::RecipePath;
use crate::plan::CraftingPlan;
use elemental_graph::{Item, RecipeGraph, RecipeStep};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};

/// Read-only inputs shared by every resolve task of one search
#[derive(Debug)]
pub struct ResolveContext {
    /// Recipe graph (tiers for candidate ordering)
    pub graph: Arc<RecipeGraph>,
    /// Search target
    pub target: Item,
    /// Variants recorded by the expansion
    pub variants: VariantTable,
    /// Plan items perturbed per task
    pub max_candidates: usize,
    /// Paths emitted per task
    pub budget: usize,
    /// Search cancel flag
    pub cancel: CancelFlag,
}

impl ResolveContext {
    /// Resolve one top-level variant into its canonical path and alternatives
    #[must_use]
    pub fn resolve(&self, top: RecipeStep) -> Vec<RecipePath> {
        let canonical = CraftingPlan::canonical(top, &self.variants);
        AlternativeGenerator::new(&self.target, &self.graph, &self.variants)
            .with_max_candidates(self.max_candidates)
            .generate(&canonical, self.budget, &self.cancel)
    }
}

/// Outputs of one RESOLVE phase
#[derive(Debug, Default)]
pub struct ResolveReport {
    /// Per-task outputs in job order; faulted tasks are absent
    pub outputs: Vec<Vec<RecipePath>>,
    /// Tasks dispatched
    pub dispatched: usize,
    /// Tasks that panicked
    pub faulted: usize,
    /// The deadline tripped the cancel flag
    pub deadline_hit: bool,
}

impl ResolveReport {
    /// All candidate paths, task by task in job order
    #[must_use]
    pub fn into_candidates(self) -> Vec<RecipePath> {
        self.outputs.into_iter().flatten().collect()
    }
}

/// Bounded pool for resolve tasks
#[derive(Debug, Clone)]
pub struct ResolvePool {
    permits: Arc<Semaphore>,
    max_concurrent: usize,
}

impl ResolvePool {
    /// Create pool admitting `max_concurrent` tasks at once (zero is treated as one)
    #[must_use]
    pub fn new(max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    /// Admission ceiling
    #[inline]
    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Currently free admission slots
    #[inline]
    #[must_use]
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `resolve` once per job and wait for every dispatched task
    ///
    /// Dispatch stops once `cancel` trips; tasks already running finish on
    /// their own schedule.
    pub async fn run<F>(
        &self,
        jobs: Vec<RecipeStep>,
        cancel: &CancelFlag,
        deadline: Option<Duration>,
        resolve: F,
    ) -> ResolveReport
    where
        F: Fn(RecipeStep) -> Vec<RecipePath> + Send + Sync + 'static,
    {
        let resolve = Arc::new(resolve);
        let timer = deadline.map(|deadline| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                cancel.expire();
            })
        });

        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, Vec<RecipePath>)>();
        let mut handles = Vec::with_capacity(jobs.len());

        for (index, top) in jobs.into_iter().enumerate() {
            if cancel.is_cancelled() {
                break;
            }
            let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
                break;
            };
            if cancel.is_cancelled() {
                break;
            }

            let tx = tx.clone();
            let resolve = Arc::clone(&resolve);
            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let paths = resolve(top);
                let _ = tx.send((index, paths));
            }));
        }
        drop(tx);

        let dispatched = handles.len();
        let mut faulted = 0;
        for result in join_all(handles).await {
            if let Err(err) = result {
                faulted += 1;
                tracing::warn!(error = %err, "resolve task failed, dropping its output");
            }
        }
        if let Some(timer) = timer {
            timer.abort();
        }

        let mut indexed = Vec::with_capacity(dispatched);
        while let Some(output) = rx.recv().await {
            indexed.push(output);
        }
        indexed.sort_by_key(|(index, _)| *index);

        let deadline_hit = cancel.reason() == Some(CancelReason::DeadlineExpired);
        if deadline_hit {
            tracing::warn!(dispatched, completed = indexed.len(), "resolve deadline expired, keeping partial results");
        }

        ResolveReport {
            outputs: indexed.into_iter().map(|(_, paths)| paths).collect(),
            dispatched,
            faulted,
            deadline_hit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn jobs(n: usize) -> Vec<RecipeStep> {
        (0..n)
            .map(|i| RecipeStep::new("Earth", "Water", format!("Item{i}")))
            .collect()
    }

    fn echo(step: RecipeStep) -> Vec<RecipePath> {
        vec![RecipePath::trivial(step.result())]
    }

    #[tokio::test]
    async fn outputs_keep_job_order() {
        let pool = ResolvePool::new(3);
        let report = pool.run(jobs(6), &CancelFlag::new(), None, echo).await;

        assert_eq!(report.dispatched, 6);
        assert_eq!(report.faulted, 0);
        let targets: Vec<String> = report
            .into_candidates()
            .iter()
            .map(|path| path.target().to_string())
            .collect();
        assert_eq!(targets, ["Item0", "Item1", "Item2", "Item3", "Item4", "Item5"]);
    }

    #[tokio::test]
    async fn admission_gate_bounds_concurrency() {
        let pool = ResolvePool::new(2);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let (r, p) = (Arc::clone(&running), Arc::clone(&peak));
        let report = pool
            .run(jobs(8), &CancelFlag::new(), None, move |step| {
                let now = r.fetch_add(1, Ordering::SeqCst) + 1;
                p.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(20));
                r.fetch_sub(1, Ordering::SeqCst);
                echo(step)
            })
            .await;

        assert_eq!(report.outputs.len(), 8);
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(pool.available_permits(), 2);
    }

    #[tokio::test]
    async fn panicking_task_is_isolated() {
        let pool = ResolvePool::new(3);
        let report = pool
            .run(jobs(4), &CancelFlag::new(), None, |step| {
                assert!(step.result() != "Item2", "boom");
                echo(step)
            })
            .await;

        assert_eq!(report.dispatched, 4);
        assert_eq!(report.faulted, 1);
        assert_eq!(report.outputs.len(), 3);
        assert_eq!(pool.available_permits(), 3);
    }

    #[tokio::test]
    async fn deadline_keeps_partial_results() {
        let pool = ResolvePool::new(1);
        let cancel = CancelFlag::new();
        let observer = cancel.clone();
        let report = pool
            .run(jobs(5), &cancel, Some(Duration::from_millis(30)), move |step| {
                while !observer.is_cancelled() {
                    std::thread::sleep(Duration::from_millis(5));
                }
                echo(step)
            })
            .await;

        assert!(report.deadline_hit);
        assert!(report.dispatched < 5);
        assert_eq!(report.outputs.len(), report.dispatched);
    }

    #[tokio::test]
    async fn cancelled_before_dispatch_runs_nothing() {
        let pool = ResolvePool::new(3);
        let cancel = CancelFlag::new();
        cancel.cancel();
        let report = pool.run(jobs(3), &cancel, None, echo).await;

        assert_eq!(report.dispatched, 0);
        assert!(!report.deadline_hit);
        assert!(report.outputs.is_empty());
    }
}
