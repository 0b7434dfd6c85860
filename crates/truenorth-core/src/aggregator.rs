//! Alignment aggregation - the one entry point other components call
//!
//! Orchestrates scoring of one task against a set of goals: fans out one
//! scoring call per target, awaits them concurrently under a concurrency
//! cap, reorders results to input order, and filters out zero-score
//! entries before returning (they are signal-free and must not pollute
//! storage or the UI).
//!
//! Model-backed strategies degrade instead of failing: a transport error on
//! one target never aborts the others, and under [`Strategy::Composite`]
//! the heuristic scorer substitutes for the failed call.

use crate::model::{Alignment, AlignmentTarget, Goal, Milestone, Task};
use crate::scoring::{HeuristicScorer, LlmScorer, ScoringStrategy, SemanticRuleMatcher};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use uuid::Uuid;

/// Fallback fan-out cap when the strategy carries no model configuration
const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// The selectable scoring algorithm
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Deterministic token overlap (never suspends, never fails)
    Heuristic,

    /// Keyword-cluster matching (never suspends, never fails)
    SemanticRule,

    /// Model-backed scoring; failed calls degrade to score 0
    Llm(LlmScorer),

    /// Model-backed scoring with heuristic substitution on failure
    ///
    /// The recommended default: a network/timeout failure on one target
    /// yields the heuristic score for that target instead of nothing.
    Composite(LlmScorer),
}

impl Strategy {
    /// Whether repeated runs over unchanged input yield identical output
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Strategy::Heuristic | Strategy::SemanticRule)
    }

    fn max_concurrency(&self) -> usize {
        match self {
            Strategy::Llm(scorer) | Strategy::Composite(scorer) => {
                scorer.config().max_concurrency
            }
            _ => DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Outcome of re-scoring one task during a batch realignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRealignment {
    /// The task whose alignment list was recomputed
    pub task_id: Uuid,

    /// The replacement alignment list (zero scores already filtered)
    pub alignments: Vec<Alignment>,

    /// How many targets fell back to a degraded score for this task
    pub fallback_count: usize,
}

impl TaskRealignment {
    /// Whether any target for this task could not be scored as requested
    pub fn degraded(&self) -> bool {
        self.fallback_count > 0
    }
}

/// Orchestrates per-task scoring against a goal set
#[derive(Debug)]
pub struct AlignmentAggregator {
    strategy: Strategy,
    semaphore: Arc<Semaphore>,
}

impl AlignmentAggregator {
    /// Create an aggregator using the given strategy
    ///
    /// The fan-out concurrency cap comes from the strategy's model
    /// configuration when it has one.
    pub fn new(strategy: Strategy) -> Self {
        let permits = strategy.max_concurrency().max(1);
        Self {
            strategy,
            semaphore: Arc::new(Semaphore::new(permits)),
        }
    }

    /// The configured strategy
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Score one task title against every goal (or milestone) target
    ///
    /// One call per target, awaited concurrently; results come back in
    /// input order regardless of completion order. Zero-score alignments
    /// are filtered out. With `milestone_targets` set, each milestone is a
    /// target and milestone-less goals fall back to a goal-direct target.
    ///
    /// Never fails: unreachable model service degrades per target (see
    /// [`Strategy`]).
    pub async fn align_task(
        &self,
        task_title: &str,
        goals: &[Goal],
        milestone_targets: bool,
    ) -> Vec<Alignment> {
        let (alignments, _) = self
            .align_task_counting(task_title, goals, milestone_targets)
            .await;
        alignments
    }

    /// Re-score every task against the full updated goal set
    ///
    /// Required after any goal edit: a description change can shift any
    /// task's relative alignment, so each task's alignment list is replaced
    /// wholesale rather than patched. One task's degraded scoring never
    /// aborts the rest; per-task fallback counts report partial failure.
    pub async fn realign_all(
        &self,
        tasks: &[Task],
        goals: &[Goal],
        milestone_targets: bool,
    ) -> Vec<TaskRealignment> {
        let mut results = Vec::with_capacity(tasks.len());

        for task in tasks {
            let (alignments, fallback_count) = self
                .align_task_counting(&task.title, goals, milestone_targets)
                .await;

            if fallback_count > 0 {
                tracing::warn!(
                    task_id = %task.id,
                    fallback_count,
                    "task realigned with degraded scores"
                );
            }

            results.push(TaskRealignment {
                task_id: task.id,
                alignments,
                fallback_count,
            });
        }

        tracing::info!(
            tasks = tasks.len(),
            goals = goals.len(),
            "batch realignment complete"
        );

        results
    }

    async fn align_task_counting(
        &self,
        task_title: &str,
        goals: &[Goal],
        milestone_targets: bool,
    ) -> (Vec<Alignment>, usize) {
        let mut targets: Vec<(&Goal, Option<&Milestone>)> = Vec::new();
        for goal in goals {
            if milestone_targets && !goal.milestones.is_empty() {
                targets.extend(goal.milestones.iter().map(|m| (goal, Some(m))));
            } else {
                targets.push((goal, None));
            }
        }

        // join_all preserves the order of its input futures, which keeps
        // results aligned with the target sequence above.
        let scored = join_all(
            targets
                .iter()
                .map(|(goal, milestone)| self.score_one(task_title, goal, *milestone)),
        )
        .await;

        let fallback_count = scored.iter().filter(|(_, degraded)| *degraded).count();
        let alignments = scored
            .into_iter()
            .map(|(alignment, _)| alignment)
            .filter(Alignment::is_positive)
            .collect();

        (alignments, fallback_count)
    }

    /// Score one target, degrading instead of failing
    ///
    /// Returns the alignment plus whether it came from a fallback path.
    async fn score_one(
        &self,
        task_title: &str,
        goal: &Goal,
        milestone: Option<&Milestone>,
    ) -> (Alignment, bool) {
        // The semaphore is never closed, so acquisition cannot fail in
        // practice; losing the permit on a closed semaphore only loses the
        // rate cap, not correctness.
        let _permit = self.semaphore.acquire().await;

        let target = match milestone {
            Some(m) => AlignmentTarget::Milestone(m.id),
            None => AlignmentTarget::Goal(goal.id),
        };

        match &self.strategy {
            Strategy::Heuristic => {
                let alignment = HeuristicScorer
                    .score_target(task_title, goal, milestone)
                    .await
                    .unwrap_or_else(|_| Alignment::new(target, 0, ""));
                (alignment, false)
            }
            Strategy::SemanticRule => {
                let alignment = SemanticRuleMatcher
                    .score_target(task_title, goal, milestone)
                    .await
                    .unwrap_or_else(|_| Alignment::new(target, 0, ""));
                (alignment, false)
            }
            Strategy::Llm(scorer) => match scorer.score_target(task_title, goal, milestone).await
            {
                Ok(alignment) => (alignment, false),
                Err(e) => {
                    tracing::warn!(goal = %goal.title, error = %e, "model scoring failed");
                    (Alignment::new(target, 0, ""), true)
                }
            },
            Strategy::Composite(scorer) => {
                match scorer.score_target(task_title, goal, milestone).await {
                    Ok(alignment) => (alignment, false),
                    Err(e) => {
                        tracing::warn!(
                            goal = %goal.title,
                            error = %e,
                            "model scoring failed, substituting heuristic"
                        );
                        let alignment = HeuristicScorer
                            .score_target(task_title, goal, milestone)
                            .await
                            .unwrap_or_else(|_| Alignment::new(target, 0, ""));
                        (alignment, true)
                    }
                }
            }
        }
    }
}
