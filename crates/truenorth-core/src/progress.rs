//! Goal progress computation
//!
//! Turns per-task alignment records back into a single goal-completion
//! percentage. Two views exist:
//!
//! - [`compute_goal_progress`]: milestone-weighted. Per milestone, completed
//!   aligned tasks contribute their alignment fraction; uncompleted aligned
//!   tasks contribute 0 but still count in the denominator, so leaving
//!   aligned work undone drags the milestone down proportionally.
//! - [`simple_goal_progress`]: display-level, for goal-direct scoring.
//!   Counts only tasks whose best score for the goal clears the relevance
//!   threshold.
//!
//! Both are total: zero milestones, zero weight, or zero aligned tasks all
//! yield a defined 0, never NaN.

use crate::model::{AlignmentTarget, Goal, Task};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum best-alignment score for a task to count toward the simple
/// goal-progress view
pub const RELEVANCE_THRESHOLD: u8 = 25;

/// A task that counted toward one milestone's progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedTaskSummary {
    /// Task id
    pub id: Uuid,
    /// Task title
    pub title: String,
    /// Whether the task is completed
    pub completed: bool,
    /// The task's alignment score for this milestone
    pub alignment: u8,
}

/// Progress of a single milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneProgress {
    /// Milestone id
    pub id: Uuid,
    /// Milestone title
    pub title: String,
    /// Progress percentage in [0, 100] (unrounded)
    pub progress: f64,
    /// Milestone weight [1, 5]
    pub weight: u8,
    /// Tasks aligned to this milestone
    pub aligned_tasks: Vec<AlignedTaskSummary>,
}

/// Full progress report for one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Milestone-weight-weighted total, rounded to the nearest integer
    pub total_progress: u8,
    /// Per-milestone breakdown, in the goal's milestone order
    pub milestones: Vec<MilestoneProgress>,
}

/// Compute milestone-weighted progress for a goal
///
/// Milestone progress is
/// `sum(alignment/100 over completed aligned tasks) / aligned-task-count x 100`,
/// or 0 with no aligned tasks. Goal progress is the milestone-weight-weighted
/// average `sum(progress x weight) / sum(weight)`, rounded, or 0 when total
/// weight is 0 (i.e. no milestones).
pub fn compute_goal_progress(goal: &Goal, tasks: &[Task]) -> ProgressReport {
    let milestones: Vec<MilestoneProgress> = goal
        .milestones
        .iter()
        .map(|milestone| {
            let target = AlignmentTarget::Milestone(milestone.id);
            let aligned: Vec<&Task> = tasks
                .iter()
                .filter(|task| task.alignment_for(target).is_some())
                .collect();

            let completed_weight: f64 = aligned
                .iter()
                .filter(|task| task.completed)
                .map(|task| {
                    task.alignment_for(target)
                        .map(|a| a.score as f64 / 100.0)
                        .unwrap_or(0.0)
                })
                .sum();

            let progress = if aligned.is_empty() {
                0.0
            } else {
                completed_weight / aligned.len() as f64 * 100.0
            };

            MilestoneProgress {
                id: milestone.id,
                title: milestone.title.clone(),
                progress,
                weight: milestone.weight,
                aligned_tasks: aligned
                    .iter()
                    .map(|task| AlignedTaskSummary {
                        id: task.id,
                        title: task.title.clone(),
                        completed: task.completed,
                        alignment: task
                            .alignment_for(target)
                            .map(|a| a.score)
                            .unwrap_or(0),
                    })
                    .collect(),
            }
        })
        .collect();

    let total_weight: f64 = milestones.iter().map(|m| m.weight as f64).sum();
    let weighted: f64 = milestones
        .iter()
        .map(|m| m.progress * m.weight as f64)
        .sum();

    let total_progress = if total_weight > 0.0 {
        (weighted / total_weight).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    ProgressReport {
        total_progress,
        milestones,
    }
}

/// Display-level progress for goal-direct alignment
///
/// Considers only tasks whose best alignment score for the goal is at least
/// [`RELEVANCE_THRESHOLD`]; progress is completed-aligned over total-aligned,
/// rounded. 0 with no aligned tasks.
pub fn simple_goal_progress(goal_id: Uuid, tasks: &[Task]) -> u8 {
    let aligned: Vec<&Task> = tasks
        .iter()
        .filter(|task| {
            task.best_goal_score(goal_id)
                .map(|score| score >= RELEVANCE_THRESHOLD)
                .unwrap_or(false)
        })
        .collect();

    if aligned.is_empty() {
        return 0;
    }

    let completed = aligned.iter().filter(|task| task.completed).count();
    (completed as f64 / aligned.len() as f64 * 100.0).round() as u8
}
