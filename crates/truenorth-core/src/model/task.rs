//! Task record and alignment bookkeeping helpers

use crate::model::alignment::{Alignment, AlignmentTarget};
use crate::model::goal::Goal;
use crate::types::Category;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-submitted task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,

    /// Free-text task title
    pub title: String,

    /// Whether the task has been completed
    pub completed: bool,

    /// Coarse category assigned at creation
    pub category: Category,

    /// One alignment per scored goal/milestone target
    ///
    /// Re-scoring replaces entries per target; the list never holds two
    /// alignments for the same target.
    pub alignments: Vec<Alignment>,
}

impl Task {
    /// Create a new task with a pre-classified category
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            category,
            alignments: Vec::new(),
        }
    }

    /// Toggle or set completion state
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Insert or replace the alignment for its target
    ///
    /// Replaces, never appends: the task holds at most one alignment per
    /// distinct goal/milestone target.
    pub fn upsert_alignment(&mut self, alignment: Alignment) {
        match self
            .alignments
            .iter_mut()
            .find(|a| a.target == alignment.target)
        {
            Some(existing) => *existing = alignment,
            None => self.alignments.push(alignment),
        }
    }

    /// Replace the whole alignment list with a freshly computed one
    ///
    /// Used after batch re-scoring: a goal edit can shift any task's
    /// relative alignment, so partial patching is never enough.
    pub fn replace_alignments(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
    }

    /// Drop every alignment referencing the given goal (and its milestones)
    ///
    /// Called when a goal is deleted so stale references never linger.
    pub fn invalidate_goal(&mut self, goal: &Goal) {
        self.alignments.retain(|a| {
            a.target != AlignmentTarget::Goal(goal.id)
                && !goal
                    .milestones
                    .iter()
                    .any(|m| a.target == AlignmentTarget::Milestone(m.id))
        });
    }

    /// The alignment recorded for a specific target, if any
    pub fn alignment_for(&self, target: AlignmentTarget) -> Option<&Alignment> {
        self.alignments.iter().find(|a| a.target == target)
    }

    /// The task's best direct-goal score for the given goal
    pub fn best_goal_score(&self, goal_id: Uuid) -> Option<u8> {
        self.alignments
            .iter()
            .filter(|a| a.target == AlignmentTarget::Goal(goal_id))
            .map(|a| a.score)
            .max()
    }
}

/// Per-category task counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// The category counted
    pub category: Category,
    /// Number of tasks in the category
    pub total: usize,
    /// Number of completed tasks in the category
    pub completed: usize,
}

/// Count tasks per category, in [`Category::ALL`] order
pub fn category_stats(tasks: &[Task]) -> Vec<CategoryStats> {
    Category::ALL
        .iter()
        .map(|&category| CategoryStats {
            category,
            total: tasks.iter().filter(|t| t.category == category).count(),
            completed: tasks
                .iter()
                .filter(|t| t.category == category && t.completed)
                .count(),
        })
        .collect()
}
