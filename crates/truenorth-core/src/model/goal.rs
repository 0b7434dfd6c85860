//! Goal data structure and operations
//!
//! A goal is a user-defined objective with a timeframe and an ordered set
//! of weighted milestones. Goals are built through [`GoalBuilder`], which
//! validates structure before anything enters the engine.

use crate::error::ValidationError;
use crate::model::milestone::Milestone;
use crate::types::{now, Timeframe, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined goal
///
/// # Invariants
///
/// - `title` is non-empty (enforced by the builder)
/// - every milestone has a valid weight (enforced by `Milestone::new`)
///
/// # Examples
///
/// ```
/// use truenorth_core::model::{Goal, Milestone};
/// use truenorth_core::types::Timeframe;
///
/// let goal = Goal::builder()
///     .title("Complete first marathon under 4:30:00")
///     .timeframe(Timeframe::OneYear)
///     .add_milestone(
///         Milestone::new("Base training", "Run consistently", 5,
///             vec!["go for a run".to_string(), "buy running shoes".to_string()])
///             .unwrap(),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(goal.milestones.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: Uuid,

    /// Short goal name
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Horizon the goal should be achieved within
    pub timeframe: Timeframe,

    /// Creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,

    /// Ordered weighted milestones (may be empty)
    pub milestones: Vec<Milestone>,
}

impl Goal {
    /// Start building a new goal
    pub fn builder() -> GoalBuilder {
        GoalBuilder::default()
    }

    /// Find a milestone by id
    pub fn milestone(&self, id: Uuid) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }
}

/// Builder for [`Goal`] with structural validation
#[derive(Debug, Default)]
pub struct GoalBuilder {
    title: Option<String>,
    description: Option<String>,
    timeframe: Option<Timeframe>,
    milestones: Vec<Milestone>,
}

impl GoalBuilder {
    /// Set the goal title (required, non-empty)
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the optional description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the timeframe (defaults to one year)
    pub fn timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    /// Append a milestone
    pub fn add_milestone(mut self, milestone: Milestone) -> Self {
        self.milestones.push(milestone);
        self
    }

    /// Validate and construct the goal
    pub fn build(self) -> Result<Goal, ValidationError> {
        let title = self.title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        Ok(Goal {
            id: Uuid::new_v4(),
            title,
            description: self.description,
            timeframe: self.timeframe.unwrap_or(Timeframe::OneYear),
            created_at: now(),
            milestones: self.milestones,
        })
    }
}
