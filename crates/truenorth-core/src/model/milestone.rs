//! Milestone - a weighted sub-objective of a goal
//!
//! Milestones carry suggested example tasks that the heuristic scorer uses
//! as anchors when estimating how well a free-text task matches.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum accepted milestone weight
pub const MIN_WEIGHT: u8 = 1;

/// Maximum accepted milestone weight
pub const MAX_WEIGHT: u8 = 5;

/// A weighted sub-objective of a goal
///
/// # Invariants
///
/// - `weight` is in `[1, 5]`; construction rejects anything else with
///   [`ValidationError::InvalidMilestoneWeight`]
/// - `title` is non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier
    pub id: Uuid,

    /// Short milestone name
    pub title: String,

    /// Longer description of what achieving this milestone means
    pub description: String,

    /// Relative importance within the parent goal [1, 5]
    pub weight: u8,

    /// Whether the milestone itself has been marked done
    pub completed: bool,

    /// Example tasks used as scoring anchors
    ///
    /// The heuristic scorer compares task titles against these strings; a
    /// milestone with no suggestions always scores 0 on the heuristic path.
    #[serde(rename = "suggestedTasks")]
    pub suggested_tasks: Vec<String>,
}

impl Milestone {
    /// Create a new milestone, validating the weight and title
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        weight: i64,
        suggested_tasks: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if weight < MIN_WEIGHT as i64 || weight > MAX_WEIGHT as i64 {
            return Err(ValidationError::InvalidMilestoneWeight(weight));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description: description.into(),
            weight: weight as u8,
            completed: false,
            suggested_tasks,
        })
    }

    /// Mark the milestone completed or not
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
