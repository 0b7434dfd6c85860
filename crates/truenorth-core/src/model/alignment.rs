//! Alignment - a scored relationship between a task and a goal or milestone

use crate::types::clamp_score;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an alignment score refers to
///
/// A scoring result always targets either a goal directly or one of its
/// milestones; the enum makes the distinction unambiguous in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum AlignmentTarget {
    /// The alignment targets a goal as a whole
    Goal(Uuid),

    /// The alignment targets a specific milestone
    Milestone(Uuid),
}

impl AlignmentTarget {
    /// The id of the referenced goal or milestone
    pub fn id(&self) -> Uuid {
        match self {
            AlignmentTarget::Goal(id) | AlignmentTarget::Milestone(id) => *id,
        }
    }
}

/// A scored relationship between a task and a target
///
/// # Invariants
///
/// - `score` is always in `[0, 100]`; construction clamps
/// - A task holds at most one alignment per distinct target (enforced by
///   [`Task::upsert_alignment`](crate::model::Task::upsert_alignment))
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    /// The goal or milestone this score refers to
    pub target: AlignmentTarget,

    /// Alignment strength, 0-100
    pub score: u8,

    /// Free-text explanation of the score (may be empty)
    pub explanation: String,
}

impl Alignment {
    /// Create a new alignment, clamping the raw score into [0, 100]
    pub fn new(target: AlignmentTarget, score: i64, explanation: impl Into<String>) -> Self {
        Self {
            target,
            score: clamp_score(score),
            explanation: explanation.into(),
        }
    }

    /// Whether this alignment carries any signal at all
    pub fn is_positive(&self) -> bool {
        self.score > 0
    }
}
