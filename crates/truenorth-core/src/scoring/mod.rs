//! Scoring strategies - how strongly does a task relate to a target?
//!
//! The source history of this engine grew three parallel, inconsistent
//! scoring paths (plain token overlap, keyword-cluster matching, and
//! model-prompted scoring). They are unified here behind one polymorphic
//! capability, [`ScoringStrategy`], so the aggregator selects by
//! configuration instead of duplicating call sites:
//!
//! - [`HeuristicScorer`] - deterministic token overlap, never suspends
//! - [`SemanticRuleMatcher`] - keyword clusters with paired boosts
//! - [`LlmScorer`] - rubric-prompted model scoring over a
//!   [`CompletionClient`] transport

pub mod heuristic;
pub mod llm;
pub mod semantic;

pub use heuristic::HeuristicScorer;
pub use llm::{
    parse_model_response, CompletionClient, CompletionRequest, LlmConfig, LlmScorer, OpenAiClient,
    ParsedScore, ResponseFormat,
};
pub use semantic::SemanticRuleMatcher;

use crate::error::ScoringError;
use crate::model::{Alignment, Goal, Milestone};
use async_trait::async_trait;

/// A selectable scoring algorithm
///
/// Scores one task title against one target: a goal, optionally narrowed to
/// one of its milestones. Implementations must clamp scores to [0, 100] and
/// must not mutate their inputs.
#[async_trait]
pub trait ScoringStrategy: Send + Sync {
    /// Score a task against a goal (or one of its milestones)
    ///
    /// An `Err` here always means "scoring temporarily impossible", never
    /// "the task does not align" - non-alignment is a score of 0.
    async fn score_target(
        &self,
        task_title: &str,
        goal: &Goal,
        milestone: Option<&Milestone>,
    ) -> Result<Alignment, ScoringError>;

    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Whether repeated calls with identical input yield identical output
    fn is_deterministic(&self) -> bool {
        true
    }
}
