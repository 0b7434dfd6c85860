//! TrueNorth Core - the Alignment & Progress Engine
//!
//! TrueNorth Core decides how strongly a free-text task relates to a
//! user-defined goal (and its weighted milestones), and aggregates many
//! such per-task scores into a single goal-completion percentage. The
//! surrounding UI and storage layers are external collaborators: they
//! supply immutable Task/Goal snapshots and persist whatever the engine
//! returns.
//!
//! # Architecture
//!
//! The engine is built from six components, leaf-first:
//!
//! 1. **CategoryClassifier** (`classify`): keyword rules mapping task text to one coarse category
//! 2. **HeuristicScorer** (`scoring::heuristic`): deterministic token-overlap scoring, no I/O
//! 3. **SemanticRuleMatcher** (`scoring::semantic`): keyword-cluster goal matching with paired boosts
//! 4. **LlmScorer** (`scoring::llm`): rubric-prompted model scoring over a pluggable transport
//! 5. **AlignmentAggregator** (`aggregator`): concurrent fan-out, fallback, filtering, ordering
//! 6. **GoalProgressCalculator** (`progress`): weighted milestone progress and goal percentage
//!
//! # Quick Start
//!
//! ```
//! use truenorth_core::aggregator::{AlignmentAggregator, Strategy};
//! use truenorth_core::classify::classify_category;
//! use truenorth_core::model::{Goal, Milestone, Task};
//! use truenorth_core::progress::compute_goal_progress;
//! use truenorth_core::types::{Category, Timeframe};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! // Define a goal with one weighted milestone
//! let goal = Goal::builder()
//!     .title("Complete first marathon")
//!     .timeframe(Timeframe::OneYear)
//!     .add_milestone(
//!         Milestone::new("Base training", "Run consistently", 5,
//!             vec!["go for a run".to_string()]).unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! // Classify and score a new task
//! let category = classify_category("Morning run");
//! assert_eq!(category, Category::Health);
//!
//! let aggregator = AlignmentAggregator::new(Strategy::Heuristic);
//! let alignments = aggregator.align_task("go for a run", &[goal.clone()], true).await;
//! assert_eq!(alignments[0].score, 100);
//!
//! // Apply the alignments and compute progress
//! let mut task = Task::new("go for a run", category);
//! task.replace_alignments(alignments);
//! task.set_completed(true);
//!
//! let report = compute_goal_progress(&goal, &[task]);
//! assert_eq!(report.total_progress, 100);
//! # }
//! ```
//!
//! # Design Principles
//!
//! 1. **One strategy seam**: heuristic, rule-based, and model-backed scoring
//!    live behind a single capability selected by configuration
//! 2. **Degrade, never fail**: an unreachable model service produces a
//!    heuristic or zero score, not an error out of the public API
//! 3. **Immutable snapshots in, derived data out**: the engine never mutates
//!    caller-owned collections
//! 4. **Clamped everywhere**: every stored score is an integer in [0, 100]

#![deny(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod aggregator;
pub mod classify;
pub mod error;
pub mod model;
pub mod planner;
pub mod progress;
pub mod scoring;
pub mod types;

// Re-export commonly used types for convenience
pub use aggregator::{AlignmentAggregator, Strategy, TaskRealignment};
pub use classify::classify_category;
pub use error::{EngineError, Result, ScoringError, ValidationError};
pub use model::{Alignment, AlignmentTarget, Goal, Milestone, Task};
pub use planner::MilestonePlanner;
pub use progress::{compute_goal_progress, simple_goal_progress, ProgressReport};
pub use scoring::{
    CompletionClient, HeuristicScorer, LlmConfig, LlmScorer, OpenAiClient, SemanticRuleMatcher,
};
pub use types::{Category, Timeframe, Timestamp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
