//! E2E Test: Alignment Engine
//!
//! Tests the full scoring pipeline from task text through concurrent
//! model-backed alignment to goal progress, using stub completion
//! transports in place of the network.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use truenorth_core::aggregator::{AlignmentAggregator, Strategy};
use truenorth_core::classify::classify_category;
use truenorth_core::model::{Alignment, AlignmentTarget, Goal, Milestone, Task};
use truenorth_core::progress::{compute_goal_progress, simple_goal_progress};
use truenorth_core::scoring::{CompletionClient, CompletionRequest, LlmConfig, LlmScorer};
use truenorth_core::types::{Category, Timeframe};
use truenorth_core::ScoringError;

/// Stub transport that answers by goal title found in the prompt, with a
/// per-goal artificial delay so completion order differs from input order.
struct ScriptedClient {
    /// (needle in prompt, delay, response)
    script: Vec<(&'static str, Duration, String)>,
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ScoringError> {
        for (needle, delay, response) in &self.script {
            if request.user.contains(needle) {
                tokio::time::sleep(*delay).await;
                return Ok(response.clone());
            }
        }
        Err(ScoringError::Unavailable("no scripted response".to_string()))
    }
}

fn marathon_goal() -> Goal {
    Goal::builder()
        .title("Complete first marathon")
        .timeframe(Timeframe::OneYear)
        .add_milestone(
            Milestone::new(
                "Base training",
                "Run consistently every week",
                5,
                vec!["go for a run".to_string(), "buy running shoes".to_string()],
            )
            .unwrap(),
        )
        .add_milestone(
            Milestone::new("Race day prep", "Logistics and gear", 3, vec![]).unwrap(),
        )
        .build()
        .unwrap()
}

fn spanish_goal() -> Goal {
    Goal::builder()
        .title("Learn Spanish")
        .timeframe(Timeframe::ThreeYear)
        .build()
        .unwrap()
}

fn reading_goal() -> Goal {
    Goal::builder()
        .title("Read 20 books")
        .timeframe(Timeframe::OneYear)
        .build()
        .unwrap()
}

/// E2E: model-backed scoring across three goals, results in input order
/// even though completions finish out of order.
#[tokio::test]
async fn e2e_model_scoring_preserves_input_order() {
    let client = ScriptedClient {
        script: vec![
            (
                "Complete first marathon",
                Duration::from_millis(120),
                "Score: 85\nExplanation: Core running activity".to_string(),
            ),
            (
                "Learn Spanish",
                Duration::from_millis(5),
                "Score: 10\nExplanation: Unrelated".to_string(),
            ),
            (
                "Read 20 books",
                Duration::from_millis(60),
                "Score: 30\nExplanation: Builds discipline".to_string(),
            ),
        ],
    };

    let scorer = LlmScorer::new(Arc::new(client), LlmConfig::default());
    let aggregator = AlignmentAggregator::new(Strategy::Llm(scorer));

    let goals = vec![marathon_goal(), spanish_goal(), reading_goal()];
    let alignments = aggregator.align_task("Morning run", &goals, false).await;

    // All three scored above zero; order tracks the input goal order
    assert_eq!(alignments.len(), 3);
    assert_eq!(alignments[0].target, AlignmentTarget::Goal(goals[0].id));
    assert_eq!(alignments[0].score, 85);
    assert_eq!(alignments[0].explanation, "Core running activity");
    assert_eq!(alignments[1].target, AlignmentTarget::Goal(goals[1].id));
    assert_eq!(alignments[1].score, 10);
    assert_eq!(alignments[2].target, AlignmentTarget::Goal(goals[2].id));
    assert_eq!(alignments[2].score, 30);
}

/// E2E: a timeout on one of three goals must not prevent scores for the
/// other two.
#[tokio::test]
async fn e2e_single_timeout_does_not_poison_batch() {
    let client = ScriptedClient {
        script: vec![
            (
                "Complete first marathon",
                // Far beyond the configured deadline
                Duration::from_secs(30),
                "Score: 85\nExplanation: never arrives".to_string(),
            ),
            (
                "Learn Spanish",
                Duration::from_millis(1),
                "Score: 15\nExplanation: Slightly related".to_string(),
            ),
            (
                "Read 20 books",
                Duration::from_millis(1),
                "Score: 40\nExplanation: Supportive habit".to_string(),
            ),
        ],
    };

    let config = LlmConfig::default().with_timeout_ms(200);
    let scorer = LlmScorer::new(Arc::new(client), config);
    let aggregator = AlignmentAggregator::new(Strategy::Llm(scorer));

    let goals = vec![marathon_goal(), spanish_goal(), reading_goal()];
    let task = Task::new("Morning run", Category::Health);
    let results = aggregator.realign_all(std::slice::from_ref(&task), &goals, false).await;

    assert_eq!(results.len(), 1);
    let realignment = &results[0];

    // The timed-out target degraded (score 0, filtered); the others scored
    assert!(realignment.degraded());
    assert_eq!(realignment.fallback_count, 1);
    assert_eq!(realignment.alignments.len(), 2);
    assert_eq!(
        realignment.alignments[0].target,
        AlignmentTarget::Goal(goals[1].id)
    );
    assert_eq!(
        realignment.alignments[1].target,
        AlignmentTarget::Goal(goals[2].id)
    );
}

/// E2E: under the composite strategy, an unreachable model substitutes the
/// heuristic score instead of dropping the target.
#[tokio::test]
async fn e2e_composite_substitutes_heuristic_on_failure() {
    // No scripted responses at all: every call is Unavailable
    let client = ScriptedClient { script: vec![] };
    let config = LlmConfig::default().with_timeout_ms(200);
    let scorer = LlmScorer::new(Arc::new(client), config);
    let aggregator = AlignmentAggregator::new(Strategy::Composite(scorer));

    let goals = vec![marathon_goal()];
    let m_id = goals[0].milestones[0].id;
    let alignments = aggregator.align_task("go for a run", &goals, true).await;

    // Heuristic substitute: exact suggested-task match on "Base training"
    assert_eq!(alignments.len(), 1);
    assert_eq!(alignments[0].target, AlignmentTarget::Milestone(m_id));
    assert_eq!(alignments[0].score, 100);
}

/// E2E: classify -> align -> persist -> progress, the full task lifecycle.
#[tokio::test]
async fn e2e_task_lifecycle_to_goal_progress() {
    let goal = marathon_goal();
    let aggregator = AlignmentAggregator::new(Strategy::Heuristic);

    // 1. User submits a task; the UI layer classifies and scores it
    let title = "Buy running shoes";
    let category = classify_category(title);
    assert_eq!(category, Category::Errands); // "buy" outranks "shoes"

    let mut task = Task::new(title, category);
    let alignments = aggregator
        .align_task(&task.title, std::slice::from_ref(&goal), true)
        .await;
    task.replace_alignments(alignments);

    // Scored against "Base training" via its suggested tasks
    let m_id = goal.milestones[0].id;
    assert!(task
        .alignment_for(AlignmentTarget::Milestone(m_id))
        .is_some());

    // 2. Nothing completed yet: aligned but zero progress
    let report = compute_goal_progress(&goal, std::slice::from_ref(&task));
    assert_eq!(report.total_progress, 0);
    assert_eq!(report.milestones[0].aligned_tasks.len(), 1);

    // 3. Completing the task moves the weighted total
    task.set_completed(true);
    let report = compute_goal_progress(&goal, std::slice::from_ref(&task));
    assert!(report.total_progress > 0);
    assert!(report.total_progress <= 100);

    // Milestone with weight 5 fully completed at alignment 100,
    // weight-3 milestone untouched: round(500/8) = 63
    assert_eq!(report.milestones[0].progress, 100.0);
    assert_eq!(report.total_progress, 63);
}

/// E2E: goal deletion invalidates alignments; simple progress honors the
/// relevance threshold.
#[tokio::test]
async fn e2e_goal_deletion_and_simple_progress() {
    let goal = spanish_goal();
    let other = reading_goal();

    let mut relevant = Task::new("Practice flashcards", Category::Learning);
    relevant.set_completed(true);
    relevant.upsert_alignment(Alignment::new(AlignmentTarget::Goal(goal.id), 80, ""));

    let mut marginal = Task::new("Water the plants", Category::Other);
    marginal.upsert_alignment(Alignment::new(AlignmentTarget::Goal(goal.id), 10, ""));

    let tasks = vec![relevant.clone(), marginal];

    // Only the >= 25 task counts: 1 aligned, 1 completed
    assert_eq!(simple_goal_progress(goal.id, &tasks), 100);
    assert_eq!(simple_goal_progress(other.id, &tasks), 0);

    // Deleting the goal strips its alignment records
    relevant.invalidate_goal(&goal);
    assert!(relevant.alignments.is_empty());
}
