//! Heuristic alignment scoring via lexical token overlap
//!
//! An intentionally crude bag-of-tokens estimate: fast, deterministic, no
//! I/O. Acceptable for client-side estimation and as the degraded fallback
//! when the model service is unavailable - never for authoritative scoring.

use crate::error::ScoringError;
use crate::model::{Alignment, AlignmentTarget, Goal, Milestone};
use crate::scoring::ScoringStrategy;
use async_trait::async_trait;

/// Similarity of a task title against one suggested-task anchor, in [0, 1]
///
/// Counts task tokens that have a substring relationship (either direction)
/// with some suggestion token, divided by the larger token count of the two
/// strings. Both sides are expected lower-cased already.
fn suggestion_similarity(task_tokens: &[&str], suggestion: &str) -> f64 {
    let suggestion_tokens: Vec<&str> = suggestion.split_whitespace().collect();
    if task_tokens.is_empty() || suggestion_tokens.is_empty() {
        return 0.0;
    }

    let matching = task_tokens
        .iter()
        .filter(|word| {
            suggestion_tokens
                .iter()
                .any(|sug| sug.contains(**word) || word.contains(sug))
        })
        .count();

    matching as f64 / task_tokens.len().max(suggestion_tokens.len()) as f64
}

/// Score a task title against a milestone's suggested-task anchors
///
/// The score is `100 x` the best per-suggestion similarity. A milestone
/// with no suggested tasks scores 0.
pub fn score_against_milestone(task_title: &str, milestone: &Milestone) -> u8 {
    let task_lower = task_title.to_lowercase();
    let task_tokens: Vec<&str> = task_lower.split_whitespace().collect();

    let best = milestone
        .suggested_tasks
        .iter()
        .map(|s| suggestion_similarity(&task_tokens, &s.to_lowercase()))
        .fold(0.0_f64, f64::max);

    (best * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Score a task title against a whole goal
///
/// A goal has no suggested-task anchors of its own, so this takes the best
/// milestone score; for a milestone-less goal the goal title itself serves
/// as the single anchor.
pub fn score_against_goal(task_title: &str, goal: &Goal) -> u8 {
    if goal.milestones.is_empty() {
        let task_lower = task_title.to_lowercase();
        let task_tokens: Vec<&str> = task_lower.split_whitespace().collect();
        let sim = suggestion_similarity(&task_tokens, &goal.title.to_lowercase());
        return (sim * 100.0).round().clamp(0.0, 100.0) as u8;
    }

    goal.milestones
        .iter()
        .map(|m| score_against_milestone(task_title, m))
        .max()
        .unwrap_or(0)
}

/// Deterministic token-overlap scoring strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

#[async_trait]
impl ScoringStrategy for HeuristicScorer {
    async fn score_target(
        &self,
        task_title: &str,
        goal: &Goal,
        milestone: Option<&Milestone>,
    ) -> Result<Alignment, ScoringError> {
        let (target, score) = match milestone {
            Some(m) => (
                AlignmentTarget::Milestone(m.id),
                score_against_milestone(task_title, m),
            ),
            None => (
                AlignmentTarget::Goal(goal.id),
                score_against_goal(task_title, goal),
            ),
        };

        Ok(Alignment::new(target, score as i64, ""))
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timeframe;

    fn training_milestone() -> Milestone {
        Milestone::new(
            "Base training",
            "Run consistently every week",
            5,
            vec!["go for a run".to_string(), "buy running shoes".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_morning_run_token_overlap() {
        // "morning run" vs "go for a run": only "run" matches, 1/4 = 0.25
        // "morning run" vs "buy running shoes": "run" is a substring of
        // "running", 1/3 ~ 0.333 - the max, so the score is 33
        let score = score_against_milestone("Morning Run", &training_milestone());
        assert_eq!(score, 33);
    }

    #[test]
    fn test_exact_suggestion_scores_100() {
        let score = score_against_milestone("go for a run", &training_milestone());
        assert_eq!(score, 100);
    }

    #[test]
    fn test_no_suggestions_scores_zero() {
        let m = Milestone::new("Base training", "", 5, vec![]).unwrap();
        assert_eq!(score_against_milestone("Morning Run", &m), 0);
    }

    #[test]
    fn test_empty_task_title_scores_zero() {
        assert_eq!(score_against_milestone("", &training_milestone()), 0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        // Deliberately avoids the letter "a": the one-letter token in
        // "go for a run" substring-matches any word containing it.
        let score = score_against_milestone("Fix printer driver", &training_milestone());
        assert_eq!(score, 0);
    }

    #[test]
    fn test_goal_score_takes_best_milestone() {
        let weak = Milestone::new("Stretching", "", 1, vec!["daily stretch".to_string()]).unwrap();
        let goal = Goal::builder()
            .title("Run a marathon")
            .timeframe(Timeframe::OneYear)
            .add_milestone(weak)
            .add_milestone(training_milestone())
            .build()
            .unwrap();

        assert_eq!(score_against_goal("go for a run", &goal), 100);
    }

    #[test]
    fn test_milestone_less_goal_uses_title() {
        let goal = Goal::builder().title("Run a marathon").build().unwrap();
        // "run a marathon" vs "run a marathon": full overlap
        assert_eq!(score_against_goal("run a marathon", &goal), 100);
        assert_eq!(score_against_goal("fix printer driver", &goal), 0);
    }

    #[tokio::test]
    async fn test_strategy_targets_milestone_when_given() {
        let m = training_milestone();
        let m_id = m.id;
        let goal = Goal::builder()
            .title("Run a marathon")
            .add_milestone(m)
            .build()
            .unwrap();

        let scorer = HeuristicScorer;
        let milestone = goal.milestone(m_id).unwrap();
        let a = scorer
            .score_target("go for a run", &goal, Some(milestone))
            .await
            .unwrap();
        assert_eq!(a.target, AlignmentTarget::Milestone(m_id));
        assert_eq!(a.score, 100);

        let a = scorer.score_target("go for a run", &goal, None).await.unwrap();
        assert_eq!(a.target, AlignmentTarget::Goal(goal.id));
    }
}
