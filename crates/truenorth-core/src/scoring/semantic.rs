//! Semantic rule matching via domain keyword clusters
//!
//! A richer heuristic than raw token overlap: each cluster pairs a
//! task-side keyword set with a goal-side keyword set, plus specific
//! keyword combinations that earn a higher fixed score than generic
//! cluster membership. Used when no model is available, or as a cheap
//! pre-filter in front of it.
//!
//! # Tie-break
//!
//! When two goals end up with the same score, the first goal encountered
//! in input order wins. No deeper tie-break exists; the choice is
//! documented here and pinned by test rather than silently varied.

use crate::error::ScoringError;
use crate::model::{Alignment, AlignmentTarget, Goal, Milestone};
use crate::scoring::ScoringStrategy;
use async_trait::async_trait;

/// Score for a specific paired keyword combination (e.g. shoes + marathon)
const PAIRED_STRONG: u8 = 90;

/// Score for the secondary paired combination
const PAIRED_MEDIUM: u8 = 85;

/// Score for generic cluster membership
const CLUSTER_BASE: u8 = 70;

/// One domain cluster: task keywords, goal keywords, and paired boosts
struct Cluster {
    name: &'static str,
    task_keywords: &'static [&'static str],
    goal_keywords: &'static [&'static str],
    /// (task keyword, goal keyword, score) pairs checked before the base score
    boosts: &'static [(&'static str, &'static str, u8)],
}

/// Cluster table, evaluated in order; a later matching cluster overrides
/// an earlier one's score for the same goal (kept from the source).
const CLUSTERS: &[Cluster] = &[
    Cluster {
        name: "running",
        task_keywords: &[
            "run",
            "jog",
            "marathon",
            "running",
            "shoes",
            "sneakers",
            "exercise",
        ],
        goal_keywords: &["marathon", "run", "running", "jog", "race"],
        boosts: &[
            ("shoes", "marathon", PAIRED_STRONG),
            ("running", "marathon", PAIRED_MEDIUM),
        ],
    },
    Cluster {
        name: "design-system",
        task_keywords: &["design", "token", "system", "ui", "component", "spark"],
        goal_keywords: &["design system", "spark", "design"],
        boosts: &[
            ("design", "design system", PAIRED_STRONG),
            ("token", "design", PAIRED_MEDIUM),
        ],
    },
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Cluster score for one task/goal pair, 0 when no cluster matches
///
/// Substring matching on lower-cased text, like the rest of the keyword
/// heuristics in this crate's lineage.
pub fn cluster_score(task_title: &str, goal_title: &str) -> u8 {
    let task = task_title.to_lowercase();
    let goal = goal_title.to_lowercase();
    let mut score = 0;

    for cluster in CLUSTERS {
        if contains_any(&task, cluster.task_keywords) && contains_any(&goal, cluster.goal_keywords)
        {
            let boosted = cluster
                .boosts
                .iter()
                .find(|(task_kw, goal_kw, _)| task.contains(task_kw) && goal.contains(goal_kw))
                .map(|(_, _, s)| *s);

            // Later clusters overwrite earlier ones, they do not max
            score = boosted.unwrap_or(CLUSTER_BASE);
            tracing::debug!(cluster = cluster.name, score, "cluster matched");
        }
    }

    score
}

/// Pick the goal most related to a task, or `None` when no cluster matches
///
/// Highest cluster score wins; exact ties resolve to the first goal in
/// input order (see module docs).
pub fn match_best_goal<'a>(task_title: &str, goals: &'a [Goal]) -> Option<&'a Goal> {
    let mut matches: Vec<(&Goal, u8)> = goals
        .iter()
        .filter_map(|goal| {
            let score = cluster_score(task_title, &goal.title);
            (score > 0).then_some((goal, score))
        })
        .collect();

    // Stable sort: equal scores keep input order
    matches.sort_by(|a, b| b.1.cmp(&a.1));
    matches.first().map(|(goal, _)| *goal)
}

/// Keyword-cluster scoring strategy
///
/// Clusters relate task text to goal titles, so a milestone inherits its
/// parent goal's cluster score. The milestone still determines the
/// alignment target: one call per target must yield one distinct target,
/// or applying the results to a task would collapse them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticRuleMatcher;

#[async_trait]
impl ScoringStrategy for SemanticRuleMatcher {
    async fn score_target(
        &self,
        task_title: &str,
        goal: &Goal,
        milestone: Option<&Milestone>,
    ) -> Result<Alignment, ScoringError> {
        let score = cluster_score(task_title, &goal.title);
        let target = match milestone {
            Some(m) => AlignmentTarget::Milestone(m.id),
            None => AlignmentTarget::Goal(goal.id),
        };
        Ok(Alignment::new(target, score as i64, ""))
    }

    fn name(&self) -> &'static str {
        "semantic-rule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(title: &str) -> Goal {
        Goal::builder().title(title).build().unwrap()
    }

    #[test]
    fn test_paired_boosts() {
        assert_eq!(
            cluster_score("Buy running shoes", "Complete first marathon"),
            PAIRED_STRONG
        );
        assert_eq!(
            cluster_score("Morning running drills", "Complete first marathon"),
            PAIRED_MEDIUM
        );
        assert_eq!(
            cluster_score("Design the onboarding flow", "Ship the Spark design system"),
            PAIRED_STRONG
        );
        assert_eq!(
            cluster_score("Audit token usage", "Redesign brand assets"),
            PAIRED_MEDIUM
        );
    }

    #[test]
    fn test_generic_cluster_membership() {
        assert_eq!(cluster_score("Evening jog", "Finish a 10k race"), CLUSTER_BASE);
        assert_eq!(cluster_score("Refactor UI widgets", "Spark rollout"), CLUSTER_BASE);
    }

    #[test]
    fn test_no_cluster_no_score() {
        assert_eq!(cluster_score("File tax paperwork", "Complete first marathon"), 0);
        assert_eq!(cluster_score("Evening jog", "Learn Spanish"), 0);
    }

    #[test]
    fn test_best_goal_by_score() {
        let goals = vec![
            goal("Learn Spanish"),
            goal("Run a 5k race"),
            goal("Complete first marathon"),
        ];

        // shoes+marathon (90) beats generic running membership (70)
        let best = match_best_goal("Buy running shoes", &goals).unwrap();
        assert_eq!(best.title, "Complete first marathon");
    }

    #[test]
    fn test_no_match_returns_none() {
        let goals = vec![goal("Learn Spanish")];
        assert!(match_best_goal("Buy running shoes", &goals).is_none());
        assert!(match_best_goal("Evening jog", &[]).is_none());
    }

    // A milestone call must come back milestone-targeted, even though the
    // score derives from the parent goal's title.
    #[tokio::test]
    async fn test_milestone_call_targets_the_milestone() {
        let milestone = Milestone::new("Base training", "", 5, vec![]).unwrap();
        let m_id = milestone.id;
        let goal = Goal::builder()
            .title("Complete first marathon")
            .add_milestone(milestone)
            .build()
            .unwrap();

        let a = SemanticRuleMatcher
            .score_target("Buy running shoes", &goal, Some(&goal.milestones[0]))
            .await
            .unwrap();
        assert_eq!(a.target, AlignmentTarget::Milestone(m_id));
        assert_eq!(a.score, PAIRED_STRONG);

        let a = SemanticRuleMatcher
            .score_target("Buy running shoes", &goal, None)
            .await
            .unwrap();
        assert_eq!(a.target, AlignmentTarget::Goal(goal.id));
    }

    // Pins the documented tie-break: equal scores resolve to input order.
    #[test]
    fn test_exact_tie_returns_first_in_input_order() {
        let goals = vec![goal("Run a 5k race"), goal("Weekly jog challenge")];
        // Both match the running cluster generically at the same score
        assert_eq!(
            cluster_score("Evening exercise", &goals[0].title),
            cluster_score("Evening exercise", &goals[1].title)
        );

        let best = match_best_goal("Evening exercise", &goals).unwrap();
        assert_eq!(best.id, goals[0].id);
    }
}
