//! Milestone planning - model-generated action plans for a goal
//!
//! Asks the completion service for a structured set of 5-7 weighted
//! milestones (with suggested tasks the heuristic scorer can later anchor
//! on) and validates every milestone through the weight-checked
//! constructor. A bad weight rejects that milestone, not the whole batch.

use crate::error::ScoringError;
use crate::model::Milestone;
use crate::scoring::{CompletionClient, CompletionRequest, LlmConfig};
use crate::types::Timeframe;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct PlanResponse {
    #[serde(default)]
    milestones: Vec<PlannedMilestone>,
}

#[derive(Debug, Deserialize)]
struct PlannedMilestone {
    title: String,
    #[serde(default)]
    description: String,
    weight: i64,
    #[serde(default, rename = "suggestedTasks")]
    suggested_tasks: Vec<String>,
}

/// Generates weighted milestone plans through the model service
#[derive(Clone)]
pub struct MilestonePlanner {
    client: Arc<dyn CompletionClient>,
    config: LlmConfig,
}

impl std::fmt::Debug for MilestonePlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MilestonePlanner")
            .field("config", &self.config)
            .finish()
    }
}

impl MilestonePlanner {
    /// Create a planner over the given transport
    pub fn new(client: Arc<dyn CompletionClient>, config: LlmConfig) -> Self {
        Self { client, config }
    }

    /// Generate a milestone plan for a goal
    ///
    /// Milestones with invalid weights or empty titles are dropped with a
    /// warning; the rest of the plan survives. Transport failures and
    /// unparsable plan payloads surface as [`ScoringError::Unavailable`].
    pub async fn generate_milestones(
        &self,
        goal_title: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<Milestone>, ScoringError> {
        let request = CompletionRequest {
            system: "You are a goal-setting and achievement expert.".to_string(),
            user: build_plan_prompt(goal_title, timeframe),
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: None,
            json_response: true,
        };

        let deadline = Duration::from_millis(self.config.timeout_ms);
        let raw = match tokio::time::timeout(deadline, self.client.complete(&request)).await {
            Ok(result) => result?,
            Err(_) => return Err(ScoringError::Timeout(self.config.timeout_ms)),
        };

        let plan: PlanResponse = serde_json::from_str(raw.trim())
            .map_err(|e| ScoringError::Unavailable(format!("unparsable plan payload: {}", e)))?;

        let mut milestones = Vec::with_capacity(plan.milestones.len());
        for planned in plan.milestones {
            match Milestone::new(
                planned.title,
                planned.description,
                planned.weight,
                planned.suggested_tasks,
            ) {
                Ok(milestone) => milestones.push(milestone),
                Err(e) => {
                    tracing::warn!(error = %e, "dropping invalid planned milestone");
                }
            }
        }

        tracing::info!(
            goal = goal_title,
            count = milestones.len(),
            "milestone plan generated"
        );

        Ok(milestones)
    }
}

fn build_plan_prompt(goal_title: &str, timeframe: Timeframe) -> String {
    format!(
        "Create a structured action plan for the goal: \"{}\" within a {} timeframe.\n\n\
         Format the response as JSON with the following structure:\n\
         {{\n\
           \"milestones\": [\n\
             {{\n\
               \"title\": \"milestone name\",\n\
               \"description\": \"detailed description\",\n\
               \"weight\": number between 1-5 representing importance,\n\
               \"suggestedTasks\": [\"list\", \"of\", \"related\", \"daily/weekly\", \"tasks\"]\n\
             }}\n\
           ]\n\
         }}\n\n\
         Make the milestones specific, measurable, and actionable.\n\
         Include 5-7 key milestones.\n\
         For suggestedTasks, include common tasks that would align with this milestone.",
        goal_title, timeframe
    )
}
