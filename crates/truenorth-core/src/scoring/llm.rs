//! Model-backed alignment scoring
//!
//! Formats a rubric-bound prompt, invokes a chat-completion service through
//! the [`CompletionClient`] seam, and parses a structured score and
//! explanation out of whatever text comes back.
//!
//! Two response shapes are supported and must both parse without error:
//! a strict JSON object `{alignmentScore, bestAlignedGoal, explanation}`,
//! or a `Score: <0-100>` / `Explanation: <text>` line pair. Anything
//! unparsable degrades to score 0 - this layer never throws on malformed
//! model output. Transport failures (network, HTTP, timeout) surface as
//! [`ScoringError`] so the aggregator can substitute the heuristic scorer.

use crate::error::ScoringError;
use crate::model::{Alignment, AlignmentTarget, Goal, Milestone};
use crate::scoring::ScoringStrategy;
use crate::types::clamp_score;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default OpenAI-compatible endpoint base
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Shape the model is instructed to answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Strict JSON object `{alignmentScore, bestAlignedGoal, explanation}`
    JsonObject,

    /// `Score: <0-100>` and `Explanation: <text>` lines
    TextFields,
}

/// Configuration for model-backed scoring
///
/// Low `temperature` is part of the contract, not incidental: scoring
/// should be near-deterministic across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat model identifier
    pub model: String,

    /// Decoding temperature (keep low for reproducibility)
    pub temperature: f32,

    /// Completion token cap
    pub max_tokens: Option<u32>,

    /// Response shape requested from the model
    pub response_format: ResponseFormat,

    /// Per-call deadline in milliseconds
    pub timeout_ms: u64,

    /// Maximum concurrent in-flight scoring calls
    pub max_concurrency: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: Some(300),
            response_format: ResponseFormat::TextFields,
            timeout_ms: 10_000,
            max_concurrency: 4,
        }
    }
}

impl LlmConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the response format
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the fan-out concurrency cap
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }
}

/// One completion request to the model service
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System message
    pub system: String,
    /// User message
    pub user: String,
    /// Model identifier
    pub model: String,
    /// Decoding temperature
    pub temperature: f32,
    /// Completion token cap
    pub max_tokens: Option<u32>,
    /// Whether to request a strict JSON object response
    pub json_response: bool,
}

/// Transport to a chat-completion service
///
/// The engine owns prompts and parsing; implementations own the wire. Tests
/// substitute stub clients, production uses [`OpenAiClient`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return the assistant message text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ScoringError>;
}

/// `reqwest`-backed client for OpenAI-compatible chat endpoints
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the key
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAiClient {
    /// Create a client for the default OpenAI endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client for a custom OpenAI-compatible endpoint
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ScoringError> {
        let mut body = serde_json::json!({
            "model": request.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "temperature": request.temperature,
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = max_tokens.into();
        }
        if request.json_response {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScoringError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScoringError::Unavailable(format!(
                "completion endpoint returned HTTP {}",
                response.status()
            )));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ScoringError::Unavailable(e.to_string()))?;

        let content = value["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        if content.is_empty() {
            return Err(ScoringError::Unavailable(
                "completion response carried no content".to_string(),
            ));
        }

        Ok(content)
    }
}

/// A score and explanation recovered from model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScore {
    /// Clamped alignment score
    pub score: u8,
    /// Goal title the model considered best aligned, when it said so
    pub best_aligned_goal: Option<String>,
    /// Explanation text (empty when the model gave none)
    pub explanation: String,
}

lazy_static! {
    static ref SCORE_RE: Regex = Regex::new(r"(?i)score:\s*(\d+)").unwrap();
    static ref EXPLANATION_RE: Regex = Regex::new(r"(?is)explanation:\s*(.+)").unwrap();
    static ref SCORE_LINE_RE: Regex = Regex::new(r"(?i)score:\s*\d+").unwrap();
}

/// Parse model output in either supported shape
///
/// Resilient by construction: extra whitespace, a missing explanation, or a
/// missing score all produce a usable result (score defaults to 0). This
/// function never fails.
pub fn parse_model_response(raw: &str) -> ParsedScore {
    let trimmed = raw.trim();

    if trimmed.starts_with('{') {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
            let score = value["alignmentScore"]
                .as_i64()
                .or_else(|| value["alignmentScore"].as_f64().map(|f| f.round() as i64))
                .unwrap_or(0);
            let best_aligned_goal = value["bestAlignedGoal"].as_str().map(str::to_string);
            let explanation = value["explanation"].as_str().unwrap_or_default().to_string();

            return ParsedScore {
                score: clamp_score(score),
                best_aligned_goal,
                explanation,
            };
        }
        // Fall through: malformed JSON may still carry Score: lines
    }

    let score = SCORE_RE
        .captures(trimmed)
        .and_then(|c| c[1].parse::<i64>().ok())
        .unwrap_or(0);

    let explanation = EXPLANATION_RE
        .captures(trimmed)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| SCORE_LINE_RE.replace(trimmed, "").trim().to_string());

    ParsedScore {
        score: clamp_score(score),
        best_aligned_goal: None,
        explanation,
    }
}

/// The rubric text embedded verbatim in every scoring prompt
///
/// Reproduced exactly so model behavior stays comparable across runs and
/// providers.
const SCORING_RUBRIC: &str = "Scoring Guide:
80-100: Essential, directly contributes to the goal
40-79: Supportive, but not essential
1-39: Marginally related, minimal impact on goal
0: No meaningful connection to the goal";

const SYSTEM_PROMPT: &str = "You are a strict goal alignment analyzer. Evaluate tasks based solely \
on their direct contribution to achieving the specified goal. Be conservative with scores.";

/// Build the user prompt for one task/target pair
fn build_user_prompt(
    task_title: &str,
    goal: &Goal,
    milestone: Option<&Milestone>,
    format: ResponseFormat,
) -> String {
    let mut prompt = format!(
        "Evaluate how directly this task contributes to achieving the specified goal.\n\n\
         TASK: \"{}\"\n\
         GOAL: \"{}\" ({} timeframe)\n",
        task_title, goal.title, goal.timeframe
    );

    if let Some(description) = &goal.description {
        prompt.push_str(&format!("GOAL DESCRIPTION: {}\n", description));
    }
    if let Some(milestone) = milestone {
        prompt.push_str(&format!(
            "MILESTONE: \"{}\" - {}\n",
            milestone.title, milestone.description
        ));
    }

    prompt.push_str(&format!(
        "\nConsider:\n\
         - Direct Impact: How directly does this task contribute to the goal?\n\
         - Core Skills: Is this a primary skill/activity for the goal?\n\
         - Resource Efficiency: Is this the most effective way to progress toward the goal?\n\n\
         {}\n\n\
         Be very strict in your evaluation. Only score above 20 if the task is clearly \
         supportive and relevant to the core skills needed for the goal.\n\n",
        SCORING_RUBRIC
    ));

    match format {
        ResponseFormat::TextFields => prompt.push_str(
            "Provide your response in this format:\n\
             Score: [0-100]\n\
             Explanation: [Brief explanation of the score]\n",
        ),
        ResponseFormat::JsonObject => prompt.push_str(
            "Return a JSON object with:\n\
             1. alignmentScore (0-100)\n\
             2. bestAlignedGoal (goal title or null)\n\
             3. explanation (brief text explaining the alignment)\n",
        ),
    }

    prompt
}

/// Rubric-prompted scoring strategy over a completion transport
#[derive(Clone)]
pub struct LlmScorer {
    client: Arc<dyn CompletionClient>,
    config: LlmConfig,
}

impl std::fmt::Debug for LlmScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmScorer").field("config", &self.config).finish()
    }
}

impl LlmScorer {
    /// Create a scorer over the given transport
    pub fn new(client: Arc<dyn CompletionClient>, config: LlmConfig) -> Self {
        Self { client, config }
    }

    /// The active configuration
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Score one task/target pair through the model, with timeout
    pub async fn score_via_model(
        &self,
        task_title: &str,
        goal: &Goal,
        milestone: Option<&Milestone>,
    ) -> Result<Alignment, ScoringError> {
        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: build_user_prompt(task_title, goal, milestone, self.config.response_format),
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            json_response: self.config.response_format == ResponseFormat::JsonObject,
        };

        let deadline = Duration::from_millis(self.config.timeout_ms);
        let raw = match tokio::time::timeout(deadline, self.client.complete(&request)).await {
            Ok(result) => result?,
            Err(_) => return Err(ScoringError::Timeout(self.config.timeout_ms)),
        };

        let parsed = parse_model_response(&raw);
        tracing::debug!(
            task = task_title,
            goal = %goal.title,
            score = parsed.score,
            "model scored task"
        );

        let target = match milestone {
            Some(m) => AlignmentTarget::Milestone(m.id),
            None => AlignmentTarget::Goal(goal.id),
        };

        Ok(Alignment::new(target, parsed.score as i64, parsed.explanation))
    }
}

#[async_trait]
impl ScoringStrategy for LlmScorer {
    async fn score_target(
        &self,
        task_title: &str,
        goal: &Goal,
        milestone: Option<&Milestone>,
    ) -> Result<Alignment, ScoringError> {
        self.score_via_model(task_title, goal, milestone).await
    }

    fn name(&self) -> &'static str {
        "llm"
    }

    fn is_deterministic(&self) -> bool {
        false
    }
}
