//! Resume Analyzer — asks the LLM for a structured evaluation of extracted resume text.
//!
//! The model is told which JSON shape to return but the shape is not enforced:
//! any valid JSON is handed back to the caller unchanged.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::llm_client::{ChatBackend, LlmError};

pub mod prompts;

use prompts::{evaluation_prompt, EVALUATION_SYSTEM};

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Carries the raw model output verbatim for diagnosis.
    #[error("Invalid JSON response: {raw}")]
    InvalidJson { raw: String },

    #[error(transparent)]
    Backend(#[from] LlmError),
}

/// The evaluation shape the model is asked for.
///
/// Only used as a read-only view for logging; responses are returned as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggested_enhancements: Vec<String>,
    pub overall_score: i64,
}

impl EvaluationResult {
    /// Typed view of a parsed response, `None` if the model drifted from the schema.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Owns the backend handle; one `analyze` call is one backend round-trip.
#[derive(Clone)]
pub struct ResumeAnalyzer {
    backend: Arc<dyn ChatBackend>,
}

impl ResumeAnalyzer {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Evaluates `resume_text`, optionally against `job_application` (empty = not provided).
    pub async fn analyze(
        &self,
        resume_text: &str,
        job_application: &str,
    ) -> Result<Value, AnalysisError> {
        let prompt = evaluation_prompt(resume_text, job_application);
        let raw = self.backend.complete(EVALUATION_SYSTEM, &prompt).await?;

        let evaluation = parse_evaluation(&raw)?;

        match EvaluationResult::from_value(&evaluation) {
            Some(result) => info!(
                "Resume evaluated: overall_score={}, missing_skills={}",
                result.overall_score,
                result.missing_skills.len()
            ),
            None => debug!("Evaluation does not match the requested schema; passing through"),
        }

        Ok(evaluation)
    }
}

/// Parses the model output as JSON; on failure the error carries the
/// unstripped text.
///
/// Models often wrap JSON in a ```` ```json ```` fence, so a single surrounding
/// fence is removed first. A fenced but otherwise valid reply is therefore a
/// success, not `Invalid JSON response`. Everything else (prose, truncated
/// JSON, empty text) still fails.
pub fn parse_evaluation(raw: &str) -> Result<Value, AnalysisError> {
    serde_json::from_str(strip_json_fences(raw)).map_err(|_| AnalysisError::InvalidJson {
        raw: raw.to_string(),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let inner = inner.trim_start();
    inner.strip_suffix("```").map(str::trim).unwrap_or(inner)
}
