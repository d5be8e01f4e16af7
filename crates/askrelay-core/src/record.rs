//! The record handed back to front ends once per question.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Source identifier used when no provider produced an answer.
pub const SIMULATED_SOURCE: &str = "simulated";

/// Prefix of every synthetic answer.
pub const SIMULATED_PREFIX: &str = "[SIMULATED RESPONSE — no API key configured]";

/// Build the deterministic synthetic answer for a processed question.
pub fn simulated_answer(processed: &str) -> String {
    format!("{SIMULATED_PREFIX} Processed question: {processed}")
}

/// Outcome of one question-answer cycle.
///
/// Immutable after construction: fields are only reachable through
/// accessors. The record is owned by the caller and discarded after the
/// response is rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerRecord {
    question: String,
    processed: String,
    prompt: String,
    answer: String,
    source: String,
    errors: Vec<String>,
    answered_at: DateTime<Utc>,
}

impl AnswerRecord {
    /// Record an answer produced by the provider named `source`.
    ///
    /// `errors` holds the diagnostics of the providers tried before it, in order.
    pub fn answered(
        question: impl Into<String>,
        processed: impl Into<String>,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        source: impl Into<String>,
        errors: Vec<String>,
    ) -> Self {
        Self {
            question: question.into(),
            processed: processed.into(),
            prompt: prompt.into(),
            answer: answer.into(),
            source: source.into(),
            errors,
            answered_at: Utc::now(),
        }
    }

    /// Record the synthetic answer used when every provider failed.
    pub fn simulated(
        question: impl Into<String>,
        processed: &str,
        prompt: impl Into<String>,
        errors: Vec<String>,
    ) -> Self {
        Self::answered(
            question,
            processed,
            prompt,
            simulated_answer(processed),
            SIMULATED_SOURCE,
            errors,
        )
    }

    /// The question exactly as the user typed it.
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn processed(&self) -> &str {
        &self.processed
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Provider identifier that produced the answer, or `"simulated"`.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Failure messages from providers tried before the answer, in priority order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn answered_at(&self) -> DateTime<Utc> {
        self.answered_at
    }

    /// Whether every provider failed and the answer is synthetic.
    pub fn is_simulated(&self) -> bool {
        self.source == SIMULATED_SOURCE
    }
}
