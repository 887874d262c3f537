//! Question/evaluation provider backed by a generative text service.

mod client;
pub mod decode;
mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use interview_core::model::{Score, SessionSummary};

use crate::error::ProviderError;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiClient, ProviderConfig};
pub use prompts::{COACH_PERSONA, INTERVIEWER_PERSONA};

/// Shape the completion service is asked to reply in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Free text, e.g. a question list or a narrative.
    Text,
    /// A single JSON object; services that support it enforce this server-side.
    JsonObject,
}

/// One chat-style request: the persona the model plays and the task itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
    pub format: ResponseFormat,
}

/// Raw text completion: prompt in, text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete a single-turn prompt.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the service is disabled, the request fails,
    /// or the response is empty or cut short.
    async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError>;
}

/// Typed evaluation of one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub feedback: String,
    pub score: Score,
    pub improvement: Option<String>,
}

/// Source of interview questions, answer evaluations, and closing narratives.
///
/// Implementations are not expected to be deterministic.
#[async_trait]
pub trait InterviewProvider: Send + Sync {
    /// Generate up to `count` questions. May return fewer.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the underlying request fails.
    async fn generate_questions(
        &self,
        role: &str,
        difficulty: &str,
        count: usize,
    ) -> Result<Vec<String>, ProviderError>;

    /// Score an answer and produce feedback.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Malformed` if the structured response cannot be decoded.
    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, ProviderError>;

    /// Write a narrative assessment from aggregated figures.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the request fails or the narrative is empty.
    async fn summarize(
        &self,
        role: &str,
        difficulty: &str,
        summary: &SessionSummary,
    ) -> Result<String, ProviderError>;
}

/// `InterviewProvider` that prompts a `CompletionClient` and decodes its replies.
#[derive(Clone)]
pub struct LlmInterviewProvider {
    client: Arc<dyn CompletionClient>,
}

impl LlmInterviewProvider {
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InterviewProvider for LlmInterviewProvider {
    async fn generate_questions(
        &self,
        role: &str,
        difficulty: &str,
        count: usize,
    ) -> Result<Vec<String>, ProviderError> {
        let text = self
            .client
            .complete(&prompts::questions(role, difficulty, count))
            .await?;
        let questions = decode::decode_questions(&text, count);
        if questions.len() < count {
            tracing::warn!(
                requested = count,
                returned = questions.len(),
                "provider returned fewer questions than requested"
            );
        }
        Ok(questions)
    }

    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, ProviderError> {
        let text = self
            .client
            .complete(&prompts::evaluation(question, answer))
            .await?;
        Ok(decode::decode_evaluation(&text)?)
    }

    async fn summarize(
        &self,
        role: &str,
        difficulty: &str,
        summary: &SessionSummary,
    ) -> Result<String, ProviderError> {
        let text = self
            .client
            .complete(&prompts::summary(role, difficulty, summary))
            .await?;
        let narrative = text.trim();
        if narrative.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(narrative.to_owned())
    }
}
