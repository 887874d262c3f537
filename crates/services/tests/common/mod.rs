#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use interview_core::time::fixed_clock;
use services::{
    CompletionClient, InterviewService, LlmInterviewProvider, Prompt, ProviderError, ResponseFormat,
};
use storage::repository::InMemoryRepository;

/// Completion client that replays canned replies in order.
///
/// Also tracks how many completions overlap so tests can observe serialization.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<Prompt>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful reply.
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Some(text.into()));
        self
    }

    /// Queue a transport-level failure.
    pub fn fail(self) -> Self {
        self.replies.lock().unwrap().push_back(None);
        self
    }

    pub fn push_reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Some(text.into()));
    }

    /// User messages sent so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .map(|prompt| prompt.user.clone())
            .collect()
    }

    pub fn formats(&self) -> Vec<ResponseFormat> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .map(|prompt| prompt.format)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        reply.flatten().ok_or(ProviderError::EmptyResponse)
    }
}

pub fn evaluation(feedback: &str, score: u8, improvement: Option<&str>) -> String {
    serde_json::json!({
        "feedback": feedback,
        "score": score,
        "improvement": improvement,
    })
    .to_string()
}

pub fn numbered(questions: &[&str]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {q}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_service(client: Arc<ScriptedClient>) -> InterviewService {
    InterviewService::new(
        fixed_clock(),
        Arc::new(InMemoryRepository::new()),
        Arc::new(LlmInterviewProvider::new(client)),
    )
}
