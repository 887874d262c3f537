#![forbid(unsafe_code)]

pub mod error;
pub mod interview;
pub mod provider;

pub use interview_core::Clock;

pub use error::{DecodeError, InterviewError, ProviderError};
pub use interview::{AnswerFeedback, AnswerOutcome, InterviewService, InterviewSummary, StartedSession};
pub use provider::{
    CompletionClient, Evaluation, InterviewProvider, LlmInterviewProvider, OpenAiClient, Prompt,
    ProviderConfig, ResponseFormat,
};
