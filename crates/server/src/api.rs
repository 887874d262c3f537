//! JSON bodies for the HTTP endpoints.

use chrono::{DateTime, Utc};
use interview_core::model::{Session, SessionId, Turn};
use serde::{Deserialize, Serialize};
use services::{AnswerFeedback, InterviewError, InterviewSummary, StartedSession};

pub const NO_QUESTIONS_AVAILABLE: &str = "No questions available";
pub const INTERVIEW_COMPLETE: &str = "Interview complete";
pub const ALREADY_COMPLETE: &str = "Interview already complete";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub num_questions: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub session_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartSessionResponse {
    pub session_id: SessionId,
    pub first_question: Option<String>,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<StartedSession> for StartSessionResponse {
    fn from(started: StartedSession) -> Self {
        let message = started
            .first_question
            .is_none()
            .then_some(NO_QUESTIONS_AVAILABLE);
        Self {
            session_id: started.session_id,
            first_question: started.first_question,
            total_questions: started.total_questions,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub feedback: String,
    pub score: u8,
    pub improvement: Option<String>,
    pub next_question: Option<String>,
    pub is_complete: bool,
    pub answered: usize,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<AnswerFeedback> for AnswerResponse {
    fn from(feedback: AnswerFeedback) -> Self {
        let is_complete = feedback.next_question.is_none();
        Self {
            feedback: feedback.feedback,
            score: feedback.score.value(),
            improvement: feedback.improvement,
            next_question: feedback.next_question,
            is_complete,
            answered: feedback.answered,
            total_questions: feedback.total_questions,
            message: is_complete.then_some(INTERVIEW_COMPLETE),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub total_score: u32,
    pub avg_score: f64,
    pub summary: String,
    pub improvements: Vec<String>,
    pub answered: u32,
}

impl From<InterviewSummary> for SummaryResponse {
    fn from(summary: InterviewSummary) -> Self {
        Self {
            total_score: summary.total_score,
            avg_score: summary.average_score,
            summary: summary.narrative,
            improvements: summary.improvements,
            answered: summary.answered,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub session_id: SessionId,
    pub role: String,
    pub difficulty: String,
    pub questions: Vec<String>,
    pub current_index: usize,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
    pub history: Vec<Turn>,
}

impl From<Session> for HistoryResponse {
    fn from(session: Session) -> Self {
        Self {
            session_id: session.id(),
            role: session.role().to_owned(),
            difficulty: session.difficulty().to_owned(),
            questions: session.questions().to_vec(),
            current_index: session.current_index(),
            is_complete: session.is_complete(),
            created_at: session.created_at(),
            history: session.turns().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}

/// Error body returned with HTTP 200, matching the service's error convention.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ErrorResponse {
    #[must_use]
    pub fn unknown_session(raw: &str) -> Self {
        Self {
            error: format!("unknown session: {raw}"),
            code: "unknown_session",
        }
    }
}

impl From<&InterviewError> for ErrorResponse {
    fn from(err: &InterviewError) -> Self {
        let code = match err {
            InterviewError::UnknownSession(_) => "unknown_session",
            InterviewError::EmptyHistory => "empty_history",
            InterviewError::MalformedProviderResponse(_) => "malformed_provider_response",
            InterviewError::Provider(_) => "provider_error",
            _ => "internal_error",
        };
        Self {
            error: err.to_string(),
            code,
        }
    }
}
