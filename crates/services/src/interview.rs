use std::sync::Arc;

use interview_core::model::{Score, Session, SessionId, Turn};
use storage::repository::{SessionHandle, SessionRepository, StorageError};

use crate::Clock;
use crate::error::InterviewError;
use crate::provider::InterviewProvider;

/// Result of opening a new interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedSession {
    pub session_id: SessionId,
    /// `None` when the provider returned no questions.
    pub first_question: Option<String>,
    pub total_questions: usize,
}

/// Evaluation of one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub feedback: String,
    pub score: Score,
    pub improvement: Option<String>,
    /// `None` once the last question has been answered.
    pub next_question: Option<String>,
    pub answered: usize,
    pub total_questions: usize,
}

/// Outcome of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Answered(AnswerFeedback),
    /// Every question was already answered; nothing was recorded.
    AlreadyComplete,
}

/// Aggregate scores plus the provider's closing narrative.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewSummary {
    pub total_score: u32,
    pub average_score: f64,
    pub narrative: String,
    pub improvements: Vec<String>,
    pub answered: u32,
}

/// Owns the interview state machine for every session.
///
/// Answer submissions for one session are serialized by holding that session's
/// lock across the provider call; different sessions never wait on each other.
#[derive(Clone)]
pub struct InterviewService {
    clock: Clock,
    sessions: Arc<dyn SessionRepository>,
    provider: Arc<dyn InterviewProvider>,
}

impl InterviewService {
    #[must_use]
    pub fn new(
        clock: Clock,
        sessions: Arc<dyn SessionRepository>,
        provider: Arc<dyn InterviewProvider>,
    ) -> Self {
        Self {
            clock,
            sessions,
            provider,
        }
    }

    /// Create a session seeded with provider-generated questions.
    ///
    /// A short (or empty) question list is stored as returned. With no questions
    /// the session starts complete and `first_question` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `InterviewError::Provider` if question generation fails, or
    /// `InterviewError::Storage` if the session cannot be registered.
    pub async fn start_session(
        &self,
        role: &str,
        difficulty: &str,
        num_questions: usize,
    ) -> Result<StartedSession, InterviewError> {
        let mut questions = if num_questions == 0 {
            Vec::new()
        } else {
            self.provider
                .generate_questions(role, difficulty, num_questions)
                .await?
        };
        questions.truncate(num_questions);

        let session = Session::new(
            SessionId::generate(),
            role,
            difficulty,
            questions,
            self.clock.now(),
        );
        let started = StartedSession {
            session_id: session.id(),
            first_question: session.current_question().map(str::to_owned),
            total_questions: session.questions().len(),
        };
        self.sessions
            .insert(session)
            .await
            .map_err(InterviewError::Storage)?;

        if started.first_question.is_none() {
            tracing::warn!(session_id = %started.session_id, role, difficulty, "session started without questions");
        } else {
            tracing::info!(
                session_id = %started.session_id,
                role,
                difficulty,
                questions = started.total_questions,
                "session started"
            );
        }
        Ok(started)
    }

    /// Evaluate an answer to the current question and advance the session.
    ///
    /// Returns `AnswerOutcome::AlreadyComplete` without touching the session once every
    /// question is answered. On any provider failure the session is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InterviewError::UnknownSession` for an unknown id,
    /// `InterviewError::MalformedProviderResponse` if the evaluation cannot be decoded,
    /// and `InterviewError::Provider` for other provider failures.
    pub async fn submit_answer(
        &self,
        id: SessionId,
        answer: &str,
    ) -> Result<AnswerOutcome, InterviewError> {
        let handle = self.lookup(id).await?;
        let mut session = handle.lock().await;

        let Some(question) = session.current_question().map(str::to_owned) else {
            tracing::debug!(session_id = %id, "answer submitted to completed session");
            return Ok(AnswerOutcome::AlreadyComplete);
        };

        let evaluation = match self.provider.evaluate_answer(&question, answer).await {
            Ok(evaluation) => evaluation,
            Err(err) => {
                tracing::warn!(session_id = %id, error = %err, "answer evaluation failed");
                return Err(err.into());
            }
        };

        let turn = Turn {
            question,
            answer: answer.to_owned(),
            feedback: evaluation.feedback,
            score: evaluation.score,
            improvement: evaluation.improvement,
            answered_at: self.clock.now(),
        };
        let recorded = session.record_turn(turn)?.clone();
        let progress = session.progress();

        tracing::info!(
            session_id = %id,
            answered = progress.answered,
            total = progress.total,
            score = recorded.score.value(),
            "turn recorded"
        );

        Ok(AnswerOutcome::Answered(AnswerFeedback {
            feedback: recorded.feedback,
            score: recorded.score,
            improvement: recorded.improvement,
            next_question: session.current_question().map(str::to_owned),
            answered: progress.answered,
            total_questions: progress.total,
        }))
    }

    /// Aggregate the answered turns and ask the provider for a narrative.
    ///
    /// # Errors
    ///
    /// Returns `InterviewError::UnknownSession` for an unknown id,
    /// `InterviewError::EmptyHistory` if nothing was answered yet, and
    /// `InterviewError::Provider` if the narrative request fails.
    pub async fn summary(&self, id: SessionId) -> Result<InterviewSummary, InterviewError> {
        let handle = self.lookup(id).await?;
        let (role, difficulty, aggregated) = {
            let session = handle.lock().await;
            (
                session.role().to_owned(),
                session.difficulty().to_owned(),
                session.summary()?,
            )
        };

        let narrative = self
            .provider
            .summarize(&role, &difficulty, &aggregated)
            .await?;

        Ok(InterviewSummary {
            total_score: aggregated.total_score(),
            average_score: aggregated.average_score(),
            narrative,
            improvements: aggregated.improvements().to_vec(),
            answered: aggregated.answered(),
        })
    }

    /// Snapshot of the full session record.
    ///
    /// # Errors
    ///
    /// Returns `InterviewError::UnknownSession` for an unknown id.
    pub async fn history(&self, id: SessionId) -> Result<Session, InterviewError> {
        let handle = self.lookup(id).await?;
        let session = handle.lock().await;
        Ok(session.clone())
    }

    /// Number of sessions held in the store.
    ///
    /// # Errors
    ///
    /// Returns `InterviewError::Storage` if the registry cannot be read.
    pub async fn session_count(&self) -> Result<usize, InterviewError> {
        self.sessions.count().await.map_err(InterviewError::Storage)
    }

    async fn lookup(&self, id: SessionId) -> Result<SessionHandle, InterviewError> {
        self.sessions.get(id).await.map_err(|err| match err {
            StorageError::NotFound => InterviewError::UnknownSession(id),
            other => InterviewError::Storage(other),
        })
    }
}
