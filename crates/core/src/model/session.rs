use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{SessionId, SessionSummary, SummaryError, Turn};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("interview already complete")]
    Completed,

    #[error("turn answers {found:?} but the current question is {expected:?}")]
    QuestionMismatch { expected: String, found: String },
}

/// Aggregated view of interview progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// One interview: a fixed question list walked by a cursor, plus the answered turns.
///
/// The cursor always equals the number of recorded turns and never exceeds the
/// question count. A session with no questions starts complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    role: String,
    difficulty: String,
    questions: Vec<String>,
    current: usize,
    turns: Vec<Turn>,
    created_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(
        id: SessionId,
        role: impl Into<String>,
        difficulty: impl Into<String>,
        questions: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            role: role.into(),
            difficulty: difficulty.into(),
            questions,
            current: 0,
            turns: Vec::new(),
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Zero-based index of the next unanswered question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&str> {
        self.questions.get(self.current).map(String::as_str)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.turns.len(),
            remaining: self.questions.len().saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    /// Append a turn for the current question and advance the cursor.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::Completed` once every question has been answered,
    /// and `SessionStateError::QuestionMismatch` if the turn answers a different
    /// question than the one at the cursor.
    pub fn record_turn(&mut self, turn: Turn) -> Result<&Turn, SessionStateError> {
        let Some(expected) = self.current_question() else {
            return Err(SessionStateError::Completed);
        };
        if expected != turn.question {
            return Err(SessionStateError::QuestionMismatch {
                expected: expected.to_owned(),
                found: turn.question,
            });
        }

        self.turns.push(turn);
        self.current += 1;

        self.turns.last().ok_or(SessionStateError::Completed)
    }

    /// Aggregate the answered turns.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::EmptyHistory` if nothing has been answered yet.
    pub fn summary(&self) -> Result<SessionSummary, SummaryError> {
        SessionSummary::from_turns(&self.turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Score;
    use crate::time::fixed_now;

    fn build_session(questions: &[&str]) -> Session {
        Session::new(
            SessionId::generate(),
            "Backend Engineer",
            "medium",
            questions.iter().map(|q| (*q).to_string()).collect(),
            fixed_now(),
        )
    }

    fn answer(question: &str, score: u8) -> Turn {
        Turn {
            question: question.to_string(),
            answer: "answer".into(),
            feedback: "feedback".into(),
            score: Score::new(score).unwrap(),
            improvement: None,
            answered_at: fixed_now(),
        }
    }

    #[test]
    fn session_advances_and_completes() {
        let mut session = build_session(&["Q1", "Q2"]);
        assert_eq!(session.current_question(), Some("Q1"));
        assert!(!session.is_complete());

        session.record_turn(answer("Q1", 7)).unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.current_question(), Some("Q2"));

        session.record_turn(answer("Q2", 5)).unwrap();
        assert!(session.is_complete());
        assert_eq!(session.current_question(), None);
        assert_eq!(session.turns().len(), 2);
        assert_eq!(
            session.progress(),
            SessionProgress {
                total: 2,
                answered: 2,
                remaining: 0,
                is_complete: true,
            }
        );
    }

    #[test]
    fn completed_session_rejects_turns_without_mutation() {
        let mut session = build_session(&["Q1"]);
        session.record_turn(answer("Q1", 4)).unwrap();
        let before = session.clone();

        let err = session.record_turn(answer("Q1", 4)).unwrap_err();
        assert_eq!(err, SessionStateError::Completed);
        assert_eq!(session, before);
    }

    #[test]
    fn empty_question_list_starts_complete() {
        let session = build_session(&[]);
        assert!(session.is_complete());
        assert_eq!(session.current_question(), None);
    }

    #[test]
    fn turn_for_wrong_question_is_refused() {
        let mut session = build_session(&["Q1", "Q2"]);
        let err = session.record_turn(answer("Q2", 6)).unwrap_err();
        assert!(matches!(err, SessionStateError::QuestionMismatch { .. }));
        assert_eq!(session.current_index(), 0);
        assert!(session.turns().is_empty());
    }

    #[test]
    fn summary_requires_history() {
        let mut session = build_session(&["Q1", "Q2"]);
        assert_eq!(session.summary().unwrap_err(), SummaryError::EmptyHistory);

        session.record_turn(answer("Q1", 8)).unwrap();
        session.record_turn(answer("Q2", 6)).unwrap();
        let summary = session.summary().unwrap();
        assert_eq!(summary.total_score(), 14);
    }
}
