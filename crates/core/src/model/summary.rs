use thiserror::Error;

use crate::model::Turn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("no answered questions to summarize")]
    EmptyHistory,
}

/// Aggregate figures for a session, derived on demand from its turns.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    answered: u32,
    total_score: u32,
    average_score: f64,
    improvements: Vec<String>,
}

impl SessionSummary {
    /// Aggregate a session's turns.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::EmptyHistory` if there are no turns, since the average
    /// is undefined.
    pub fn from_turns(turns: &[Turn]) -> Result<Self, SummaryError> {
        if turns.is_empty() {
            return Err(SummaryError::EmptyHistory);
        }

        // turns are bounded by the question list, which is far below u32::MAX
        let answered = u32::try_from(turns.len()).unwrap_or(u32::MAX);
        let total_score = turns
            .iter()
            .map(|turn| u32::from(turn.score.value()))
            .fold(0_u32, u32::saturating_add);
        let improvements = turns
            .iter()
            .filter_map(Turn::improvement_note)
            .map(str::to_owned)
            .collect();

        Ok(Self {
            answered,
            total_score,
            average_score: f64::from(total_score) / f64::from(answered),
            improvements,
        })
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn average_score(&self) -> f64 {
        self.average_score
    }

    /// Non-empty improvement notes in the order the questions were answered.
    #[must_use]
    pub fn improvements(&self) -> &[String] {
        &self.improvements
    }
}
