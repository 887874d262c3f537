use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Score;

/// One answered question within a session.
///
/// Turns are immutable once recorded and always carry the full evaluation:
/// feedback, score, and an optional improvement note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
    pub feedback: String,
    pub score: Score,
    pub improvement: Option<String>,
    pub answered_at: DateTime<Utc>,
}

impl Turn {
    /// Returns the improvement note if it carries any text.
    #[must_use]
    pub fn improvement_note(&self) -> Option<&str> {
        self.improvement
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
    }
}
