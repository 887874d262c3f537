mod ids;
mod score;
mod session;
mod summary;
mod turn;

pub use ids::{SessionId, SessionIdError};
pub use score::{Score, ScoreError};
pub use session::{Session, SessionProgress, SessionStateError};
pub use summary::{SessionSummary, SummaryError};
pub use turn::Turn;
