//! Shared error types for the services crate.

use thiserror::Error;

use interview_core::model::{ScoreError, SessionId, SessionStateError, SummaryError};
use storage::repository::StorageError;

/// Errors emitted while decoding structured provider output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("response contains no JSON object")]
    MissingObject,
    #[error("response is not a valid evaluation object: {0}")]
    Json(#[from] serde_json::Error),
    #[error("evaluation feedback is empty")]
    EmptyFeedback,
    #[error("evaluation score is not a finite number")]
    NonFiniteScore,
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Errors emitted by the question/evaluation provider.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("provider is not configured")]
    Disabled,
    #[error("provider returned an empty response")]
    EmptyResponse,
    #[error("provider stopped at its length limit before finishing")]
    Truncated,
    #[error("provider request failed with status {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Malformed(#[from] DecodeError),
}

/// Errors emitted by `InterviewService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InterviewError {
    #[error("unknown session: {0}")]
    UnknownSession(SessionId),
    #[error("no answered questions to summarize")]
    EmptyHistory,
    #[error("malformed provider response: {0}")]
    MalformedProviderResponse(DecodeError),
    #[error(transparent)]
    Provider(ProviderError),
    #[error(transparent)]
    SessionState(#[from] SessionStateError),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<ProviderError> for InterviewError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Malformed(decode) => Self::MalformedProviderResponse(decode),
            other => Self::Provider(other),
        }
    }
}

impl From<SummaryError> for InterviewError {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::EmptyHistory => Self::EmptyHistory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_provider_output_gets_its_own_variant() {
        let err = InterviewError::from(ProviderError::Malformed(DecodeError::MissingObject));
        assert!(matches!(
            err,
            InterviewError::MalformedProviderResponse(DecodeError::MissingObject)
        ));

        let err = InterviewError::from(ProviderError::Truncated);
        assert!(matches!(err, InterviewError::Provider(ProviderError::Truncated)));
    }

    #[test]
    fn empty_summary_maps_to_empty_history() {
        assert!(matches!(
            InterviewError::from(SummaryError::EmptyHistory),
            InterviewError::EmptyHistory
        ));
    }

    #[test]
    fn api_error_names_status_and_message() {
        let err = ProviderError::Api {
            status: reqwest::StatusCode::UNAUTHORIZED,
            message: "Invalid API key".into(),
        };
        assert_eq!(
            err.to_string(),
            "provider request failed with status 401 Unauthorized: Invalid API key"
        );
    }
}
