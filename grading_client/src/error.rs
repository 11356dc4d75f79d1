//! Error taxonomy for grading actions.
//!
//! Every variant is handled where the user triggered the action; only
//! [`GradingError::Auth`] ends the current view.

use grading_protocol::ProtocolError;
use thiserror::Error;

/// Rejected locally, before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("no table selected")]
    MissingContext,

    #[error("nothing to grade without a task")]
    NoTaskToGrade,
}

/// The request never produced a usable grader answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("server answered {status}{}", .detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    /// Server-supplied explanation, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TransportError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no session credential")]
    MissingCredential,

    #[error("session rejected by the server")]
    Unauthorized,
}

/// Grading error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The grader understood the request and said no.
    #[error("{}", .0.as_deref().unwrap_or("rejected by the grader"))]
    Logical(Option<String>),

    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
}

impl GradingError {
    /// Only auth failures end the view.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GradingError::Auth(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, GradingError::Validation(_))
    }
}

impl From<ProtocolError> for GradingError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Encode(e) => {
                GradingError::Transport(TransportError::Malformed(e.to_string()))
            }
            ProtocolError::Decode(e) => {
                GradingError::Transport(TransportError::Malformed(e.to_string()))
            }
        }
    }
}

/// Grading result
pub type GradingResult<T> = Result<T, GradingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_auth_is_fatal() {
        assert!(GradingError::Auth(AuthError::Unauthorized).is_fatal());
        assert!(!GradingError::Validation(ValidationError::EmptyQuery).is_fatal());
        assert!(!GradingError::Transport(TransportError::Network("down".into())).is_fatal());
        assert!(!GradingError::Logical(None).is_fatal());
    }

    #[test]
    fn test_display() {
        let err = GradingError::Transport(TransportError::Status {
            status: 500,
            detail: Some("boom".into()),
        });
        assert_eq!(err.to_string(), "transport failed: server answered 500: boom");

        let err = GradingError::Transport(TransportError::Status {
            status: 502,
            detail: None,
        });
        assert_eq!(err.to_string(), "transport failed: server answered 502");

        assert_eq!(GradingError::Logical(Some("wrong".into())).to_string(), "wrong");
        assert_eq!(GradingError::Logical(None).to_string(), "rejected by the grader");
    }

    #[test]
    fn test_protocol_errors_are_transport() {
        let decode = serde_json::from_str::<u8>("x").unwrap_err();
        let err: GradingError = ProtocolError::Decode(decode).into();
        assert!(matches!(err, GradingError::Transport(TransportError::Malformed(_))));
    }
}
