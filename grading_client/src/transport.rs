//! Seams to the host: the session credential and the HTTP transport.

use std::collections::VecDeque;

use grading_protocol::{HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{AuthError, GradingError, TransportError};
use crate::sequence::RequestTicket;

/// The host could not complete the exchange at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub reason: String,
}

impl TransportFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// What the host reports back for a request
pub type TransportResult = Result<HttpResponse, TransportFailure>;

/// A request ready for the host to send, tagged with its ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub ticket: RequestTicket,
    pub http: HttpRequest,
}

/// Supplies the bearer credential and forgets it when the server rejects it.
pub trait SessionStore {
    fn bearer_token(&self) -> Option<String>;
    fn invalidate(&mut self);
}

/// Session held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    token: Option<String>,
}

impl MemorySession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

impl SessionStore for MemorySession {
    fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn invalidate(&mut self) {
        self.token = None;
    }
}

/// Blocking transport for hosts that can answer a request in place.
pub trait GradingTransport {
    fn send(&mut self, request: &HttpRequest) -> TransportResult;
}

/// Transport answering from a queue of canned results, recording what it saw.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<TransportResult>,
    sent: Vec<HttpRequest>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, status: u16, body: impl Into<String>) -> Self {
        self.replies.push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(mut self, reason: impl Into<String>) -> Self {
        self.replies.push_back(Err(TransportFailure::new(reason)));
        self
    }

    pub fn sent(&self) -> &[HttpRequest] {
        &self.sent
    }
}

impl GradingTransport for ScriptedTransport {
    fn send(&mut self, request: &HttpRequest) -> TransportResult {
        self.sent.push(request.clone());
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure::new("no scripted reply")))
    }
}

/// Bearer token or an auth error; nothing is sent without one.
pub(crate) fn require_token(session: &dyn SessionStore) -> Result<String, GradingError> {
    session
        .bearer_token()
        .filter(|token| !token.is_empty())
        .ok_or(GradingError::Auth(AuthError::MissingCredential))
}

/// Accept a 2xx response; map everything else onto the error taxonomy.
pub(crate) fn accept(ticket: RequestTicket, result: TransportResult) -> Result<HttpResponse, GradingError> {
    let response = result.map_err(|failure| {
        warn!(%ticket, reason = %failure.reason, "grading request failed in transport");
        TransportError::Network(failure.reason)
    })?;

    if response.is_unauthorized() {
        warn!(%ticket, "grading request rejected as unauthorized");
        return Err(AuthError::Unauthorized.into());
    }

    if !response.is_success() {
        warn!(%ticket, status = response.status, "grading request returned error status");
        return Err(TransportError::Status {
            status: response.status,
            detail: response.server_detail(),
        }
        .into());
    }

    Ok(response)
}

pub(crate) fn decode<T: DeserializeOwned>(ticket: RequestTicket, response: &HttpResponse) -> Result<T, GradingError> {
    response.decode().map_err(|err| {
        warn!(%ticket, error = %err, "grading response could not be decoded");
        GradingError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{GradingAction, RequestSequence};

    fn ticket() -> RequestTicket {
        RequestSequence::new(GradingAction::Run).issue()
    }

    #[test]
    fn test_memory_session() {
        let mut session = MemorySession::new("abc");
        assert_eq!(session.bearer_token().as_deref(), Some("abc"));
        session.invalidate();
        assert_eq!(session.bearer_token(), None);
        assert!(require_token(&session).is_err());
    }

    #[test]
    fn test_empty_token_is_missing() {
        let session = MemorySession::new("");
        assert_eq!(
            require_token(&session),
            Err(GradingError::Auth(AuthError::MissingCredential))
        );
    }

    #[test]
    fn test_accept_classifies() {
        assert!(accept(ticket(), Ok(HttpResponse::new(200, "{}"))).is_ok());
        assert_eq!(
            accept(ticket(), Ok(HttpResponse::new(401, ""))),
            Err(GradingError::Auth(AuthError::Unauthorized))
        );
        assert_eq!(
            accept(ticket(), Ok(HttpResponse::new(500, r#"{"error": "db down"}"#))),
            Err(GradingError::Transport(TransportError::Status {
                status: 500,
                detail: Some("db down".into()),
            }))
        );
        assert_eq!(
            accept(ticket(), Err(TransportFailure::new("refused"))),
            Err(GradingError::Transport(TransportError::Network("refused".into())))
        );
    }

    #[test]
    fn test_scripted_transport() {
        let mut transport = ScriptedTransport::new().reply(200, "{}").fail("down");
        let request = HttpRequest::get("/x");
        assert!(transport.send(&request).is_ok());
        assert!(transport.send(&request).is_err());
        assert!(transport.send(&request).is_err());
        assert_eq!(transport.sent().len(), 3);
    }
}
