//! Query runner: executes the buffer against the grading service.

use grading_protocol::{Endpoints, HttpRequest, QueryContext, QueryRequest, QueryResult, RunResponse};
use tracing::{debug, info};

use crate::error::{GradingError, GradingResult, ValidationError};
use crate::sequence::{Completion, GradingAction, RequestSequence, RequestTicket};
use crate::transport::{self, OutboundRequest, SessionStore, TransportResult};

/// Trimmed query text, or the empty-query validation error.
pub(crate) fn trimmed_query(text: &str) -> Result<&str, ValidationError> {
    let query = text.trim();
    if query.is_empty() {
        Err(ValidationError::EmptyQuery)
    } else {
        Ok(query)
    }
}

pub struct QueryRunner {
    endpoints: Endpoints,
    sequence: RequestSequence,
}

impl QueryRunner {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            sequence: RequestSequence::new(GradingAction::Run),
        }
    }

    /// Whether the latest run is still unanswered
    pub fn is_pending(&self) -> bool {
        self.sequence.is_pending()
    }

    /// Build the request for a run.
    ///
    /// Nothing is issued, and the sequence does not advance, when the query
    /// is blank, the table selection is empty, or there is no credential.
    pub fn begin(
        &mut self,
        buffer_text: &str,
        context: &QueryContext,
        session: &dyn SessionStore,
    ) -> GradingResult<OutboundRequest> {
        let query = trimmed_query(buffer_text)?;
        if !context.is_present() {
            return Err(ValidationError::MissingContext.into());
        }
        let token = transport::require_token(session)?;

        let path = match context {
            QueryContext::Task(task_id) => self.endpoints.task_run_path(*task_id),
            QueryContext::Tables(_) => self.endpoints.authoring_run_path().to_string(),
        };
        let body = QueryRequest {
            query: query.to_string(),
            context: context.clone(),
        };
        let http = HttpRequest::post_json(path, &body)?.with_bearer(&token);

        let ticket = self.sequence.issue();
        debug!(%ticket, path = %http.path, "issuing query run");
        Ok(OutboundRequest { ticket, http })
    }

    /// Interpret the answer to `ticket`.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: TransportResult,
    ) -> Completion<GradingResult<QueryResult>> {
        if !self.sequence.settle(ticket) {
            debug!(%ticket, "discarding stale run response");
            return Completion::Stale;
        }
        Completion::Applied(interpret(ticket, result))
    }
}

fn interpret(ticket: RequestTicket, result: TransportResult) -> GradingResult<QueryResult> {
    let response = transport::accept(ticket, result)?;
    let body: RunResponse = transport::decode(ticket, &response)?;

    if !body.success {
        let message = body.failure_message().map(str::to_string);
        info!(%ticket, ?message, "query rejected by the grader");
        return Err(GradingError::Logical(message));
    }

    let results = body.results.unwrap_or_default();
    debug!(%ticket, rows = results.len(), "query run succeeded");
    Ok(results)
}
