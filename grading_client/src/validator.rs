//! Submission validator: sends the buffer to be graded against a task.

use grading_protocol::{Endpoints, HttpRequest, SubmissionResult, SubmitRequest, SubmitResponse};
use tracing::{debug, info};

use crate::error::{GradingError, GradingResult};
use crate::runner::trimmed_query;
use crate::sequence::{Completion, GradingAction, RequestSequence, RequestTicket};
use crate::transport::{self, OutboundRequest, SessionStore, TransportResult};

pub struct SubmissionValidator {
    endpoints: Endpoints,
    sequence: RequestSequence,
}

impl SubmissionValidator {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            sequence: RequestSequence::new(GradingAction::Submit),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.sequence.is_pending()
    }

    pub fn begin(
        &mut self,
        task_id: u64,
        buffer_text: &str,
        session: &dyn SessionStore,
    ) -> GradingResult<OutboundRequest> {
        let query = trimmed_query(buffer_text)?;
        let token = transport::require_token(session)?;

        let body = SubmitRequest {
            query: query.to_string(),
        };
        let http = HttpRequest::post_json(self.endpoints.task_submit_path(task_id), &body)?
            .with_bearer(&token);

        let ticket = self.sequence.issue();
        debug!(%ticket, task_id, "issuing submission");
        Ok(OutboundRequest { ticket, http })
    }

    /// Interpret the grader's verdict.
    ///
    /// Both verdicts come back as `Ok`; use [`into_verdict`] to treat a
    /// rejection as an error.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: TransportResult,
    ) -> Completion<GradingResult<SubmissionResult>> {
        if !self.sequence.settle(ticket) {
            debug!(%ticket, "discarding stale submission response");
            return Completion::Stale;
        }
        Completion::Applied(interpret(ticket, result))
    }
}

fn interpret(ticket: RequestTicket, result: TransportResult) -> GradingResult<SubmissionResult> {
    let response = transport::accept(ticket, result)?;
    let body: SubmitResponse = transport::decode(ticket, &response)?;
    info!(%ticket, accepted = body.success, "submission graded");
    Ok(SubmissionResult {
        success: body.success,
        message: body.message().map(str::to_string),
    })
}

/// Accepted submissions pass through; rejections become [`GradingError::Logical`].
pub fn into_verdict(result: SubmissionResult) -> GradingResult<SubmissionResult> {
    if result.success {
        Ok(result)
    } else {
        Err(GradingError::Logical(result.message))
    }
}
