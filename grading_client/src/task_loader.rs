//! Fetches task metadata, including whether it is already solved.

use grading_protocol::{Endpoints, HttpRequest, TaskDetail};
use tracing::debug;

use crate::error::GradingResult;
use crate::sequence::{Completion, GradingAction, RequestSequence, RequestTicket};
use crate::transport::{self, OutboundRequest, SessionStore, TransportResult};

pub struct TaskLoader {
    endpoints: Endpoints,
    sequence: RequestSequence,
}

impl TaskLoader {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            sequence: RequestSequence::new(GradingAction::LoadTask),
        }
    }

    pub fn begin(&mut self, task_id: u64, session: &dyn SessionStore) -> GradingResult<OutboundRequest> {
        let token = transport::require_token(session)?;
        let http = HttpRequest::get(self.endpoints.task_path(task_id)).with_bearer(&token);
        let ticket = self.sequence.issue();
        debug!(%ticket, task_id, "loading task");
        Ok(OutboundRequest { ticket, http })
    }

    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: TransportResult,
    ) -> Completion<GradingResult<TaskDetail>> {
        if !self.sequence.settle(ticket) {
            debug!(%ticket, "discarding stale task response");
            return Completion::Stale;
        }
        Completion::Applied(
            transport::accept(ticket, result).and_then(|response| transport::decode(ticket, &response)),
        )
    }
}
