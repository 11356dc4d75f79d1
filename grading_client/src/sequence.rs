//! Per-action request sequencing.
//!
//! Each action hands out monotonically increasing sequence numbers. A
//! response is applied only if it answers the latest issued request and
//! nothing has been applied for that request yet; everything else is stale.

use std::fmt;

/// Which user action a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradingAction {
    Run,
    Submit,
    LoadTask,
}

impl GradingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradingAction::Run => "run",
            GradingAction::Submit => "submit",
            GradingAction::LoadTask => "load_task",
        }
    }
}

impl fmt::Display for GradingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Correlates a response with the request that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub action: GradingAction,
    pub seq: u64,
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.action, self.seq)
    }
}

/// Sequence counter for a single action
#[derive(Debug, Clone)]
pub struct RequestSequence {
    action: GradingAction,
    issued: u64,
    settled: u64,
}

impl RequestSequence {
    pub fn new(action: GradingAction) -> Self {
        Self {
            action,
            issued: 0,
            settled: 0,
        }
    }

    pub fn action(&self) -> GradingAction {
        self.action
    }

    /// Issue the next ticket; it supersedes every earlier one.
    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket {
            action: self.action,
            seq: self.issued,
        }
    }

    pub fn latest(&self) -> Option<RequestTicket> {
        (self.issued > 0).then_some(RequestTicket {
            action: self.action,
            seq: self.issued,
        })
    }

    /// Whether the latest request is still waiting for its response
    pub fn is_pending(&self) -> bool {
        self.settled < self.issued
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.action == self.action && ticket.seq == self.issued && self.is_pending()
    }

    /// Mark `ticket` answered. Returns false for stale or repeated answers.
    pub fn settle(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.settled = ticket.seq;
        true
    }
}

/// Result of feeding a response back
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<T> {
    /// The response answered the latest request and was interpreted
    Applied(T),
    /// Superseded or duplicate response; discarded
    Stale,
}

impl<T> Completion<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Completion::Stale)
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Completion::Applied(value) => Some(value),
            Completion::Stale => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_is_monotonic() {
        let mut sequence = RequestSequence::new(GradingAction::Run);
        assert_eq!(sequence.latest(), None);
        let first = sequence.issue();
        let second = sequence.issue();
        assert!(second.seq > first.seq);
        assert_eq!(sequence.latest(), Some(second));
    }

    #[test]
    fn test_superseded_ticket_is_stale() {
        let mut sequence = RequestSequence::new(GradingAction::Run);
        let first = sequence.issue();
        let second = sequence.issue();

        assert!(sequence.settle(second));
        assert!(!sequence.settle(first));
    }

    #[test]
    fn test_late_first_response_after_second_settled() {
        let mut sequence = RequestSequence::new(GradingAction::Run);
        let first = sequence.issue();
        let second = sequence.issue();
        assert!(!sequence.settle(first));
        assert!(sequence.is_pending());
        assert!(sequence.settle(second));
        assert!(!sequence.is_pending());
    }

    #[test]
    fn test_duplicate_response_is_stale() {
        let mut sequence = RequestSequence::new(GradingAction::Submit);
        let ticket = sequence.issue();
        assert!(sequence.settle(ticket));
        assert!(!sequence.settle(ticket));
    }

    #[test]
    fn test_foreign_action_is_stale() {
        let mut runs = RequestSequence::new(GradingAction::Run);
        let mut submits = RequestSequence::new(GradingAction::Submit);
        runs.issue();
        let submit = submits.issue();
        assert!(!runs.settle(submit));
    }

    #[test]
    fn test_ticket_display() {
        let mut sequence = RequestSequence::new(GradingAction::LoadTask);
        assert_eq!(sequence.issue().to_string(), "load_task#1");
    }

    #[test]
    fn test_completion_helpers() {
        assert!(Completion::<u8>::Stale.is_stale());
        assert_eq!(Completion::Applied(3).applied(), Some(3));
    }
}
