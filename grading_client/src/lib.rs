//! # Grading Client
//!
//! Request/response bookkeeping for running, submitting and loading tasks.
//!
//! ## Philosophy
//!
//! - **Host performs I/O**: Every action yields an [`OutboundRequest`]; the host
//!   sends it and feeds the outcome back with its ticket
//! - **Latest wins**: Each action numbers its requests; anything that is not the
//!   answer to the latest one is discarded as stale
//! - **Failures are typed**: Validation, transport, logical and auth failures
//!   stay distinct so the view can react to each
//! - **No retries**: A failed request is reported, never replayed

pub mod error;
pub mod runner;
pub mod sequence;
pub mod task_loader;
pub mod transport;
pub mod validator;

pub use error::{AuthError, GradingError, GradingResult, TransportError, ValidationError};
pub use runner::QueryRunner;
pub use sequence::{Completion, GradingAction, RequestSequence, RequestTicket};
pub use task_loader::TaskLoader;
pub use transport::{
    GradingTransport, MemorySession, OutboundRequest, ScriptedTransport, SessionStore,
    TransportFailure, TransportResult,
};
pub use validator::{into_verdict, SubmissionValidator};
