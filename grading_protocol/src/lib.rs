//! # Grading Protocol
//!
//! Wire types for the grading service: run and submit bodies, result rows,
//! task metadata, and the HTTP envelope the host performs on our behalf.
//!
//! ## Philosophy
//!
//! - **Typed wire**: Loosely-typed JSON is narrowed to string | number | null
//!   at the boundary
//! - **Order matters**: Result columns keep the order the server sent
//! - **No I/O**: Requests are descriptions; the host owns the network

pub mod http;
pub mod messages;
pub mod row;

pub use http::{Endpoints, HttpMethod, HttpRequest, HttpResponse, ProtocolError};
pub use messages::{
    QueryContext, QueryRequest, ResultColumn, RunResponse, SchemaColumn, SchemaTable,
    SubmissionResult, SubmitRequest, SubmitResponse, TaskDetail,
};
pub use row::{CellValue, QueryResult, Row, NULL_TOKEN};
