//! # Task Workbench Service
//!
//! The SQL practice view: an editor, a results panel, and run/submit against
//! the grading service, for both task solving and task authoring.
//!
//! ## Philosophy
//!
//! - **One component, configured**: Locale strings, editor policy and
//!   endpoints come from [`WorkbenchConfig`]; there are no per-page forks
//! - **Host-driven**: The workbench hands out requests and consumes their
//!   outcomes; it never blocks on the network itself
//! - **Errors are state**: Every failure lands in the error line or results
//!   panel; only a rejected session leaves the view
//! - **Testable**: The whole view renders to a plain [`WorkbenchView`] tree
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A login or dashboard page
//! - A task editor for authoring metadata
//! - A SQL parser or highlighter

pub mod config;
pub mod render;
pub mod state;
pub mod workbench;

pub use config::{ConfigError, Locale, WorkbenchConfig};
pub use render::{EditorPane, TaskHeader, WorkbenchRenderer, WorkbenchView};
pub use state::{TableSelection, TaskStatus, WorkbenchMode};
pub use workbench::{TaskWorkbench, WorkbenchAction};
