//! # SQL Editor Core
//!
//! Editing logic for the SQL authoring surface, independent of any UI toolkit.
//!
//! ## Philosophy
//!
//! - **Deterministic**: Same key trace => same buffer and cursor
//! - **Owned state**: One editor instance per view, no globals
//! - **Mechanism over policy**: Indentation and auto-closing are small,
//!   configurable policies over a plain line buffer
//! - **Heuristic, not a parser**: Decisions look at one line or one character
//!
//! ## Design
//!
//! The core provides:
//! - TextBuffer: line storage with character-indexed positions
//! - IndentationEngine: SQL-aware indentation for new lines
//! - BracketAutoCloser: pair insertion and type-over for brackets and quotes
//! - SqlEditor: key-driven state machine tying them together
//! - EditorSnapshot: deterministic state for replay testing

pub mod autoclose;
pub mod buffer;
pub mod config;
pub mod core;
pub mod indent;
pub mod key;
pub mod snapshot;

pub use autoclose::{BackspaceDecision, BracketAutoCloser, InsertDecision};
pub use buffer::{Position, TextBuffer};
pub use config::{BracketPair, EditorConfig, EditorConfigError};
pub use core::{CoreOutcome, SqlEditor};
pub use indent::{IndentRule, IndentationContext, IndentationEngine};
pub use key::Key;
pub use snapshot::EditorSnapshot;
