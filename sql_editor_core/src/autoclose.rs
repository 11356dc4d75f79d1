//! Bracket and quote auto-closing
//!
//! Decisions look only at the characters immediately around the cursor.
//! There is no bracket-matching stack.

use crate::config::{BracketPair, EditorConfig};

/// What to do with a typed character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertDecision {
    /// Plain insertion
    Insert(char),
    /// Insert opener and closer, cursor between them
    InsertPair { open: char, close: char },
    /// Typed closer matches the one at the cursor; move past it
    SkipOver,
}

/// What Backspace should remove
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackspaceDecision {
    DeleteChar,
    /// Cursor sits inside an empty pair; remove both halves
    DeletePair,
}

#[derive(Debug, Clone)]
pub struct BracketAutoCloser {
    enabled: bool,
    pairs: Vec<BracketPair>,
}

impl BracketAutoCloser {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            enabled: config.auto_close,
            pairs: config.pairs.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn closer_for(&self, open: char) -> Option<char> {
        self.pairs.iter().find(|p| p.open == open).map(|p| p.close)
    }

    pub fn is_closer(&self, ch: char) -> bool {
        self.pairs.iter().any(|p| p.close == ch)
    }

    /// Decide how to insert `ch` given the character at the cursor
    pub fn decide(&self, ch: char, char_at: Option<char>) -> InsertDecision {
        if !self.enabled {
            return InsertDecision::Insert(ch);
        }

        if char_at == Some(ch) && self.is_closer(ch) {
            return InsertDecision::SkipOver;
        }

        match self.closer_for(ch) {
            Some(close) => InsertDecision::InsertPair { open: ch, close },
            None => InsertDecision::Insert(ch),
        }
    }

    pub fn decide_backspace(
        &self,
        char_before: Option<char>,
        char_at: Option<char>,
    ) -> BackspaceDecision {
        if !self.enabled {
            return BackspaceDecision::DeleteChar;
        }

        match (char_before, char_at) {
            (Some(open), Some(at)) if self.closer_for(open) == Some(at) => {
                BackspaceDecision::DeletePair
            }
            _ => BackspaceDecision::DeleteChar,
        }
    }
}
