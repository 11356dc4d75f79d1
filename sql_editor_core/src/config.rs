//! Editor configuration

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clause keywords that open an indented block on the next line
pub const DEFAULT_CLAUSE_KEYWORDS: [&str; 7] = [
    "SELECT", "FROM", "WHERE", "GROUP BY", "ORDER BY", "HAVING", "JOIN",
];

pub const DEFAULT_INDENT_UNIT: &str = "  ";

pub const DEFAULT_COMMENT_PREFIX: &str = "-- ";

/// An opening character and the closer auto-inserted after it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct BracketPair {
    pub open: char,
    pub close: char,
}

impl BracketPair {
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// `( [ { ' "`
    pub fn defaults() -> Vec<BracketPair> {
        vec![
            BracketPair::new('(', ')'),
            BracketPair::new('[', ']'),
            BracketPair::new('{', '}'),
            BracketPair::new('\'', '\''),
            BracketPair::new('"', '"'),
        ]
    }
}

/// Editor configuration error
#[derive(Debug, Error)]
pub enum EditorConfigError {
    #[error("indent unit must be non-empty whitespace, got {0:?}")]
    InvalidIndentUnit(String),

    #[error("clause keyword pattern rejected: {0}")]
    KeywordPattern(#[from] regex::Error),
}

/// Editing behaviour knobs
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(default))]
pub struct EditorConfig {
    /// Whitespace quantum used for computed indentation
    pub indent_unit: String,
    /// Keywords matched case-insensitively on Enter
    pub clause_keywords: Vec<String>,
    /// Whether typed openers insert their closer
    pub auto_close: bool,
    pub pairs: Vec<BracketPair>,
    /// Prefix inserted by the comment toggle
    pub comment_prefix: String,
}

impl EditorConfig {
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    pub fn with_clause_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clause_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_auto_close(mut self, enabled: bool) -> Self {
        self.auto_close = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), EditorConfigError> {
        if self.indent_unit.is_empty() || !self.indent_unit.chars().all(char::is_whitespace) {
            return Err(EditorConfigError::InvalidIndentUnit(self.indent_unit.clone()));
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            clause_keywords: DEFAULT_CLAUSE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            auto_close: true,
            pairs: BracketPair::defaults(),
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
        }
    }
}
