//! SQL-aware indentation for new lines
//!
//! A single-line lookback heuristic, not a parser. A keyword inside a string
//! literal still counts as a clause keyword.

use regex::{Regex, RegexBuilder};

use crate::buffer::{leading_whitespace, Position, TextBuffer};
use crate::config::{EditorConfig, EditorConfigError};

/// Inputs to an Enter decision, derived from the buffer on each keypress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentationContext<'a> {
    /// Full text of the line the cursor was on
    pub previous_line: &'a str,
    /// That line's existing leading whitespace
    pub current_leading: &'a str,
}

impl<'a> IndentationContext<'a> {
    pub fn from_buffer(buffer: &'a TextBuffer, cursor: Position) -> Self {
        let previous_line = buffer.line(cursor.row).unwrap_or("");
        Self {
            previous_line,
            current_leading: leading_whitespace(previous_line),
        }
    }
}

/// Which rule produced an indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentRule {
    OpenParen,
    ClauseKeyword,
    Copy,
}

/// Computes the indentation of a freshly inserted line
#[derive(Debug, Clone)]
pub struct IndentationEngine {
    unit: String,
    keywords: Option<Regex>,
}

impl IndentationEngine {
    pub fn new(config: &EditorConfig) -> Result<Self, EditorConfigError> {
        config.validate()?;
        Ok(Self {
            unit: config.indent_unit.clone(),
            keywords: keyword_pattern(&config.clause_keywords)?,
        })
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Classify the previous line, in rule priority order
    pub fn rule_for(&self, previous_line: &str) -> IndentRule {
        if previous_line.trim_end().ends_with('(') {
            IndentRule::OpenParen
        } else if self.has_clause_keyword(previous_line) {
            IndentRule::ClauseKeyword
        } else {
            IndentRule::Copy
        }
    }

    /// Indentation string to prepend to the new line
    pub fn indent_for_newline(&self, previous_line: &str, current_leading: &str) -> String {
        match self.rule_for(previous_line) {
            IndentRule::OpenParen => self.unit.repeat(2),
            IndentRule::ClauseKeyword => {
                let mut indent = String::with_capacity(current_leading.len() + self.unit.len());
                indent.push_str(current_leading);
                indent.push_str(&self.unit);
                indent
            }
            IndentRule::Copy => current_leading.to_string(),
        }
    }

    pub fn indent_for_context(&self, context: IndentationContext<'_>) -> String {
        self.indent_for_newline(context.previous_line, context.current_leading)
    }

    pub fn has_clause_keyword(&self, line: &str) -> bool {
        self.keywords
            .as_ref()
            .map(|pattern| pattern.is_match(line))
            .unwrap_or(false)
    }
}

/// Whole-word, case-insensitive alternation; multi-word keywords accept any
/// run of whitespace between their words.
fn keyword_pattern(keywords: &[String]) -> Result<Option<Regex>, regex::Error> {
    let alternatives: Vec<String> = keywords
        .iter()
        .map(|keyword| {
            keyword
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .filter(|alt| !alt.is_empty())
        .collect();

    if alternatives.is_empty() {
        return Ok(None);
    }

    let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map(Some)
}
