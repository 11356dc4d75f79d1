//! Text buffer and position types
//!
//! Columns are character indices, not byte offsets, so multi-byte text
//! (string literals in any language) never splits a code point.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Cursor position in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Returns the leading whitespace prefix of `line`.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map(|(idx, _)| idx)
        .unwrap_or(line.len());
    &line[..end]
}

/// Byte offset of character column `col`, or `None` past the end of the line.
fn byte_index(line: &str, col: usize) -> Option<usize> {
    if col == 0 {
        return Some(0);
    }
    let mut indices = line.char_indices().map(|(idx, _)| idx).skip(col);
    match indices.next() {
        Some(idx) => Some(idx),
        None if line.chars().count() == col => Some(line.len()),
        None => None,
    }
}

/// Text buffer with line-based storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Builds a buffer from text. A trailing newline keeps its empty last line.
    pub fn from_text(content: &str) -> Self {
        let lines = content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }

    pub fn as_string(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Line length in characters
    pub fn line_length(&self, row: usize) -> usize {
        self.lines.get(row).map(|s| s.chars().count()).unwrap_or(0)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Total length in characters, counting one per line break
    pub fn char_count(&self) -> usize {
        let chars: usize = self.lines.iter().map(|l| l.chars().count()).sum();
        chars + self.lines.len() - 1
    }

    pub fn leading_whitespace(&self, row: usize) -> &str {
        self.line(row).map(leading_whitespace).unwrap_or("")
    }

    /// Character immediately at (right of) the cursor on the same line
    pub fn char_at(&self, pos: Position) -> Option<char> {
        self.line(pos.row)?.chars().nth(pos.col)
    }

    /// Character immediately before (left of) the cursor on the same line
    pub fn char_before(&self, pos: Position) -> Option<char> {
        if pos.col == 0 {
            return None;
        }
        self.line(pos.row)?.chars().nth(pos.col - 1)
    }

    /// Insert a character at position
    pub fn insert_char(&mut self, pos: Position, ch: char) -> bool {
        let Some(line) = self.lines.get_mut(pos.row) else {
            return false;
        };
        let Some(idx) = byte_index(line, pos.col) else {
            return false;
        };

        line.insert(idx, ch);
        true
    }

    /// Insert single-line text at position
    pub fn insert_str(&mut self, pos: Position, text: &str) -> bool {
        if text.contains('\n') {
            return false;
        }
        let Some(line) = self.lines.get_mut(pos.row) else {
            return false;
        };
        let Some(idx) = byte_index(line, pos.col) else {
            return false;
        };

        line.insert_str(idx, text);
        true
    }

    /// Split the line at position; the new line starts with `indent`
    /// followed by whatever was right of the cursor.
    pub fn split_line(&mut self, pos: Position, indent: &str) -> bool {
        let Some(line) = self.lines.get_mut(pos.row) else {
            return false;
        };
        let Some(idx) = byte_index(line, pos.col) else {
            return false;
        };

        let rest = line.split_off(idx);
        let mut next = String::with_capacity(indent.len() + rest.len());
        next.push_str(indent);
        next.push_str(&rest);
        self.lines.insert(pos.row + 1, next);
        true
    }

    /// Insert a newline at position, splitting the line
    pub fn insert_newline(&mut self, pos: Position) -> bool {
        self.split_line(pos, "")
    }

    /// Delete character at position (forward delete).
    /// At end of line the next line is joined onto this one.
    pub fn delete_char(&mut self, pos: Position) -> bool {
        if pos.row >= self.lines.len() {
            return false;
        }

        let line = &mut self.lines[pos.row];
        let Some(idx) = byte_index(line, pos.col) else {
            return false;
        };
        if idx < line.len() {
            line.remove(idx);
            return true;
        }

        if pos.row + 1 < self.lines.len() {
            let next = self.lines.remove(pos.row + 1);
            self.lines[pos.row].push_str(&next);
            true
        } else {
            false
        }
    }

    /// Delete character before position (backspace)
    /// Returns new cursor position if successful
    pub fn backspace(&mut self, pos: Position) -> Option<Position> {
        if pos.row >= self.lines.len() {
            return None;
        }

        if pos.col > 0 {
            // Delete character on same line
            let line = &mut self.lines[pos.row];
            let idx = byte_index(line, pos.col - 1)?;
            if idx >= line.len() {
                return None;
            }
            line.remove(idx);
            Some(Position::new(pos.row, pos.col - 1))
        } else if pos.row > 0 {
            // Join with previous line
            let current_line = self.lines.remove(pos.row);
            let prev_line = &mut self.lines[pos.row - 1];
            let new_col = prev_line.chars().count();
            prev_line.push_str(&current_line);
            Some(Position::new(pos.row - 1, new_col))
        } else {
            None
        }
    }

    /// Remove `count` characters starting at column `col` of `row`.
    /// Returns the number of characters actually removed.
    pub fn remove_range(&mut self, row: usize, col: usize, count: usize) -> usize {
        let Some(line) = self.lines.get_mut(row) else {
            return 0;
        };
        let Some(start) = byte_index(line, col) else {
            return 0;
        };
        let end = byte_index(line, col + count).unwrap_or(line.len());
        let removed = line[start..end].chars().count();
        line.replace_range(start..end, "");
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
