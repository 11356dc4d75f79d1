//! SqlEditor state machine
//!
//! A non-modal, deterministic editor: every key maps to one edit or cursor
//! move over the owned buffer. Indentation and auto-closing policies are
//! consulted here; the host only forwards keys.

use crate::{
    autoclose::{BackspaceDecision, BracketAutoCloser, InsertDecision},
    buffer::{Position, TextBuffer},
    config::{EditorConfig, EditorConfigError},
    indent::{IndentationContext, IndentationEngine},
    key::Key,
    snapshot::EditorSnapshot,
};

/// Outcome from applying a key to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Nothing happened
    Continue,
    /// Buffer or cursor changed
    Changed,
}

/// SQL editing surface
#[derive(Debug, Clone)]
pub struct SqlEditor {
    buffer: TextBuffer,
    cursor: Position,
    dirty: bool,
    config: EditorConfig,
    indenter: IndentationEngine,
    closer: BracketAutoCloser,
}

impl SqlEditor {
    /// Create a new empty editor
    pub fn new(config: EditorConfig) -> Result<Self, EditorConfigError> {
        let indenter = IndentationEngine::new(&config)?;
        let closer = BracketAutoCloser::new(&config);
        Ok(Self {
            buffer: TextBuffer::new(),
            cursor: Position::zero(),
            dirty: false,
            config,
            indenter,
            closer,
        })
    }

    /// Apply a key event and return the outcome
    pub fn apply_key(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Char('\n') | Key::Enter => self.newline(),
            Key::Char(ch) => self.type_char(ch),
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete_forward(),
            Key::Tab => self.indent(),
            Key::ShiftTab => self.outdent(),
            Key::ToggleComment => self.toggle_comment(),
            Key::Left => self.move_cursor_left(),
            Key::Right => self.move_cursor_right(),
            Key::Up => self.move_cursor_vertical(-1),
            Key::Down => self.move_cursor_vertical(1),
            Key::Home => self.set_col(0),
            Key::End => self.set_col(self.buffer.line_length(self.cursor.row)),
        }
    }

    /// Replace the whole content; the cursor goes to the end
    pub fn set_text(&mut self, text: &str) {
        self.buffer = TextBuffer::from_text(text);
        let last = self.buffer.line_count() - 1;
        self.cursor = Position::new(last, self.buffer.line_length(last));
        self.dirty = false;
    }

    pub fn clear(&mut self) {
        self.buffer = TextBuffer::new();
        self.cursor = Position::zero();
        self.dirty = false;
    }

    /// Move the cursor, clamped to the buffer
    pub fn set_cursor(&mut self, pos: Position) {
        let row = pos.row.min(self.buffer.line_count() - 1);
        let col = pos.col.min(self.buffer.line_length(row));
        self.cursor = Position::new(row, col);
    }

    /// Get a complete snapshot of editor state
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            cursor: self.cursor,
            buffer_lines: self.buffer.lines().to_vec(),
            dirty: self.dirty,
        }
    }

    // Public accessors for rendering/testing
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.as_string()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // Edits

    fn type_char(&mut self, ch: char) -> CoreOutcome {
        match self.closer.decide(ch, self.buffer.char_at(self.cursor)) {
            InsertDecision::SkipOver => {
                self.cursor.col += 1;
                CoreOutcome::Changed
            }
            InsertDecision::Insert(ch) => {
                if self.buffer.insert_char(self.cursor, ch) {
                    self.cursor.col += 1;
                    self.dirty = true;
                    CoreOutcome::Changed
                } else {
                    CoreOutcome::Continue
                }
            }
            InsertDecision::InsertPair { open, close } => {
                let mut pair = String::with_capacity(2);
                pair.push(open);
                pair.push(close);
                if self.buffer.insert_str(self.cursor, &pair) {
                    self.cursor.col += 1;
                    self.dirty = true;
                    CoreOutcome::Changed
                } else {
                    CoreOutcome::Continue
                }
            }
        }
    }

    fn newline(&mut self) -> CoreOutcome {
        let indent = self
            .indenter
            .indent_for_context(IndentationContext::from_buffer(&self.buffer, self.cursor));

        if self.buffer.split_line(self.cursor, &indent) {
            self.cursor = Position::new(self.cursor.row + 1, indent.chars().count());
            self.dirty = true;
            CoreOutcome::Changed
        } else {
            CoreOutcome::Continue
        }
    }

    fn backspace(&mut self) -> CoreOutcome {
        let decision = self.closer.decide_backspace(
            self.buffer.char_before(self.cursor),
            self.buffer.char_at(self.cursor),
        );
        if decision == BackspaceDecision::DeletePair {
            self.buffer.delete_char(self.cursor);
        }

        if let Some(new_pos) = self.buffer.backspace(self.cursor) {
            self.cursor = new_pos;
            self.dirty = true;
            CoreOutcome::Changed
        } else {
            CoreOutcome::Continue
        }
    }

    fn delete_forward(&mut self) -> CoreOutcome {
        if self.buffer.delete_char(self.cursor) {
            self.dirty = true;
            CoreOutcome::Changed
        } else {
            CoreOutcome::Continue
        }
    }

    fn indent(&mut self) -> CoreOutcome {
        let unit = self.indenter.unit().to_string();
        if self.buffer.insert_str(self.cursor, &unit) {
            self.cursor.col += unit.chars().count();
            self.dirty = true;
            CoreOutcome::Changed
        } else {
            CoreOutcome::Continue
        }
    }

    /// Remove up to one indent unit of leading whitespace from the current line
    fn outdent(&mut self) -> CoreOutcome {
        let row = self.cursor.row;
        let leading = self.buffer.leading_whitespace(row).chars().count();
        let width = leading.min(self.indenter.unit().chars().count());
        if width == 0 {
            return CoreOutcome::Continue;
        }

        let removed = self.buffer.remove_range(row, 0, width);
        self.cursor.col = self.cursor.col.saturating_sub(removed);
        self.dirty = true;
        CoreOutcome::Changed
    }

    fn toggle_comment(&mut self) -> CoreOutcome {
        let row = self.cursor.row;
        let prefix = self.config.comment_prefix.clone();
        let marker = prefix.trim_end();
        if marker.is_empty() {
            return CoreOutcome::Continue;
        }

        let indent_width = self.buffer.leading_whitespace(row).chars().count();
        let body = self
            .buffer
            .line(row)
            .map(|line| line.trim_start())
            .unwrap_or("");

        if body.starts_with(marker) {
            let width = if body.starts_with(prefix.as_str()) {
                prefix.chars().count()
            } else {
                marker.chars().count()
            };
            let removed = self.buffer.remove_range(row, indent_width, width);
            if self.cursor.col > indent_width {
                self.cursor.col = self.cursor.col.saturating_sub(removed).max(indent_width);
            }
        } else {
            if !self.buffer.insert_str(Position::new(row, indent_width), &prefix) {
                return CoreOutcome::Continue;
            }
            if self.cursor.col >= indent_width {
                self.cursor.col += prefix.chars().count();
            }
        }

        self.dirty = true;
        CoreOutcome::Changed
    }

    // Cursor movement

    fn move_cursor_left(&mut self) -> CoreOutcome {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.buffer.line_length(self.cursor.row);
        } else {
            return CoreOutcome::Continue;
        }
        CoreOutcome::Changed
    }

    fn move_cursor_right(&mut self) -> CoreOutcome {
        if self.cursor.col < self.buffer.line_length(self.cursor.row) {
            self.cursor.col += 1;
        } else if self.cursor.row + 1 < self.buffer.line_count() {
            self.cursor = Position::new(self.cursor.row + 1, 0);
        } else {
            return CoreOutcome::Continue;
        }
        CoreOutcome::Changed
    }

    fn move_cursor_vertical(&mut self, delta: isize) -> CoreOutcome {
        let Some(row) = self.cursor.row.checked_add_signed(delta) else {
            return CoreOutcome::Continue;
        };
        if row >= self.buffer.line_count() {
            return CoreOutcome::Continue;
        }
        self.cursor.row = row;
        self.cursor.col = self.cursor.col.min(self.buffer.line_length(row));
        CoreOutcome::Changed
    }

    fn set_col(&mut self, col: usize) -> CoreOutcome {
        if self.cursor.col == col {
            return CoreOutcome::Continue;
        }
        self.cursor.col = col;
        CoreOutcome::Changed
    }
}
