//! Workbench view tree and console rendering

use result_view::{render_text, ResultSchemaPanel, ResultView, SchemaPanel};
use serde::{Deserialize, Serialize};
use sql_editor_core::Position;

use crate::state::{TaskStatus, WorkbenchMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorPane {
    pub lines: Vec<String>,
    pub cursor: Position,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHeader {
    pub id: u64,
    pub name: String,
    pub difficulty: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns_info: Option<String>,
}

/// Everything a host needs to draw the workbench
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbenchView {
    pub mode: WorkbenchMode,
    pub editor: EditorPane,
    /// Absent until the task has loaded, and always in authoring mode
    pub task: Option<TaskHeader>,
    pub status: Option<TaskStatus>,
    pub status_label: Option<String>,
    pub selected_tables: Vec<String>,
    pub schema: Option<SchemaPanel>,
    pub result_schema: Option<ResultSchemaPanel>,
    /// Inline feedback under the editor
    pub error_line: Option<String>,
    pub results: ResultView,
    /// Success banner after an accepted submission
    pub banner: Option<String>,
}

/// Text rendering of a [`WorkbenchView`] for consoles and test output.
pub struct WorkbenchRenderer {
    /// Number of editor lines to show
    viewport_lines: usize,
}

impl WorkbenchRenderer {
    pub fn new(viewport_lines: usize) -> Self {
        Self { viewport_lines }
    }

    pub fn render(&self, view: &WorkbenchView) -> String {
        let mut output = String::new();

        for row in 0..self.viewport_lines {
            match view.editor.lines.get(row) {
                Some(line) if row == view.editor.cursor.row => {
                    output.push_str(&render_line_with_cursor(line, view.editor.cursor.col));
                }
                Some(line) => output.push_str(line),
                None => output.push('~'),
            }
            output.push('\n');
        }

        output.push_str(&self.render_status(view));

        if let Some(error) = &view.error_line {
            output.push_str("\n! ");
            output.push_str(error);
        }
        if let Some(banner) = &view.banner {
            output.push_str("\n* ");
            output.push_str(banner);
        }

        let results = render_text(&view.results);
        if !results.is_empty() {
            output.push('\n');
            output.push_str(&results);
        }

        output
    }

    /// Mode, task, status and selection on one line
    pub fn render_status(&self, view: &WorkbenchView) -> String {
        let mut status = String::from(view.mode.as_str());

        if let Some(task) = &view.task {
            status.push(' ');
            status.push_str(&task.name);
            if view.editor.dirty {
                status.push('*');
            }
        } else if view.editor.dirty {
            status.push_str(" [query]*");
        }

        if let Some(label) = &view.status_label {
            status.push_str(" | ");
            status.push_str(label);
        }

        if !view.selected_tables.is_empty() {
            status.push_str(" | ");
            status.push_str(&view.selected_tables.join(", "));
        }

        status
    }
}

impl Default for WorkbenchRenderer {
    fn default() -> Self {
        Self::new(10)
    }
}

fn render_line_with_cursor(line: &str, col: usize) -> String {
    let mut result = String::new();
    let mut len = 0;
    for (i, ch) in line.chars().enumerate() {
        if i == col {
            result.push('[');
            result.push(ch);
            result.push(']');
        } else {
            result.push(ch);
        }
        len += 1;
    }
    if col >= len {
        result.push_str("[ ]");
    }
    result
}
