//! # Result View
//!
//! Structured views of query results and task schemas.
//!
//! ## Philosophy
//!
//! - **Views, not markup**: Hosts receive a tree of headers and cells, not HTML
//! - **Header-driven rows**: Every row is laid out by the first row's columns
//! - **Null is visible**: A null cell is distinct from an empty string
//! - **Testable**: Views are serializable and render to plain text
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A pager or virtualized grid
//! - A formatter for dates or locales

pub mod schema;
pub mod text;

use grading_protocol::{CellValue, QueryResult, NULL_TOKEN};
use serde::{Deserialize, Serialize};

pub use schema::{
    render_result_schema, render_task_schema, ResultSchemaPanel, SchemaColumnLine, SchemaPanel,
    SchemaTablePanel,
};
pub use text::render_text;

pub const DEFAULT_NO_RESULTS_MESSAGE: &str = "Query returned no results";

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    /// Set only for SQL NULL, never for an empty string
    #[serde(default)]
    pub is_null: bool,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_null: false,
        }
    }

    pub fn null() -> Self {
        Self {
            text: NULL_TOKEN.to_string(),
            is_null: true,
        }
    }

    /// Cell for a column the row did not carry
    pub fn blank() -> Self {
        Self::text("")
    }

    fn from_value(value: &CellValue) -> Self {
        if value.is_null() {
            Self::null()
        } else {
            Self::text(value.display_text())
        }
    }
}

/// State of the results panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultView {
    /// Nothing run yet
    Idle,
    Loading { message: String },
    NoResults { message: String },
    Error { message: String },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
    },
}

impl ResultView {
    pub fn loading(message: impl Into<String>) -> Self {
        ResultView::Loading {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ResultView::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultView::Error { .. })
    }

    pub fn is_table(&self) -> bool {
        matches!(self, ResultView::Table { .. })
    }

    pub fn headers(&self) -> &[String] {
        match self {
            ResultView::Table { headers, .. } => headers,
            _ => &[],
        }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        match self {
            ResultView::Table { rows, .. } => rows,
            _ => &[],
        }
    }

    /// Status text shown in place of a table, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ResultView::Loading { message }
            | ResultView::NoResults { message }
            | ResultView::Error { message } => Some(message),
            ResultView::Idle | ResultView::Table { .. } => None,
        }
    }
}

impl Default for ResultView {
    fn default() -> Self {
        ResultView::Idle
    }
}

/// Turns query results into a [`ResultView`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRenderer {
    no_results_message: String,
}

impl ResultRenderer {
    pub fn new(no_results_message: impl Into<String>) -> Self {
        Self {
            no_results_message: no_results_message.into(),
        }
    }

    pub fn render(&self, result: &QueryResult) -> ResultView {
        if result.is_empty() {
            return ResultView::NoResults {
                message: self.no_results_message.clone(),
            };
        }

        let headers: Vec<String> = result.columns().into_iter().map(str::to_string).collect();
        let rows = result
            .rows()
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|header| row.get(header).map(Cell::from_value).unwrap_or_else(Cell::blank))
                    .collect()
            })
            .collect();

        ResultView::Table { headers, rows }
    }
}

impl Default for ResultRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_NO_RESULTS_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grading_protocol::Row;

    fn parse(json: &str) -> QueryResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_result_is_not_a_table() {
        let view = ResultRenderer::default().render(&QueryResult::empty());
        assert_eq!(
            view,
            ResultView::NoResults {
                message: DEFAULT_NO_RESULTS_MESSAGE.to_string()
            }
        );
        assert!(!view.is_table());
    }

    #[test]
    fn test_headers_follow_first_row_order() {
        let result = parse(r#"[{"name": "Ann", "id": 1}, {"id": 2, "name": "Bob"}]"#);
        let view = ResultRenderer::default().render(&result);
        assert_eq!(view.headers(), ["name", "id"]);
        assert_eq!(view.rows()[1], vec![Cell::text("Bob"), Cell::text("2")]);
    }

    #[test]
    fn test_null_is_distinct_from_empty_string() {
        let result = parse(r#"[{"a": null, "b": ""}]"#);
        let view = ResultRenderer::default().render(&result);
        let row = &view.rows()[0];
        assert_eq!(row[0], Cell::null());
        assert_eq!(row[0].text, "NULL");
        assert!(row[0].is_null);
        assert_eq!(row[1], Cell::text(""));
        assert!(!row[1].is_null);
    }

    #[test]
    fn test_missing_keys_are_blank_and_extra_keys_ignored() {
        let result = QueryResult::new(vec![
            Row::new().with("id", 1).with("name", "a"),
            Row::new().with("id", 2).with("extra", "x"),
        ]);
        let view = ResultRenderer::default().render(&result);
        assert_eq!(view.headers(), ["id", "name"]);
        assert_eq!(view.rows()[1], vec![Cell::text("2"), Cell::blank()]);
    }

    #[test]
    fn test_numbers_keep_json_form() {
        let result = parse(r#"[{"total": 12.5, "count": 3}]"#);
        let view = ResultRenderer::default().render(&result);
        assert_eq!(view.rows()[0], vec![Cell::text("12.5"), Cell::text("3")]);
    }

    #[test]
    fn test_custom_no_results_message() {
        let view = ResultRenderer::new("Запрос ничего не вернул").render(&QueryResult::empty());
        assert_eq!(view.message(), Some("Запрос ничего не вернул"));
    }

    #[test]
    fn test_view_serializes() {
        let view = ResultView::error("boom");
        let json = serde_json::to_string(&view).unwrap();
        let back: ResultView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
        assert!(back.is_error());
    }
}
