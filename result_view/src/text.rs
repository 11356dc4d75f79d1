//! Plain-text rendering for console hosts and test output.

use crate::{Cell, ResultView};

/// Render a results panel as text.
///
/// Tables are laid out in padded columns under a dashed rule; every other
/// state renders as its message.
pub fn render_text(view: &ResultView) -> String {
    match view {
        ResultView::Idle => String::new(),
        ResultView::Loading { message }
        | ResultView::NoResults { message }
        | ResultView::Error { message } => message.clone(),
        ResultView::Table { headers, rows } => render_table(headers, rows),
    }
}

fn render_table(headers: &[String], rows: &[Vec<Cell>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| width(&cell.text))
                .chain(std::iter::once(width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_padded(headers.iter().map(String::as_str), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        lines.push(join_padded(row.iter().map(|cell| cell.text.as_str()), &widths));
    }
    lines.join("\n")
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(text, w)| format!("{}{}", text, " ".repeat(w - width(text))))
        .collect::<Vec<_>>()
        .join(" | ");
    line.trim_end().to_string()
}

fn width(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        let view = ResultView::Table {
            headers: vec!["id".into(), "name".into()],
            rows: vec![
                vec![Cell::text("1"), Cell::text("Alice")],
                vec![Cell::text("22"), Cell::null()],
            ],
        };
        assert_eq!(
            render_text(&view),
            "id | name\n---+------\n1  | Alice\n22 | NULL"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(render_text(&ResultView::Idle), "");
        assert_eq!(render_text(&ResultView::error("Failed to run query")), "Failed to run query");
        assert_eq!(render_text(&ResultView::loading("Running query...")), "Running query...");
    }

    #[test]
    fn test_blank_cell_keeps_alignment() {
        let view = ResultView::Table {
            headers: vec!["a".into(), "b".into()],
            rows: vec![vec![Cell::blank(), Cell::text("x")]],
        };
        assert_eq!(render_text(&view), "a | b\n--+--\n  | x");
    }
}
