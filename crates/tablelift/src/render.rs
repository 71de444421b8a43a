//! Plain-text renderings of reconstructed tables.

use crate::types::{TableResult, TableSet};

/// Render one table as a GitHub-flavored markdown table.
///
/// The first column carries the service's row index; the header numbers the
/// remaining columns `1..=n`, where `n` is the widest row. Shorter rows are
/// padded with empty cells so every line has the same number of columns.
///
/// # Example
///
/// ```rust
/// use tablelift::render::table_to_markdown;
/// use tablelift::{TableResult, TableRow};
///
/// let table = TableResult {
///     table_id: 0,
///     rows: vec![TableRow { row_id: 1, cells: vec!["Qty ".into(), "5 ".into()], confidence: None }],
/// };
///
/// assert_eq!(
///     table_to_markdown(&table),
///     "| Row | 1 | 2 |\n|------|------|------|\n| 1 | Qty | 5 |\n"
/// );
/// ```
pub fn table_to_markdown(table: &TableResult) -> String {
    if table.rows.is_empty() {
        return String::new();
    }

    let width = table.column_count();
    let mut markdown = String::new();

    markdown.push_str("| Row |");
    for column in 1..=width {
        markdown.push_str(&format!(" {} |", column));
    }
    markdown.push('\n');

    markdown.push('|');
    for _ in 0..=width {
        markdown.push_str("------|");
    }
    markdown.push('\n');

    for row in &table.rows {
        markdown.push_str(&format!("| {} |", row.row_id));
        for column in 0..width {
            let text = row.cells.get(column).map(|cell| escape(cell.trim())).unwrap_or_default();
            if text.is_empty() {
                markdown.push_str("  |");
            } else {
                markdown.push_str(&format!(" {} |", text));
            }
        }
        markdown.push('\n');
    }

    markdown
}

/// Render every table, each under a `## Table N` heading, separated by blank lines.
pub fn tables_to_markdown(set: &TableSet) -> String {
    set.tables
        .iter()
        .map(|table| format!("## Table {}\n\n{}", table.table_id, table_to_markdown(table)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}
