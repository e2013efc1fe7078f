//! Grid tables for result sets.

use rtbf_core::warehouse::ResultSet;

/// Renders a result set as a grid table:
///
/// ```text
/// +------------+---------------+
/// | TABLE_NAME | RECORDS_FOUND |
/// +============+===============+
/// | CUSTOMERS  |             1 |
/// +------------+---------------+
/// ```
///
/// Numeric cells are right-aligned, `NULL` renders as an empty cell.
pub fn format_grid(results: &ResultSet) -> String {
    let headers = results.column_names();
    let rows: Vec<Vec<&str>> = results
        .rows
        .iter()
        .map(|row| {
            row.cells()
                .iter()
                .map(|(_, value)| value.as_deref().unwrap_or(""))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row.get(i).map_or(0, |cell| cell.chars().count()))
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |fill: char| {
        let mut line = String::from("+");
        for width in &widths {
            line.extend(std::iter::repeat_n(fill, width + 2));
            line.push('+');
        }
        line
    };

    let mut lines = vec![rule('-'), render_row(&headers, &widths, false), rule('=')];
    for row in &rows {
        lines.push(render_row(row, &widths, true));
        lines.push(rule('-'));
    }
    if rows.is_empty() {
        lines.pop();
        lines.push(rule('-'));
    }
    lines.join("\n")
}

fn render_row(cells: &[&str], widths: &[usize], align_numbers: bool) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        if align_numbers && is_numeric(cell) {
            line.push_str(&format!(" {:>width$} |", cell, width = width));
        } else {
            line.push_str(&format!(" {:<width$} |", cell, width = width));
        }
    }
    line
}

fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.parse::<f64>().is_ok()
}
