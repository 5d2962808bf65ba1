//! Column-aligned node table

use super::node::StatusRow;

pub const HEADERS: [&str; 4] = ["NODE NAME", "ROLE", "STATUS", "INTERNAL IP"];

/// Spaces between columns
const PADDING: usize = 3;

/// Render the header plus one line per row, keeping input order
///
/// Every column except the last is padded to its widest cell plus
/// [`PADDING`]; the last column is never padded.
pub fn render_table(rows: &[StatusRow]) -> String {
    let lines: Vec<[&str; 4]> = std::iter::once(HEADERS)
        .chain(rows.iter().map(StatusRow::cells))
        .collect();

    let mut widths = [0usize; 4];
    for line in &lines {
        for (width, cell) in widths.iter_mut().zip(line.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in &lines {
        for (i, cell) in line.iter().enumerate() {
            if i + 1 == line.len() {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{:<width$}", cell, width = widths[i] + PADDING));
            }
        }
        out.push('\n');
    }
    out
}
