//! Plain-text rendering for the small tables the bikeshare clients build.

use std::fmt::{self, Write as _};

/// Formats an optional cell the way a dataframe printout does: `NaN` for a
/// missing number, `None` for anything else.
pub(crate) fn float_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_owned(), |v| v.to_string())
}

pub(crate) fn text_cell(value: Option<&str>) -> String {
    value.unwrap_or("None").to_owned()
}

/// Writes `rows` under `columns`, right-aligned, with a leading row index.
pub(crate) fn render(f: &mut fmt::Formatter<'_>, columns: &[&str], rows: &[Vec<String>]) -> fmt::Result {
    let index_width = rows.len().saturating_sub(1).to_string().len();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| rows.iter().map(|r| r[i].chars().count()).fold(name.len(), usize::max))
        .collect();

    let mut line = " ".repeat(index_width);
    for (name, width) in columns.iter().zip(&widths) {
        write!(line, "  {name:>width$}")?;
    }
    writeln!(f, "{}", line.trim_end())?;

    for (n, row) in rows.iter().enumerate() {
        let mut line = format!("{n:<index_width$}");
        for (cell, width) in row.iter().zip(&widths) {
            write!(line, "  {cell:>width$}")?;
        }
        writeln!(f, "{line}")?;
    }
    Ok(())
}
