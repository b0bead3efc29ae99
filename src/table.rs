use prettytable::{format, Cell as TableCell, Row, Table};
use tracing::debug;

use crate::format::format_cell;
use crate::process::utils::parse_int_prefix;
use crate::process::{Cell, NormalizedRow};
use crate::schema::types::YEAR;

pub const NO_DATA_MESSAGE: &str = "No data available for the selected filter.";

/// Year typed by the user, or `None` when it should not filter at all.
pub fn parse_year_filter(input: &str) -> Option<i64> {
    parse_int_prefix(input)
}

/// Rows whose `Year` equals the requested year.
///
/// The comparison is numeric, so `"2020"` and `"2020.0"` both match 2020.
/// Empty or non-numeric input disables the filter and returns every row.
pub fn filter_by_year<'a>(input: &str, rows: &'a [NormalizedRow]) -> Vec<&'a NormalizedRow> {
    let Some(year) = parse_year_filter(input) else {
        return rows.iter().collect();
    };
    let wanted = year as f64;
    let filtered: Vec<&NormalizedRow> = rows
        .iter()
        .filter(|row| row.get(YEAR).and_then(Cell::numeric_value) == Some(wanted))
        .collect();
    debug!(year, matched = filtered.len(), "filtered table");
    filtered
}

/// Render rows as a box-drawn text table, using the first row's columns as
/// header.
pub fn render_table(rows: &[&NormalizedRow]) -> String {
    let Some(first) = rows.first() else {
        return NO_DATA_MESSAGE.to_string();
    };

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(
        first
            .headers()
            .iter()
            .map(|h| TableCell::new(h).style_spec("bFg"))
            .collect(),
    ));

    for row in rows {
        table.add_row(Row::new(
            first
                .headers()
                .iter()
                .map(|h| match row.get(h) {
                    Some(cell @ Cell::Number(_)) => {
                        TableCell::new(&format_cell(cell)).style_spec("r")
                    }
                    Some(cell) => TableCell::new(&format_cell(cell)),
                    None => TableCell::new(Cell::MISSING),
                })
                .collect(),
        ));
    }

    table.to_string()
}
