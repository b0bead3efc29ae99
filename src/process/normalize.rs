use serde::ser::{Serialize, SerializeMap, Serializer};
use std::{fmt, sync::Arc};
use tracing::{debug, instrument};

use crate::process::raw_table::RawRecord;
use crate::process::utils::{parse_finite, parse_float_prefix};
use crate::schema::types::is_categorical;

/// A normalized cell: kept text, a finite number, or the `"N/A"` sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    pub const MISSING: &'static str = "N/A";

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Read the cell as a number, parsing text cells. Used for `Year`, which
    /// stays text but is compared numerically.
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => parse_finite(s),
            Cell::Missing => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Missing => f.write_str(Cell::MISSING),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Missing => serializer.serialize_str(Cell::MISSING),
        }
    }
}

/// Type one raw value according to its column.
///
/// Identifying columns keep their text. Everything else becomes a number when
/// it starts with a finite one (`"12 TWh"` is `12`); the sentinel is only the
/// fallback for blanks, so an empty cell is `Missing`, never `0`.
pub fn normalize_value(column: &str, raw: &str) -> Cell {
    if is_categorical(column) {
        return if raw.trim().is_empty() {
            Cell::Missing
        } else {
            Cell::Text(raw.to_string())
        };
    }
    if let Some(n) = parse_float_prefix(raw) {
        return Cell::Number(n);
    }
    if raw.trim().is_empty() {
        Cell::Missing
    } else {
        Cell::Text(raw.to_string())
    }
}

/// A record after typing; shares its header list with the raw record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    headers: Arc<[String]>,
    cells: Vec<Cell>,
}

impl NormalizedRow {
    pub fn new(headers: Arc<[String]>, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(headers.len(), cells.len());
        Self { headers, cells }
    }

    /// Build a row from `(column, cell)` pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Cell)>,
        K: Into<String>,
    {
        let (headers, cells): (Vec<String>, Vec<Cell>) =
            pairs.into_iter().map(|(k, c)| (k.into(), c)).unzip();
        Self::new(Arc::from(headers), cells)
    }

    /// Cell for `column`. With duplicate header names the last one wins.
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.headers
            .iter()
            .rposition(|h| h == column)
            .map(|i| &self.cells[i])
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.headers.iter().map(String::as_str).zip(self.cells.iter())
    }
}

impl Serialize for NormalizedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, cell) in self.iter() {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

pub fn normalize_record(record: &RawRecord) -> NormalizedRow {
    let cells = record
        .iter()
        .map(|(column, raw)| normalize_value(column, raw))
        .collect();
    NormalizedRow::new(Arc::clone(record.shared_headers()), cells)
}

/// Normalize every record, preserving length and order.
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn normalize_records(records: &[RawRecord]) -> Vec<NormalizedRow> {
    let rows: Vec<NormalizedRow> = records.iter().map(normalize_record).collect();
    let missing = rows
        .iter()
        .flat_map(|r| r.cells())
        .filter(|c| c.is_missing())
        .count();
    debug!(rows = rows.len(), missing, "normalized records");
    rows
}

/// Run an already-normalized row through the rules again. Numbers and the
/// sentinel pass through unchanged, so this is a no-op on any row produced by
/// [`normalize_record`].
pub fn renormalize(row: &NormalizedRow) -> NormalizedRow {
    let cells = row
        .iter()
        .map(|(column, cell)| match cell {
            Cell::Text(s) => normalize_value(column, s),
            other => other.clone(),
        })
        .collect();
    NormalizedRow::new(Arc::clone(&row.headers), cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::parse::parse_csv;

    #[test]
    fn identifying_columns_stay_text() {
        let table = parse_csv("Entity,Code,Year,Solar\nWorld,OWID_WRL,2020,5.5\n");
        let row = normalize_record(&table.records[0]);

        assert_eq!(row.get("Entity"), Some(&Cell::Text("World".into())));
        assert_eq!(row.get("Code"), Some(&Cell::Text("OWID_WRL".into())));
        assert_eq!(row.get("Year"), Some(&Cell::Text("2020".into())));
        assert_eq!(row.get("Solar"), Some(&Cell::Number(5.5)));
    }

    #[test]
    fn numeric_looking_code_is_not_coerced() {
        assert_eq!(normalize_value("Code", "004"), Cell::Text("004".into()));
        assert_eq!(normalize_value("Year", "1999"), Cell::Text("1999".into()));
    }

    #[test]
    fn blank_values_become_sentinel() {
        let cell = normalize_value("Solar Generation - TWh", "");
        assert_eq!(cell, Cell::Missing);
        assert_eq!(cell.to_string(), "N/A");
        assert_ne!(cell, Cell::Number(0.0));

        assert_eq!(normalize_value("Code", ""), Cell::Missing);
    }

    #[test]
    fn non_numeric_values_stay_text() {
        assert_eq!(
            normalize_value("Notes", "estimated"),
            Cell::Text("estimated".into())
        );
        assert_eq!(normalize_value("Solar", "inf"), Cell::Text("inf".into()));
        assert_eq!(normalize_value("Solar", "n/a"), Cell::Text("n/a".into()));
    }

    #[test]
    fn leading_numbers_are_read_through_trailing_text() {
        assert_eq!(normalize_value("Solar", "12 TWh"), Cell::Number(12.0));
        assert_eq!(normalize_value("Solar", "3.5x"), Cell::Number(3.5));
        assert_eq!(normalize_value("Code", "12 TWh"), Cell::Text("12 TWh".into()));

        let table = parse_csv("Entity,Solar,Wind\nWorld,12 TWh,3.5x\n");
        let row = normalize_record(&table.records[0]);
        assert_eq!(row.get("Solar"), Some(&Cell::Number(12.0)));
        assert_eq!(renormalize(&row), row);
    }

    #[test]
    fn short_row_padding_resolves_to_sentinel() {
        let table = parse_csv("Entity,Code,Year,Solar\nWorld,OWID_WRL\n");
        let rows = normalize_records(&table.records);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Year"), Some(&Cell::Missing));
        assert_eq!(rows[0].get("Solar"), Some(&Cell::Missing));
    }

    #[test]
    fn renormalizing_is_a_no_op() {
        let table = parse_csv(
            "Entity,Code,Year,Solar,Wind,Notes\nWorld,004,2020,5.5,,draft\nUSA,,2021,0.1,3,\n",
        );
        for row in normalize_records(&table.records) {
            let again = renormalize(&row);
            assert_eq!(again, row);
            assert_eq!(renormalize(&again), row);
        }
    }

    #[test]
    fn rows_serialize_as_ordered_maps() -> anyhow::Result<()> {
        let row = NormalizedRow::from_pairs([
            ("Entity", Cell::Text("World".into())),
            ("Solar", Cell::Number(5.5)),
            ("Wind", Cell::Missing),
        ]);
        let json = serde_json::to_string(&row)?;
        assert_eq!(json, r#"{"Entity":"World","Solar":5.5,"Wind":"N/A"}"#);
        Ok(())
    }
}
