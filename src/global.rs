use std::cmp::Ordering;
use tracing::{debug, instrument, warn};

use crate::process::{Cell, NormalizedRow};
use crate::schema::types::{ENTITY, YEAR};

fn year_of(row: &NormalizedRow) -> Option<f64> {
    row.get(YEAR).and_then(Cell::numeric_value)
}

fn by_year(a: &NormalizedRow, b: &NormalizedRow) -> Ordering {
    match (year_of(a), year_of(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rows of the aggregate entity, ordered by year.
///
/// The sort is stable: rows sharing a year keep their file order and rows
/// without a numeric year go last in file order.
#[instrument(level = "debug", skip(rows), fields(input = rows.len()))]
pub fn global_series(rows: &[NormalizedRow], aggregate_entity: &str) -> Vec<NormalizedRow> {
    let mut series: Vec<NormalizedRow> = rows
        .iter()
        .filter(|row| row.get(ENTITY).and_then(Cell::as_text) == Some(aggregate_entity))
        .cloned()
        .collect();

    let chronological = series
        .windows(2)
        .all(|w| by_year(&w[0], &w[1]) != Ordering::Greater);
    if !chronological {
        warn!(
            entity = aggregate_entity,
            "aggregate rows are not in year order; sorting"
        );
        series.sort_by(by_year);
    }

    debug!(entity = aggregate_entity, len = series.len(), "global series");
    series
}
