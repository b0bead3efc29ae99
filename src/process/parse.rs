use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::process::raw_table::{RawRecord, RawTable};
use crate::process::utils::clean_str;

/// Split CSV text into records keyed by the first line's headers.
///
/// Splitting is purely positional on `,`: quotes are stripped from every
/// header and value but never group fields. Ragged lines are tolerated, short
/// ones padded with `""` and long ones truncated to the header count. A
/// leading UTF-8 byte order mark is dropped.
#[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
pub fn parse_csv(text: &str) -> RawTable {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split('\n');

    let header_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => {
            warn!("CSV text has no header line");
            return RawTable::empty();
        }
    };

    let headers: Arc<[String]> = header_line.split(',').map(clean_str).collect();
    let mut table = RawTable {
        headers: Arc::clone(&headers),
        ..RawTable::empty()
    };

    for line in lines {
        if line.trim().is_empty() {
            table.blank_lines += 1;
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < headers.len() {
            table.short_rows += 1;
        } else if fields.len() > headers.len() {
            table.long_rows += 1;
        }

        let values: Vec<String> = (0..headers.len())
            .map(|i| fields.get(i).map(|v| clean_str(v)).unwrap_or_default())
            .collect();

        table
            .records
            .push(RawRecord::new(Arc::clone(&headers), values));
    }

    if table.short_rows > 0 || table.long_rows > 0 {
        debug!(
            short = table.short_rows,
            long = table.long_rows,
            headers = headers.len(),
            "ragged CSV rows"
        );
    }
    debug!(records = table.records.len(), "parsed CSV");

    table
}
