use serde::Serialize;
use tracing::{debug, warn};

use super::types::EXPECTED_COLUMNS;

/// How a file's header compares with the fixed column set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    /// Expected columns absent from the header; their typed fields read as missing.
    pub missing_columns: Vec<String>,
    /// Header columns the typed record does not read. They stay in the table.
    pub extra_columns: Vec<String>,
}

impl SchemaReport {
    pub fn from_headers(headers: &[String]) -> Self {
        let missing_columns = EXPECTED_COLUMNS
            .iter()
            .filter(|expected| !headers.iter().any(|h| h == *expected))
            .map(|c| c.to_string())
            .collect();
        let extra_columns = headers
            .iter()
            .filter(|h| !EXPECTED_COLUMNS.contains(&h.as_str()))
            .cloned()
            .collect();

        Self {
            missing_columns,
            extra_columns,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_columns.is_empty()
    }

    pub fn log(&self) {
        if !self.missing_columns.is_empty() {
            warn!(
                missing = ?self.missing_columns,
                "CSV header lacks expected columns; their values read as missing"
            );
        }
        if !self.extra_columns.is_empty() {
            debug!(extra = ?self.extra_columns, "CSV header has untracked columns");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_header_is_complete() {
        let report = SchemaReport::from_headers(&headers(&EXPECTED_COLUMNS));
        assert!(report.is_complete());
        assert!(report.extra_columns.is_empty());
    }

    #[test]
    fn reports_missing_and_extra_columns() {
        let report = SchemaReport::from_headers(&headers(&[
            "Entity",
            "Code",
            "Year",
            "Solar Generation - TWh",
            "Tidal - TWh",
        ]));

        assert!(!report.is_complete());
        assert_eq!(
            report.missing_columns,
            vec![
                "Geo Biomass Other - TWh",
                "Wind Generation - TWh",
                "Hydro Generation - TWh",
                "modern-renewable-energy-consumption",
            ]
        );
        assert_eq!(report.extra_columns, vec!["Tidal - TWh"]);
    }
}
