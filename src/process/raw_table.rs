use std::sync::Arc;

/// One data line of the CSV, keyed by the shared header list.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    headers: Arc<[String]>,
    /// Exactly one value per header; absent trailing fields are empty strings.
    values: Vec<String>,
}

impl RawRecord {
    pub(crate) fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        debug_assert_eq!(headers.len(), values.len());
        Self { headers, values }
    }

    /// Value for `column`. With duplicate header names the last one wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .rposition(|h| h == column)
            .map(|i| self.values[i].as_str())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub(crate) fn shared_headers(&self) -> &Arc<[String]> {
        &self.headers
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column names from the header line, trimmed and unquoted.
    pub headers: Arc<[String]>,
    /// Each non-blank data line, in file order.
    pub records: Vec<RawRecord>,
    /// Lines with fewer fields than headers (padded with empty strings).
    pub short_rows: usize,
    /// Lines with more fields than headers (extra fields dropped).
    pub long_rows: usize,
    pub blank_lines: usize,
}

impl RawTable {
    pub fn empty() -> Self {
        Self {
            headers: Arc::from(Vec::<String>::new()),
            records: Vec::new(),
            short_rows: 0,
            long_rows: 0,
            blank_lines: 0,
        }
    }
}
