// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::{fmt, path::PathBuf, time::Duration};
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Where the CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    Http(Url),
    File(PathBuf),
}

impl CsvSource {
    /// `http://` and `https://` become [`CsvSource::Http`]; anything else is a path.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            anyhow::bail!("CSV source is empty");
        }
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(CsvSource::Http(url)),
            _ => Ok(CsvSource::File(PathBuf::from(raw))),
        }
    }
}

impl fmt::Display for CsvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvSource::Http(url) => write!(f, "{}", url),
            CsvSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("building HTTP client")
}

/// Fetch the whole CSV as text. Invalid UTF-8 is replaced, not rejected.
#[instrument(level = "info", skip(client, source), fields(source = %source))]
pub async fn fetch_csv_text(client: &Client, source: &CsvSource) -> Result<String> {
    let text = match source {
        CsvSource::Http(url) => client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {}", url))?
            .error_for_status()
            .with_context(|| format!("GET {}", url))?
            .text()
            .await
            .with_context(|| format!("reading body from {}", url))?,
        CsvSource::File(path) => {
            let bytes = fs::read(path)
                .await
                .with_context(|| format!("reading CSV file {}", path.display()))?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
    };

    info!(bytes = text.len(), "loaded CSV");
    Ok(text)
}
