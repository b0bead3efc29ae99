// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

/// Where the CSV is read from when nothing else is configured.
pub const DEFAULT_CSV_SOURCE: &str = "02_modern-renewable-energy-consumption.csv";

/// Entity whose rows hold the worldwide totals.
pub const DEFAULT_AGGREGATE_ENTITY: &str = "World";

/// Multipliers behind the proxy estimates.
///
/// The dataset has no total-electricity or conventional-consumption columns.
/// These numbers are placeholder assumptions, not measurements: conventional
/// consumption is taken as `conventional_multiplier` times renewable, total
/// production as `total_production_multiplier` times renewable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateConfig {
    pub conventional_multiplier: f64,
    pub total_production_multiplier: f64,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            conventional_multiplier: 4.0,
            total_production_multiplier: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// File path or `http(s)://` URL of the CSV.
    pub source: String,
    pub aggregate_entity: String,
    pub request_timeout_secs: u64,
    pub estimates: EstimateConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_CSV_SOURCE.to_string(),
            aggregate_entity: DEFAULT_AGGREGATE_ENTITY.to_string(),
            request_timeout_secs: 30,
            estimates: EstimateConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("parsing dashboard config YAML")
    }

    /// Load a YAML config file. Fields left out keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("in config file {}", path.display()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_dashboard_assumptions() {
        let config = DashboardConfig::default();
        assert_eq!(config.source, "02_modern-renewable-energy-consumption.csv");
        assert_eq!(config.aggregate_entity, "World");
        assert_eq!(config.estimates.conventional_multiplier, 4.0);
        assert_eq!(config.estimates.total_production_multiplier, 5.0);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_yaml_keeps_defaults() -> Result<()> {
        let config = DashboardConfig::from_yaml_str(
            "source: https://example.com/data.csv\nestimates:\n  conventional_multiplier: 3.5\n",
        )?;

        assert_eq!(config.source, "https://example.com/data.csv");
        assert_eq!(config.aggregate_entity, "World");
        assert_eq!(config.estimates.conventional_multiplier, 3.5);
        assert_eq!(config.estimates.total_production_multiplier, 5.0);
        Ok(())
    }

    #[test]
    fn load_reads_file() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "aggregate_entity: Europe")?;
        writeln!(tmp, "request_timeout_secs: 5")?;

        let config = DashboardConfig::load(tmp.path())?;
        assert_eq!(config.aggregate_entity, "Europe");
        assert_eq!(config.request_timeout_secs, 5);
        Ok(())
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(DashboardConfig::from_yaml_str("estimates: [1, 2").is_err());
        assert!(DashboardConfig::load("/nonexistent/renewdash.yaml").is_err());
    }
}
