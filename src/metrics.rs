use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::EstimateConfig;
use crate::process::{Cell, NormalizedRow};
use crate::schema::{EnergyRecord, EnergySource};

/// One value per tracked source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SourceValues {
    pub biomass_other: f64,
    pub solar: f64,
    pub wind: f64,
    pub hydro: f64,
}

impl SourceValues {
    pub fn from_fn(mut f: impl FnMut(EnergySource) -> f64) -> Self {
        Self {
            biomass_other: f(EnergySource::BiomassOther),
            solar: f(EnergySource::Solar),
            wind: f(EnergySource::Wind),
            hydro: f(EnergySource::Hydro),
        }
    }

    pub fn get(&self, source: EnergySource) -> f64 {
        match source {
            EnergySource::BiomassOther => self.biomass_other,
            EnergySource::Solar => self.solar,
            EnergySource::Wind => self.wind,
            EnergySource::Hydro => self.hydro,
        }
    }

    /// Values in [`EnergySource::ALL`] order.
    pub fn to_vec(&self) -> Vec<f64> {
        EnergySource::ALL.iter().map(|s| self.get(*s)).collect()
    }

    pub fn total(&self) -> f64 {
        EnergySource::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// Percentage share of each source in the total.
///
/// Not guarded: with a zero total every share is NaN.
pub fn shares(values: &SourceValues) -> SourceValues {
    let total = values.total();
    SourceValues::from_fn(|s| 100.0 * values.get(s) / total)
}

/// Metrics of the latest year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointInTime {
    pub year: Option<String>,
    /// Generation per source in TWh, missing values counted as zero.
    pub production_twh: SourceValues,
    pub share_pct: SourceValues,
    pub renewable_total_twh: f64,
    /// Placeholder estimate: `renewable_total_twh * total_production_multiplier`.
    pub global_production_estimate_twh: f64,
}

/// Year-indexed series over the whole global series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub years: Vec<String>,
    pub biomass_other_twh: Vec<f64>,
    pub solar_twh: Vec<f64>,
    pub wind_twh: Vec<f64>,
    pub hydro_twh: Vec<f64>,
    pub consumption_twh: Vec<f64>,
    /// Placeholder estimate: `consumption_twh * conventional_multiplier`.
    pub conventional_estimate_twh: Vec<f64>,
}

impl TimeSeries {
    pub fn source(&self, source: EnergySource) -> &[f64] {
        match source {
            EnergySource::BiomassOther => &self.biomass_other_twh,
            EnergySource::Solar => &self.solar_twh,
            EnergySource::Wind => &self.wind_twh,
            EnergySource::Hydro => &self.hydro_twh,
        }
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub latest: PointInTime,
    pub history: TimeSeries,
    pub estimates: EstimateConfig,
}

pub fn point_in_time(record: &EnergyRecord, estimates: &EstimateConfig) -> PointInTime {
    let production_twh = SourceValues::from_fn(|s| record.source_or_zero(s));
    let renewable_total_twh = production_twh.total();

    PointInTime {
        year: record.year_label.clone(),
        share_pct: shares(&production_twh),
        production_twh,
        renewable_total_twh,
        global_production_estimate_twh: renewable_total_twh
            * estimates.total_production_multiplier,
    }
}

pub fn time_series(records: &[EnergyRecord], estimates: &EstimateConfig) -> TimeSeries {
    let column = |source: EnergySource| -> Vec<f64> {
        records.iter().map(|r| r.source_or_zero(source)).collect()
    };
    let consumption_twh: Vec<f64> = records
        .iter()
        .map(|r| r.modern_consumption_twh.unwrap_or(0.0))
        .collect();
    let conventional_estimate_twh = consumption_twh
        .iter()
        .map(|c| c * estimates.conventional_multiplier)
        .collect();

    TimeSeries {
        years: records
            .iter()
            .map(|r| {
                r.year_label
                    .clone()
                    .unwrap_or_else(|| Cell::MISSING.to_string())
            })
            .collect(),
        biomass_other_twh: column(EnergySource::BiomassOther),
        solar_twh: column(EnergySource::Solar),
        wind_twh: column(EnergySource::Wind),
        hydro_twh: column(EnergySource::Hydro),
        consumption_twh,
        conventional_estimate_twh,
    }
}

/// Derive every dashboard metric from the global series.
///
/// Returns `None` for an empty series; callers skip the dashboard then.
#[instrument(level = "debug", skip_all, fields(rows = series.len()))]
pub fn derive_metrics(
    series: &[NormalizedRow],
    estimates: &EstimateConfig,
) -> Option<DerivedMetrics> {
    let records: Vec<EnergyRecord> = series.iter().map(EnergyRecord::from_row).collect();
    let latest = point_in_time(records.last()?, estimates);
    debug!(
        year = ?latest.year,
        total_twh = latest.renewable_total_twh,
        "latest renewable production"
    );

    Some(DerivedMetrics {
        latest,
        history: time_series(&records, estimates),
        estimates: *estimates,
    })
}
