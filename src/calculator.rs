use serde::Serialize;
use std::fmt;

use crate::format::{format_es, format_percent};
use crate::metrics::DerivedMetrics;

/// Estimates how much of a household's consumption is renewable, assuming it
/// matches the global grid mix.
///
/// The grid mix rests on the placeholder total-production estimate, so the
/// result is an approximation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calculator {
    /// Latest-year renewable generation in TWh, shown as installed capacity.
    capacity_twh: f64,
    total_production_multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculatorResult {
    pub consumption_kwh: f64,
    /// Estimated renewable proportion of global production.
    pub global_renewable_share_pct: f64,
    pub renewable_consumption_kwh: f64,
    pub renewable_consumption_pct: f64,
}

impl Calculator {
    pub fn new(capacity_twh: f64, total_production_multiplier: f64) -> Self {
        Self {
            capacity_twh,
            total_production_multiplier,
        }
    }

    pub fn from_metrics(metrics: &DerivedMetrics) -> Self {
        Self::new(
            metrics.latest.renewable_total_twh,
            metrics.estimates.total_production_multiplier,
        )
    }

    pub fn capacity_twh(&self) -> f64 {
        self.capacity_twh
    }

    pub fn global_production_estimate_twh(&self) -> f64 {
        self.capacity_twh * self.total_production_multiplier
    }

    /// Not guarded: a zero capacity yields NaN.
    pub fn global_renewable_share_pct(&self) -> f64 {
        self.capacity_twh / self.global_production_estimate_twh() * 100.0
    }

    pub fn calculate(&self, consumption_kwh: f64) -> CalculatorResult {
        let share = self.global_renewable_share_pct();
        CalculatorResult {
            consumption_kwh,
            global_renewable_share_pct: share,
            renewable_consumption_kwh: consumption_kwh * (share / 100.0),
            renewable_consumption_pct: share,
        }
    }
}

impl fmt::Display for CalculatorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Global renewable share of the grid (estimate): {}",
            format_percent(self.global_renewable_share_pct)
        )?;
        writeln!(
            f,
            "Of your total consumption of {} kWh/year, an estimated:",
            format_es(self.consumption_kwh, 3)
        )?;
        write!(
            f,
            "{} kWh ({}) comes from renewable sources.",
            format_es(self.renewable_consumption_kwh, 2),
            format_percent(self.renewable_consumption_pct)
        )
    }
}
