use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::metrics::{DerivedMetrics, PointInTime, TimeSeries};
use crate::schema::EnergySource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
    Line,
}

/// One colour for the whole dataset or one per data point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    pub fill: bool,
}

/// Declarative description of one chart, independent of any renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub y_axis_label: String,
}

impl ChartSpec {
    /// Chart.js style configuration object.
    pub fn to_chartjs(&self) -> Value {
        let mut options = json!({ "responsive": true, "maintainAspectRatio": false });
        match self.kind {
            ChartKind::Bar | ChartKind::Line => {
                options["scales"] = json!({
                    "y": {
                        "title": { "display": true, "text": self.y_axis_label },
                        "beginAtZero": true,
                    }
                });
            }
            ChartKind::Doughnut => {
                options["plugins"] = json!({
                    "legend": { "position": "bottom" },
                    "tooltip": { "enabled": true },
                });
            }
        }

        json!({
            "type": self.kind,
            "data": { "labels": self.labels, "datasets": self.datasets },
            "options": options,
        })
    }
}

fn source_labels() -> Vec<String> {
    EnergySource::ALL.iter().map(|s| s.label().to_string()).collect()
}

fn source_colours() -> Paint {
    Paint::PerPoint(EnergySource::ALL.iter().map(|s| s.colour().to_string()).collect())
}

/// Bar chart of the latest year's generation per source.
pub fn production_chart(latest: &PointInTime) -> ChartSpec {
    let label = "Production (TWh)";
    ChartSpec {
        kind: ChartKind::Bar,
        labels: source_labels(),
        datasets: vec![Dataset {
            label: label.to_string(),
            data: latest.production_twh.to_vec(),
            background_color: Some(source_colours()),
            border_color: Some(source_colours()),
            border_width: Some(1),
            fill: false,
        }],
        y_axis_label: label.to_string(),
    }
}

/// Doughnut chart of each source's share of the latest year's total.
///
/// Shares are rounded to two decimals so the default tooltip shows them that
/// way; the `%` unit is carried by the dataset label.
pub fn share_chart(latest: &PointInTime) -> ChartSpec {
    let label = "Share (%)";
    ChartSpec {
        kind: ChartKind::Doughnut,
        labels: source_labels(),
        datasets: vec![Dataset {
            label: label.to_string(),
            data: latest
                .share_pct
                .to_vec()
                .into_iter()
                .map(|v| (v * 100.0).round() / 100.0)
                .collect(),
            background_color: Some(source_colours()),
            border_color: Some(source_colours()),
            border_width: Some(1),
            fill: false,
        }],
        y_axis_label: label.to_string(),
    }
}

/// Line chart of hydro, wind and solar generation over the years.
pub fn trend_chart(history: &TimeSeries) -> ChartSpec {
    let datasets = [EnergySource::Hydro, EnergySource::Wind, EnergySource::Solar]
        .into_iter()
        .map(|source| Dataset {
            label: format!("{} Generation (TWh)", source.label()),
            data: history.source(source).to_vec(),
            background_color: None,
            border_color: Some(Paint::Single(source.trend_colour().to_string())),
            border_width: None,
            fill: false,
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Line,
        labels: history.years.clone(),
        datasets,
        y_axis_label: "Generation (TWh)".to_string(),
    }
}

/// Filled line chart of renewable consumption next to the conventional estimate.
pub fn consumption_chart(history: &TimeSeries) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        labels: history.years.clone(),
        datasets: vec![
            Dataset {
                label: "Renewable Consumption (TWh)".to_string(),
                data: history.consumption_twh.clone(),
                background_color: Some(Paint::Single("rgba(40, 167, 69, 0.4)".to_string())),
                border_color: Some(Paint::Single("#28a745".to_string())),
                border_width: None,
                fill: true,
            },
            Dataset {
                label: "Conventional Consumption (Estimated TWh)".to_string(),
                data: history.conventional_estimate_twh.clone(),
                background_color: Some(Paint::Single("rgba(220, 53, 69, 0.4)".to_string())),
                border_color: Some(Paint::Single("#dc3545".to_string())),
                border_width: None,
                fill: true,
            },
        ],
        y_axis_label: "Consumption (TWh)".to_string(),
    }
}

/// Visual slot a chart is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ChartSlot {
    Production,
    Share,
    Trend,
    Consumption,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 4] = [
        ChartSlot::Production,
        ChartSlot::Share,
        ChartSlot::Trend,
        ChartSlot::Consumption,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ChartSlot::Production => "chart-bar",
            ChartSlot::Share => "chart-doughnut",
            ChartSlot::Trend => "chart-line",
            ChartSlot::Consumption => "chart-area",
        }
    }
}

/// A live chart in a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    pub slot: ChartSlot,
    /// Starts at 1 and increases each time the slot is rendered again.
    pub generation: u64,
    pub spec: ChartSpec,
}

/// Owns the chart currently shown in each slot.
///
/// Rendering into an occupied slot discards the previous handle first, so a
/// slot never holds more than one chart.
#[derive(Debug, Default)]
pub struct ChartContext {
    handles: BTreeMap<ChartSlot, ChartHandle>,
}

impl ChartContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, slot: ChartSlot, spec: ChartSpec) -> &ChartHandle {
        let mut generation = 1;
        if let Some(previous) = self.handles.remove(&slot) {
            debug!(
                slot = slot.id(),
                generation = previous.generation,
                "discarding previous chart"
            );
            generation = previous.generation + 1;
        }
        let handle = ChartHandle {
            slot,
            generation,
            spec,
        };
        self.handles.entry(slot).or_insert(handle)
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&ChartHandle> {
        self.handles.get(&slot)
    }

    pub fn handles(&self) -> impl Iterator<Item = &ChartHandle> {
        self.handles.values()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Every chart as Chart.js configuration, keyed by slot id.
    pub fn to_document(&self) -> Value {
        let charts: serde_json::Map<String, Value> = self
            .handles()
            .map(|h| (h.slot.id().to_string(), h.spec.to_chartjs()))
            .collect();
        json!({
            "generated_at": Utc::now().to_rfc3339(),
            "charts": charts,
        })
    }
}

/// Draw the four dashboard charts from the derived metrics.
pub fn render_dashboard_charts(context: &mut ChartContext, metrics: &DerivedMetrics) {
    context.render(ChartSlot::Production, production_chart(&metrics.latest));
    context.render(ChartSlot::Share, share_chart(&metrics.latest));
    context.render(ChartSlot::Trend, trend_chart(&metrics.history));
    context.render(ChartSlot::Consumption, consumption_chart(&metrics.history));
}
