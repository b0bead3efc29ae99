use prettytable::{format, Cell as TableCell, Row, Table};
use std::fmt::Write as _;
use tracing::{info, instrument};

use crate::calculator::Calculator;
use crate::chart::{render_dashboard_charts, ChartContext};
use crate::config::DashboardConfig;
use crate::format::{format_es, format_percent};
use crate::global::global_series;
use crate::metrics::{derive_metrics, DerivedMetrics};
use crate::process::{normalize_records, parse_csv, NormalizedRow};
use crate::schema::{EnergySource, SchemaReport};
use crate::table::filter_by_year;

/// The parts that need at least one aggregate-entity row.
#[derive(Debug)]
pub struct GlobalView {
    pub metrics: DerivedMetrics,
    pub calculator: Calculator,
    pub charts: ChartContext,
}

/// Session state built once from the CSV text and read-only afterwards.
#[derive(Debug)]
pub struct Dashboard {
    rows: Vec<NormalizedRow>,
    global: Vec<NormalizedRow>,
    schema_report: SchemaReport,
    view: Option<GlobalView>,
}

impl Dashboard {
    #[instrument(level = "info", skip_all, fields(bytes = text.len()))]
    pub fn from_csv(text: &str, config: &DashboardConfig) -> Self {
        let raw = parse_csv(text);
        let schema_report = SchemaReport::from_headers(&raw.headers);
        schema_report.log();

        let rows = normalize_records(&raw.records);
        let global = global_series(&rows, &config.aggregate_entity);

        let view = derive_metrics(&global, &config.estimates).map(|metrics| {
            let mut charts = ChartContext::new();
            render_dashboard_charts(&mut charts, &metrics);
            GlobalView {
                calculator: Calculator::from_metrics(&metrics),
                metrics,
                charts,
            }
        });
        if view.is_none() {
            info!(
                entity = %config.aggregate_entity,
                "no aggregate rows; skipping charts and calculator"
            );
        }

        info!(rows = rows.len(), global = global.len(), "dashboard ready");
        Self {
            rows,
            global,
            schema_report,
            view,
        }
    }

    /// Every normalized row, all entities.
    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    pub fn global_series(&self) -> &[NormalizedRow] {
        &self.global
    }

    pub fn schema_report(&self) -> &SchemaReport {
        &self.schema_report
    }

    pub fn view(&self) -> Option<&GlobalView> {
        self.view.as_ref()
    }

    pub fn metrics(&self) -> Option<&DerivedMetrics> {
        self.view.as_ref().map(|v| &v.metrics)
    }

    pub fn calculator(&self) -> Option<&Calculator> {
        self.view.as_ref().map(|v| &v.calculator)
    }

    pub fn charts(&self) -> Option<&ChartContext> {
        self.view.as_ref().map(|v| &v.charts)
    }

    pub fn filter_table(&self, year: &str) -> Vec<&NormalizedRow> {
        filter_by_year(year, &self.rows)
    }
}

/// Text summary of the latest-year metrics.
pub fn render_summary(metrics: &DerivedMetrics) -> String {
    let latest = &metrics.latest;
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        TableCell::new("Source").style_spec("bFg"),
        TableCell::new("Production (TWh)").style_spec("bFg"),
        TableCell::new("Share").style_spec("bFg"),
    ]));
    for source in EnergySource::ALL {
        table.add_row(Row::new(vec![
            TableCell::new(source.label()),
            TableCell::new(&format_es(latest.production_twh.get(source), 2)).style_spec("r"),
            TableCell::new(&format_percent(latest.share_pct.get(source))).style_spec("r"),
        ]));
    }

    let mut out = String::new();
    let year = latest.year.as_deref().unwrap_or("N/A");
    let _ = writeln!(out, "Renewable production by source, {}", year);
    out.push_str(&table.to_string());
    let _ = writeln!(
        out,
        "Total renewable production: {} TWh",
        format_es(latest.renewable_total_twh, 2)
    );
    let _ = writeln!(
        out,
        "Global production (estimate, x{}): {} TWh",
        metrics.estimates.total_production_multiplier,
        format_es(latest.global_production_estimate_twh, 2)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartSlot;
    use crate::process::Cell;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    const CSV: &str = "\"Entity\",\"Code\",\"Year\",\"Geo Biomass Other - TWh\",\"Solar Generation - TWh\",\"Wind Generation - TWh\",\"Hydro Generation - TWh\",\"modern-renewable-energy-consumption\"
World,OWID_WRL,2021,10,20,30,40,500
USA,USA,2020,1,2,3,4,50
World,OWID_WRL,2020,8,15,25,38,450
Africa,,2021,,,,,

";

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,renewdash=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn builds_full_dashboard() {
        init_test_logging();
        let dashboard = Dashboard::from_csv(CSV, &DashboardConfig::default());

        assert_eq!(dashboard.rows().len(), 4);
        assert!(dashboard.schema_report().is_complete());

        let global = dashboard.global_series();
        assert_eq!(global.len(), 2);
        assert_eq!(global[0].get("Year"), Some(&Cell::Text("2020".into())));
        assert_eq!(global[1].get("Year"), Some(&Cell::Text("2021".into())));

        let metrics = dashboard.metrics().unwrap();
        assert_eq!(metrics.latest.year.as_deref(), Some("2021"));
        assert_eq!(metrics.latest.renewable_total_twh, 100.0);
        assert_eq!(metrics.history.consumption_twh, vec![450.0, 500.0]);

        let calc = dashboard.calculator().unwrap();
        assert_eq!(calc.capacity_twh(), 100.0);

        let charts = dashboard.charts().unwrap();
        assert_eq!(charts.len(), 4);
        assert!(charts.get(ChartSlot::Consumption).is_some());
    }

    #[test]
    fn table_uses_every_entity() {
        let dashboard = Dashboard::from_csv(CSV, &DashboardConfig::default());

        assert_eq!(dashboard.filter_table("2021").len(), 2);
        assert_eq!(dashboard.filter_table("2020").len(), 2);
        assert_eq!(dashboard.filter_table("").len(), 4);

        let filtered = dashboard.filter_table("2021");
        let africa = filtered[1];
        assert_eq!(africa.get("Code"), Some(&Cell::Missing));
        assert_eq!(africa.get("Solar Generation - TWh"), Some(&Cell::Missing));
    }

    #[test]
    fn bom_prefixed_file_still_builds_view() -> anyhow::Result<()> {
        use crate::fetch::{build_client, fetch_csv_text, CsvSource};
        use std::io::Write;

        let mut tmp = tempfile::NamedTempFile::new()?;
        tmp.write_all(b"\xef\xbb\xbfEntity,Code,Year,Solar Generation - TWh\nWorld,OWID_WRL,2021,5\n")?;

        let text = tokio::runtime::Runtime::new()?.block_on(async {
            let client = build_client(std::time::Duration::from_secs(5))?;
            let source = CsvSource::File(tmp.path().to_path_buf());
            Ok::<_, anyhow::Error>(fetch_csv_text(&client, &source).await?)
        })?;
        let dashboard = Dashboard::from_csv(&text, &DashboardConfig::default());

        assert_eq!(dashboard.global_series().len(), 1);
        assert!(dashboard.view().is_some());
        assert_eq!(dashboard.calculator().unwrap().capacity_twh(), 5.0);
        Ok(())
    }

    #[test]
    fn missing_aggregate_skips_view() {
        let config = DashboardConfig {
            aggregate_entity: "Antarctica".into(),
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::from_csv(CSV, &config);

        assert!(dashboard.global_series().is_empty());
        assert!(dashboard.view().is_none());
        assert!(dashboard.calculator().is_none());
        assert_eq!(dashboard.rows().len(), 4);
    }

    #[test]
    fn unreadable_text_yields_empty_dashboard() {
        let dashboard = Dashboard::from_csv("", &DashboardConfig::default());
        assert!(dashboard.rows().is_empty());
        assert!(dashboard.view().is_none());
        assert!(!dashboard.schema_report().is_complete());
    }

    #[test]
    fn summary_flags_estimate() {
        let dashboard = Dashboard::from_csv(CSV, &DashboardConfig::default());
        let text = render_summary(dashboard.metrics().unwrap());

        assert!(text.contains("2021"));
        assert!(text.contains("Hydro"));
        assert!(text.contains("40.00%"));
        assert!(text.contains("estimate"));
        assert!(text.contains("500 TWh"));
    }
}
