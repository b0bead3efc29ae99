use anyhow::{Context, Result};
use clap::Parser;
use renewdash::{
    dashboard::render_summary,
    fetch::{self, CsvSource},
    table, Dashboard, DashboardConfig,
};
use std::{fs, path::PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Renewable-energy dashboard over a CSV of generation statistics.
#[derive(Parser, Debug)]
#[command(name = "renewdash", version)]
struct Args {
    /// CSV file path or http(s) URL; overrides the config file
    #[arg(long, env = "RENEWDASH_SOURCE")]
    source: Option<String>,

    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only show table rows of this year
    #[arg(long, default_value = "")]
    year: String,

    /// Yearly household consumption in kWh for the calculator
    #[arg(long)]
    consumption: Option<f64>,

    /// Write the chart configurations as JSON to this file
    #[arg(long)]
    charts_out: Option<PathBuf>,

    /// Maximum table rows printed (0 = all)
    #[arg(long, default_value_t = 50)]
    limit: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(source) = &args.source {
        config.source = source.clone();
    }
    info!(source = %config.source, entity = %config.aggregate_entity, "startup");

    // ─── 3) load the CSV once ────────────────────────────────────────
    let source = CsvSource::parse(&config.source)?;
    let client = fetch::build_client(config.request_timeout())?;
    let text = match fetch::fetch_csv_text(&client, &source).await {
        Ok(text) => text,
        Err(err) => {
            error!("loading {} failed: {:?}", source, err);
            eprintln!("Error loading the historical data. Check the log output for details.");
            std::process::exit(1);
        }
    };

    // ─── 4) build the session state ──────────────────────────────────
    let dashboard = Dashboard::from_csv(&text, &config);

    // ─── 5) table ────────────────────────────────────────────────────
    let rows = dashboard.filter_table(&args.year);
    let shown = if args.limit == 0 {
        rows.len()
    } else {
        rows.len().min(args.limit)
    };
    println!("{}", table::render_table(&rows[..shown]));
    if shown < rows.len() {
        println!("… {} more rows (use --limit 0 to show all)", rows.len() - shown);
    }

    // ─── 6) dashboard + calculator ───────────────────────────────────
    let Some(view) = dashboard.view() else {
        return Ok(());
    };
    println!("{}", render_summary(&view.metrics));

    if let Some(consumption) = args.consumption {
        println!("{}", view.calculator.calculate(consumption));
    }

    if let Some(path) = &args.charts_out {
        let doc = serde_json::to_string_pretty(&view.charts.to_document())
            .context("serializing chart document")?;
        fs::write(path, doc)
            .with_context(|| format!("writing chart document {}", path.display()))?;
        info!(path = %path.display(), charts = view.charts.len(), "wrote charts");
    }

    Ok(())
}
