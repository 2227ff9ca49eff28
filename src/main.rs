use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use salesboard::catalog::Catalog;
use salesboard::config::DashboardConfig;
use salesboard::graph::{self, BarChart, LineChart};
use salesboard::session::{DashboardView, Session, DEFAULT_LIMIT, DEFAULT_MIN_SALES};
use salesboard::{OutputFormat, RenderOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "salesboard")]
#[command(about = "Filter synthetic retail sales data and chart the result", long_about = None)]
struct Args {
    /// JSON config file (year range, sales range, seed, chart options)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the sample data; overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Year to show (defaults to the first year in the data)
    #[arg(long)]
    year: Option<i32>,

    /// Only keep rows with at least this many sales
    #[arg(long, default_value_t = DEFAULT_MIN_SALES)]
    min_sales: u32,

    /// Number of products to display
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Product type to include; repeat for several (defaults to all)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// How to print the filtered table
    #[arg(long, value_enum, default_value_t = TableFormat::Text)]
    output: TableFormat,

    /// Write the per-product bar chart to this file
    #[arg(long)]
    bar_chart: Option<PathBuf>,

    /// Write the per-year trend chart to this file
    #[arg(long)]
    line_chart: Option<PathBuf>,

    /// Chart image format; overrides the config file
    #[arg(long, value_enum)]
    format: Option<ChartFormat>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TableFormat {
    Text,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChartFormat {
    Png,
    Svg,
}

impl From<ChartFormat> for OutputFormat {
    fn from(format: ChartFormat) -> Self {
        match format {
            ChartFormat::Png => OutputFormat::Png,
            ChartFormat::Svg => OutputFormat::Svg,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(format) = args.format {
        config.render.format = format.into();
    }

    let session = Session::start(
        Catalog::retail(),
        config.years(),
        config.sales_range(),
        config.seed,
    );

    let selected = (!args.categories.is_empty()).then_some(args.categories.as_slice());
    let filter = session
        .controls()
        .validate(args.year, args.min_sales, selected, args.limit)
        .context("Invalid filter settings")?;

    let view = session.view(&filter);

    let report = match args.output {
        TableFormat::Text => text_report(&view, filter.year, filter.min_sales),
        TableFormat::Csv => view.rows.to_csv()?,
        TableFormat::Json => json_report(&view, &session, filter.year, filter.min_sales)?,
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(report.as_bytes())
        .context("Failed to write report to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    if let Some(path) = &args.bar_chart {
        let bytes = graph::render(&BarChart::new(&view.bar, &config.render), &config.render)
            .context("Failed to render bar chart")?;
        write_chart(path, &bytes, &config.render)?;
    }
    if let Some(path) = &args.line_chart {
        let bytes = graph::render(&LineChart::new(&view.line, &config.render), &config.render)
            .context("Failed to render line chart")?;
        write_chart(path, &bytes, &config.render)?;
    }

    Ok(())
}

fn write_chart(path: &Path, bytes: &[u8], options: &RenderOptions) -> Result<()> {
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    tracing::info!(path = %path.display(), format = ?options.format, bytes = bytes.len(), "wrote chart");
    Ok(())
}

fn text_report(view: &DashboardView, year: i32, min_sales: u32) -> String {
    let mut out = format!(
        "Filtered Results for Year {} with Minimum Sales {}:\n\n",
        year, min_sales
    );
    out.push_str(&view.rows.to_text());

    out.push_str("\nSales by Product\n");
    for total in &view.bar {
        out.push_str(&format!("  {:<18} {:>8}\n", total.product, total.sales));
    }

    out.push_str("\nSales Trend Over Years\n");
    for total in &view.line {
        out.push_str(&format!("  {:<18} {:>8}\n", total.year, total.sales));
    }
    out
}

fn json_report(view: &DashboardView, session: &Session, year: i32, min_sales: u32) -> Result<String> {
    let report = serde_json::json!({
        "seed": session.seed(),
        "year": year,
        "min_sales": min_sales,
        "rows": view.rows,
        "bar": view.bar,
        "line": view.line,
    });
    let mut text = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    text.push('\n');
    Ok(text)
}
