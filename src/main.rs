//! chartsense - CSV Chart Configuration & AI Chart Interpretation
//!
//! Command line front end: render charts, inspect data and ask the AI
//! service about chart images or data snippets.

use anyhow::{bail, Context, Result};
use chartsense::analysis::{
    load_image, AnalysisRequest, AnalysisService, GeminiAnalysisService, IMAGE_FAILURE_MESSAGE,
    TEXT_FAILURE_MESSAGE,
};
use chartsense::charts::{ChartKind, ChartRenderer, SvgChartRenderer};
use chartsense::config::AppConfig;
use chartsense::data::{Delimiter, Record};
use chartsense::stats::{ColumnSummary, StatsCalculator};
use chartsense::view::{ChartWorkspace, DerivedView};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "CSV chart configuration and AI chart interpretation", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./chartsense.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart to SVG
    Render(RenderArgs),
    /// Show column types, the chosen chart configuration and a preview
    Inspect(InspectArgs),
    /// Ask the AI service to interpret a chart image
    AnalyzeImage(AnalyzeImageArgs),
    /// Ask the AI service to comment on delimited data
    AnalyzeData(AnalyzeDataArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Delimited file; the built-in sample is used when omitted
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Field delimiter: comma, semicolon, tab, pipe (or the character itself)
    #[arg(short, long, default_value = "comma")]
    delimiter: Delimiter,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Chart kind, e.g. bar, line, radial-bar
    #[arg(short, long)]
    kind: Option<ChartKind>,

    /// Column for the x axis (category)
    #[arg(short = 'x', long = "x")]
    x_axis: Option<String>,

    /// Column for the y axis (value)
    #[arg(short = 'y', long = "y")]
    y_axis: Option<String>,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Output SVG file
    #[arg(short, long, default_value = "chart.svg", value_hint = ValueHint::FilePath)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Number of preview rows
    #[arg(long, default_value_t = 5)]
    rows: usize,

    /// Print the derived view as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Args, Debug)]
struct AnalyzeImageArgs {
    /// Chart image (PNG, JPEG, GIF, WebP or BMP)
    #[arg(value_hint = ValueHint::FilePath)]
    image: PathBuf,

    /// Print the analysis as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Args, Debug)]
struct AnalyzeDataArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Number of raw lines sent to the service
    #[arg(long, default_value_t = 50)]
    lines: usize,
}

#[derive(Serialize)]
struct InspectReport<'a> {
    source: &'a str,
    #[serde(flatten)]
    view: &'a DerivedView,
    summaries: Vec<ColumnSummary>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = log_filter(cli.verbose, None);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Render(args) => handle_render(args, &config),
        Command::Inspect(args) => handle_inspect(args),
        Command::AnalyzeImage(args) => handle_analyze_image(args, &config).await,
        Command::AnalyzeData(args) => handle_analyze_data(args, &config).await,
    }
}

/// Load `.env` (or `env_file`) first so `RUST_LOG` can come from it.
fn log_filter(verbose: bool, env_file: Option<&Path>) -> EnvFilter {
    // A missing .env file is fine.
    let _ = match env_file {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };

    let default_level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn open_workspace(input: &InputArgs) -> Result<ChartWorkspace> {
    let mut workspace = ChartWorkspace::new();
    workspace.set_delimiter(input.delimiter);
    if let Some(path) = &input.input {
        workspace
            .load_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
    }
    Ok(workspace)
}

fn handle_render(args: RenderArgs, config: &AppConfig) -> Result<()> {
    let mut workspace = open_workspace(&args.input)?;

    if let Some(kind) = args.kind {
        workspace.set_chart_kind(kind);
    }
    if let Some(x_axis) = &args.x_axis {
        workspace.set_x_axis(x_axis)?;
    }
    if let Some(y_axis) = &args.y_axis {
        workspace.set_y_axis(y_axis)?;
    }

    let mut renderer = SvgChartRenderer::new(
        args.width.unwrap_or(config.render.width),
        args.height.unwrap_or(config.render.height),
    );
    if let Some(title) = args.title {
        renderer = renderer.with_title(title);
    }

    let svg = renderer
        .render(workspace.dataset(), workspace.config())
        .context("Failed to render chart")?;
    fs::write(&args.out, svg).with_context(|| format!("Failed to write {}", args.out.display()))?;

    let chart = workspace.config();
    info!(
        kind = %chart.chart_kind,
        x_axis = %chart.x_axis,
        y_axis = %chart.y_axis,
        "chart rendered"
    );
    println!("{}", args.out.display());
    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<()> {
    let workspace = open_workspace(&args.input)?;
    let summaries = StatsCalculator::summarize(workspace.dataset(), workspace.classification());

    if args.json {
        let report = InspectReport {
            source: workspace.source_name(),
            view: workspace.view(),
            summaries,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let columns = workspace.classification();
    let chart = workspace.config();
    println!("Source:       {}", workspace.source_name());
    println!("Delimiter:    {}", chart.delimiter.label());
    println!("Records:      {}", workspace.dataset().len());
    println!("Numeric:      {}", columns.numerics.join(", "));
    println!("Categorical:  {}", columns.categoricals.join(", "));
    println!(
        "Chart:        {} ({} by {})",
        chart.chart_kind.display_name(),
        chart.y_axis,
        chart.x_axis
    );

    if !columns.keys.is_empty() {
        println!();
        print_preview(&columns.keys, workspace.dataset().preview(args.rows));
    }

    if !summaries.is_empty() {
        println!();
        for summary in &summaries {
            println!("{}", summary.describe());
        }
    }
    Ok(())
}

fn print_preview(keys: &[String], records: &[Record]) {
    println!("{}", keys.join(" | "));
    for record in records {
        let cells: Vec<String> = keys
            .iter()
            .map(|key| record.get(key).map(ToString::to_string).unwrap_or_default())
            .collect();
        println!("{}", cells.join(" | "));
    }
}

fn analysis_service(config: &AppConfig) -> Result<GeminiAnalysisService> {
    GeminiAnalysisService::new(config.analysis.clone()).context("Failed to create analysis client")
}

async fn handle_analyze_image(args: AnalyzeImageArgs, config: &AppConfig) -> Result<()> {
    let service = analysis_service(config)?;
    let (bytes, mime_type) = read_image(&args.image)?;
    info!(path = %args.image.display(), mime_type, "analyzing chart image");

    let mut request = AnalysisRequest::new(IMAGE_FAILURE_MESSAGE);
    request
        .run(|| service.analyze_image(&bytes, mime_type))
        .await;

    if let Some(message) = request.error() {
        bail!("{message}");
    }
    let Some(analysis) = request.result() else {
        bail!("{IMAGE_FAILURE_MESSAGE}");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
        return Ok(());
    }

    println!("Chart type: {}", analysis.chart_type);
    println!("Title:      {}", analysis.title);
    println!();
    println!("{}", analysis.summary);
    if !analysis.insights.is_empty() {
        println!();
        for insight in &analysis.insights {
            println!("- {insight}");
        }
    }
    Ok(())
}

fn read_image(path: &Path) -> Result<(Vec<u8>, &'static str)> {
    load_image(path).with_context(|| format!("Failed to load image {}", path.display()))
}

async fn handle_analyze_data(args: AnalyzeDataArgs, config: &AppConfig) -> Result<()> {
    let service = analysis_service(config)?;
    let workspace = open_workspace(&args.input)?;

    let mut snippet = workspace.snippet(args.lines);
    let summaries = StatsCalculator::summarize(workspace.dataset(), workspace.classification());
    if !summaries.is_empty() {
        snippet.push_str("\n\nColumn statistics:\n");
        let lines: Vec<String> = summaries.iter().map(ColumnSummary::describe).collect();
        snippet.push_str(&lines.join("\n"));
    }
    info!(source = %workspace.source_name(), "analyzing data snippet");

    let mut request = AnalysisRequest::new(TEXT_FAILURE_MESSAGE);
    request.run(|| service.analyze_text(&snippet)).await;

    if let Some(message) = request.error() {
        bail!("{message}");
    }
    let Some(narrative) = request.result() else {
        bail!("{TEXT_FAILURE_MESSAGE}");
    };
    println!("{narrative}");
    Ok(())
}
