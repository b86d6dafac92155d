//! CLI entry point for the quake_map tool.
//!
//! Fetches the USGS earthquake feed, groups events by UTC day and writes
//! styled marker GeoJSON for a map front end.

use anyhow::Result;
use clap::{Parser, Subcommand};
use quake_map::analyzers::DaySelection;
use quake_map::analyzers::summary::summarize;
use quake_map::fetch::{BasicClient, DEFAULT_FEED_URL};
use quake_map::output::{append_summaries, print_json, write_json_file};
use quake_map::render::RenderReport;
use quake_map::style::{depth_scale, legend};
use quake_map::view::MapView;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "quake_map")]
#[command(about = "Earthquake feed day-grouping and marker styling", long_about = None)]
struct Cli {
    /// Feed URL or path to a local GeoJSON file
    #[arg(short, long, global = true, env = "QUAKE_FEED_URL", default_value = DEFAULT_FEED_URL)]
    source: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the day picker options and per-day summaries
    Days {
        /// CSV file to append per-day summaries to
        #[arg(long)]
        csv: Option<String>,
    },
    /// Write styled marker GeoJSON for one day or all days
    Render {
        /// "all" or a UTC day as YYYY-MM-DD
        #[arg(short, long, default_value = "all")]
        day: DaySelection,

        /// GeoJSON file to write
        #[arg(short, long, default_value = "markers.geojson")]
        output: String,
    },
    /// Print the depth legend
    Legend {
        /// Optional JSON file to write the legend to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Re-fetch on an interval, rewriting the output only after a good fetch
    Watch {
        /// "all" or a UTC day as YYYY-MM-DD
        #[arg(short, long, default_value = "all")]
        day: DaySelection,

        /// GeoJSON file to write
        #[arg(short, long, default_value = "markers.geojson")]
        output: String,

        /// Seconds between fetches
        #[arg(short, long, default_value_t = 300)]
        interval: u64,

        /// Number of fetches (0 = infinite)
        #[arg(short = 'n', long, default_value_t = 0)]
        rounds: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/quake_map.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("quake_map.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let client = BasicClient::new()?;
    let mut view = MapView::new(depth_scale());

    match cli.command {
        Commands::Days { csv } => {
            load(&mut view, &client, &cli.source).await?;

            for option in view.selection_options() {
                info!(value = %option.value, label = %option.label, "Day option");
            }

            let summaries = summarize(&view.buckets());
            print_json(&summaries)?;

            if let Some(path) = csv {
                append_summaries(&path, &summaries)?;
                info!(path = %path, rows = summaries.len(), "Summaries appended");
            }
        }
        Commands::Render { day, output } => {
            view.select(day);
            let report = load(&mut view, &client, &cli.source).await?;
            if report.rendered == 0 {
                warn!(day = %day, "No earthquakes for selection");
            }
            write_json_file(&output, &view.to_geojson())?;
            info!(output = %output, rendered = report.rendered, "Markers written");
        }
        Commands::Legend { output } => {
            let depth_legend = legend(view.scale());
            print_json(&depth_legend)?;
            if let Some(path) = output {
                write_json_file(&path, &depth_legend)?;
            }
        }
        Commands::Watch {
            day,
            output,
            interval,
            rounds,
        } => {
            view.select(day);
            watch(&mut view, &client, &cli.source, &output, interval, rounds).await?;
        }
    }

    Ok(())
}

/// Filter from `var`, or `default` when the variable is unset or invalid.
fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Loads the feed from a URL or a local file into `view`.
///
/// Failures are logged once here and returned; `view` keeps its previous state.
#[tracing::instrument(skip(view, client, source), fields(source = %source))]
async fn load(view: &mut MapView, client: &BasicClient, source: &str) -> Result<RenderReport> {
    if is_url(source) {
        return view.refresh(client, source).await;
    }

    let result = std::fs::read(source)
        .map_err(anyhow::Error::from)
        .and_then(|bytes| view.load(&bytes));
    match &result {
        Ok(report) => info!(rendered = report.rendered, "Feed file loaded"),
        Err(e) => error!(error = %e, "Error reading earthquake data"),
    }
    result
}

/// Periodically reloads the feed and rewrites `output` after each good load.
#[tracing::instrument(skip(view, client, source))]
async fn watch(
    view: &mut MapView,
    client: &BasicClient,
    source: &str,
    output: &str,
    interval: u64,
    rounds: usize,
) -> Result<()> {
    if rounds == 0 {
        info!(interval, "Watching indefinitely. Press Ctrl+C to stop.");
    }

    let mut round = 0;
    loop {
        if rounds > 0 && round >= rounds {
            break;
        }
        round += 1;

        // A failed load was already logged; the last good file stays on disk.
        if load(view, client, source).await.is_ok() {
            write_json_file(output, &view.to_geojson())?;
            info!(round, markers = view.markers().len(), "Output updated");
        }

        if rounds == 0 || round < rounds {
            tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
        }
    }

    info!(output, "Finished watching");
    Ok(())
}
