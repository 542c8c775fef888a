//! CLI entry point for the bike traffic map tool.
//!
//! Provides subcommands for a one-shot traffic snapshot, an SVG render of
//! the station map, and a whole-day sweep of the time filter.

use anyhow::Result;
use bike_flow_map::{
    fetch::{BasicClient, fetch_bytes},
    filter::{TimeFilter, filter_trips},
    model::{Station, Trip},
    output::{append_records, print_json, station_records},
    overlay::builtin_overlays,
    parser::{parse_stations, parse_trips},
    projection::ViewTransform,
    render::{Event, RenderDriver},
    svg::render_svg,
    traffic::compute_station_stats,
};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_STATIONS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
const DEFAULT_TRIPS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";

#[derive(Parser)]
#[command(name = "bike_flow_map")]
#[command(about = "Aggregate and render bike-share station traffic", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Dataset sources shared by every subcommand. Each accepts a URL or a
/// local file path.
#[derive(Args)]
struct DatasetArgs {
    /// Station dataset (JSON) URL or path
    #[arg(long, default_value = DEFAULT_STATIONS_URL)]
    stations: String,

    /// Trip dataset (CSV) URL or path
    #[arg(long, default_value = DEFAULT_TRIPS_URL)]
    trips: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate station traffic at one point in time
    Snapshot {
        #[command(flatten)]
        datasets: DatasetArgs,

        /// Time of day to filter by: "any", HH:MM, or a minute offset
        #[arg(short, long, default_value = "any")]
        at: TimeFilter,

        /// CSV file to append per-station records to
        #[arg(short, long)]
        output: Option<String>,

        /// Print the full aggregate as JSON instead of a ranked summary
        #[arg(long, default_value_t = false)]
        json: bool,

        /// How many top stations to list in the summary
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Render the station map as an SVG file
    Render {
        #[command(flatten)]
        datasets: DatasetArgs,

        /// Time of day to filter by: "any", HH:MM, or a minute offset
        #[arg(short, long, default_value = "any")]
        at: TimeFilter,

        /// View center longitude
        #[arg(long, default_value_t = -71.09415)]
        center_lon: f64,

        /// View center latitude
        #[arg(long, default_value_t = 42.36027)]
        center_lat: f64,

        /// View zoom level
        #[arg(long, default_value_t = 12.0)]
        zoom: f64,

        /// Viewport width in pixels
        #[arg(long, default_value_t = 1000.0)]
        width: f64,

        /// Viewport height in pixels
        #[arg(long, default_value_t = 800.0)]
        height: f64,

        /// SVG file to write
        #[arg(short, long, default_value = "map.svg")]
        output: String,
    },
    /// Aggregate at a fixed minute stride across the whole day
    Sweep {
        #[command(flatten)]
        datasets: DatasetArgs,

        /// Minutes between sample points
        #[arg(long, default_value_t = 60)]
        stride: usize,

        /// CSV file to append per-station records to
        #[arg(short, long, default_value = "sweep.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bike_flow_map.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_flow_map.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot {
            datasets,
            at,
            output,
            json,
            top,
        } => {
            let (stations, trips) = load_datasets(&datasets).await?;

            let filtered = filter_trips(&trips, at);
            info!(
                time_filter = %at,
                trips_total = trips.len(),
                trips_matching = filtered.len(),
                "Trips filtered"
            );

            let mut stats = compute_station_stats(&stations, &filtered);

            if json {
                print_json(&stats)?;
            } else {
                stats.sort_by(|a, b| b.total.cmp(&a.total));
                for s in stats.iter().take(top) {
                    info!(
                        station = %s.short_name,
                        name = %s.name,
                        departures = s.departures,
                        arrivals = s.arrivals,
                        total = s.total,
                        "Station"
                    );
                }
            }

            if let Some(path) = output {
                append_records(&path, &station_records(at, &stats))?;
                info!(path, rows = stats.len(), "Snapshot written");
            }
        }
        Commands::Render {
            datasets,
            at,
            center_lon,
            center_lat,
            zoom,
            width,
            height,
            output,
        } => {
            let (stations, trips) = load_datasets(&datasets).await?;

            let view = ViewTransform {
                center_lon,
                center_lat,
                zoom,
                width,
                height,
            };

            let mut driver = RenderDriver::new(stations, trips, view);
            if at.is_active() {
                driver.handle(Event::SliderInput(at));
            }

            let svg = render_svg(driver.scene(), &view, &builtin_overlays());
            std::fs::write(&output, svg)?;
            info!(
                path = %output,
                circles = driver.scene().circles.len(),
                time_label = %driver.scene().time_label,
                "SVG written"
            );
        }
        Commands::Sweep {
            datasets,
            stride,
            output,
        } => {
            if stride == 0 || stride > 1440 {
                anyhow::bail!("stride must be in 1..=1440, got {stride}");
            }
            let (stations, trips) = load_datasets(&datasets).await?;

            let mut rows = 0;
            for minute in (0..1440).step_by(stride) {
                let at = TimeFilter::AtMinute(minute as u16);
                let filtered = filter_trips(&trips, at);
                let stats = compute_station_stats(&stations, &filtered);

                debug!(minute, trips_matching = filtered.len(), "Sweep sample");
                append_records(&output, &station_records(at, &stats))?;
                rows += stats.len();
            }

            info!(path = %output, rows, stride, "Sweep complete");
        }
    }

    Ok(())
}

/// Loads both datasets sequentially: stations first, then trips. Nothing
/// useful can happen until both are in memory.
async fn load_datasets(datasets: &DatasetArgs) -> Result<(Vec<Station>, Vec<Trip>)> {
    let station_bytes = fetcher(&datasets.stations).await?;
    let stations = parse_stations(&station_bytes)?;
    info!(count = stations.len(), "Stations loaded");

    let trip_bytes = fetcher(&datasets.trips).await?;
    let trips = parse_trips(&trip_bytes)?;
    info!(count = trips.len(), "Trips loaded");

    Ok((stations, trips))
}

/// Loads dataset bytes from a local file path or fetches them over HTTP.
#[tracing::instrument(fields(source = %url))]
async fn fetcher(url: &String) -> Result<Vec<u8>> {
    let bytes = if url.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, url).await?
    } else {
        std::fs::read(url)?
    };
    Ok(bytes)
}
