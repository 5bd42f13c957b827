//! CLI entry point for the CITROUS bus adapter.
//!
//! Runs the agency hooks on values given on the command line: route short
//! names, stop names and codes, trip headsigns. Feed loading and output
//! generation belong to the GTFS framework.

use anyhow::Result;
use chrono::Utc;
use citrous_bus::model::{Route, Stop, Trip};
use citrous_bus::output::{append_records, print_json, print_pretty};
use citrous_bus::routes::resolve_route_table;
use citrous_bus::{AdapterConfig, AgencyTools, CitrousAgency};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "citrous-bus")]
#[command(about = "CITROUS bus rules for the GTFS normalization framework", long_about = None)]
struct Cli {
    /// Adapter config (JSON); defaults apply when absent
    #[arg(short, long, env = "CITROUS_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve route short names to route IDs and names
    RouteId {
        /// GTFS route_short_name values
        #[arg(value_name = "SHORT_NAME", required = true)]
        short_names: Vec<String>,

        /// Long name used for every route
        #[arg(short, long, default_value = "")]
        long_name: String,

        /// CSV file to append the route table to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Clean stop names
    StopName {
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },
    /// Stop ID for a stop code
    StopId {
        #[arg(value_name = "CODE")]
        code: String,
    },
    /// Assign the headsign of a trip
    Headsign {
        /// Resolved route ID
        #[arg(short, long)]
        route_id: u64,

        /// GTFS direction_id
        #[arg(short, long, default_value_t = 0)]
        direction: u8,

        /// Raw trip_headsign
        #[arg(value_name = "TEXT")]
        text: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/citrous_bus.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("citrous_bus.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AdapterConfig::load(path)?,
        None => AdapterConfig::default(),
    };
    let agency = CitrousAgency::new(config);

    let start = Utc::now();
    info!("Generating CITROUS bus data...");

    let result = run(&agency, cli.command);
    match &result {
        Ok(()) => {
            let elapsed = Utc::now() - start;
            info!(
                elapsed_ms = elapsed.num_milliseconds(),
                "Generating CITROUS bus data... DONE"
            );
        }
        Err(e) => error!(error = %e, "Generating CITROUS bus data... FAILED"),
    }
    result
}

fn run(agency: &CitrousAgency, command: Commands) -> Result<()> {
    if agency.excluding_all() {
        info!("No useful service, every calendar and trip is excluded");
    }

    match command {
        Commands::RouteId {
            short_names,
            long_name,
            output,
        } => route_ids(agency, &short_names, &long_name, output.as_deref())?,
        Commands::StopName { names } => {
            for name in &names {
                info!(raw = %name, cleaned = %agency.clean_stop_name(name), "Stop name");
            }
        }
        Commands::StopId { code } => {
            let stop = Stop {
                stop_id: code.clone(),
                stop_code: Some(code),
                stop_name: String::new(),
            };
            let stop_id = agency.stop_id(&stop)?;
            info!(stop_id, "Stop ID");
        }
        Commands::Headsign {
            route_id,
            direction,
            text,
        } => {
            let trip = Trip {
                trip_headsign: Some(text),
                direction_id: Some(direction),
                ..Default::default()
            };
            let headsign = agency.trip_headsign(route_id, &trip);
            match headsign.legs() {
                Some((from, to)) => info!(
                    route_id,
                    direction = headsign.direction,
                    label = %headsign.label,
                    from,
                    to,
                    "Trip headsign"
                ),
                None => info!(
                    route_id,
                    direction = headsign.direction,
                    label = %headsign.label,
                    "Trip headsign"
                ),
            }
        }
    }

    Ok(())
}

/// Resolves a set of short names as one feed would, failing on the first
/// unknown shape or ID collision.
#[tracing::instrument(skip(agency, long_name), fields(routes = short_names.len()))]
fn route_ids(
    agency: &CitrousAgency,
    short_names: &[String],
    long_name: &str,
    output: Option<&str>,
) -> Result<()> {
    let routes: Vec<Route> = short_names
        .iter()
        .map(|short_name| Route::new(short_name, short_name, long_name))
        .collect();

    let table = resolve_route_table(agency, &routes)?;
    print_pretty(&table);
    print_json(&table)?;

    if let Some(path) = output {
        append_records(path, &table)?;
        info!(path, rows = table.len(), "Route table written");
    }
    Ok(())
}
