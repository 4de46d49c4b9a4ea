//! Command-line trip planner over a JSON stop catalog.
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use eyre::WrapErr;
use geo::Coord;
use serde::Deserialize;

use daytrip_core::{
    Engine, MemoryCatalog, RoutingConfig, Stop, StopCatalog, TravelMode, TripSession,
};
use daytrip_routing::OsrmTableProvider;

/// Plan a multi-stop day trip from a stop catalog.
#[derive(Debug, Parser)]
#[command(name = "daytrip", version, about)]
struct Arguments {
    /// Path to the stop catalog: a JSON array of {id, name, lat, lon}.
    #[arg(long)]
    catalog: PathBuf,

    /// Stop id to visit; repeat in the desired order.
    #[arg(long = "stop", value_name = "ID", required = true)]
    stops: Vec<String>,

    /// Reorder the stops with nearest-neighbour + 2-opt before computing
    /// totals.
    #[arg(long)]
    optimize: bool,

    /// Travel mode: drive, cycle or walk.
    #[arg(long, default_value = "drive")]
    mode: TravelMode,

    /// Leg-metrics engine: remote (OSRM, with offline fallback) or local.
    #[arg(long, default_value = "local")]
    engine: Engine,

    /// Target travel hours per day.
    #[arg(long = "daily-hours", default_value_t = daytrip_core::DEFAULT_DAILY_BUDGET_HOURS)]
    daily_hours: f64,

    /// Base URL of the OSRM service used when --engine remote.
    #[arg(long = "osrm-url", default_value = "https://router.project-osrm.org")]
    osrm_url: String,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let arguments = Arguments::parse();
    if let Err(error) = run(arguments).await {
        eprintln!("daytrip: {error:#}");
        process::exit(1);
    }
}

async fn run(arguments: Arguments) -> eyre::Result<()> {
    let catalog = load_catalog(&arguments.catalog)?;
    for id in &arguments.stops {
        if catalog.get(id).is_none() {
            return Err(eyre::eyre!("stop '{id}' is not in the catalog"));
        }
    }

    let config = RoutingConfig::new(arguments.mode, arguments.engine, arguments.daily_hours)?;
    let provider = OsrmTableProvider::new(&arguments.osrm_url)
        .wrap_err("failed to set up the OSRM provider")?;
    let session = TripSession::with_remote(catalog, provider, config);

    for id in &arguments.stops {
        session.toggle(id);
    }
    if arguments.optimize {
        session.optimize();
    }
    session.recompute().await;

    print_plan(&session.order(), &session.totals());
    Ok(())
}

fn print_plan(order: &[String], totals: &daytrip_core::Totals) {
    println!("Route: {}", order.join(" -> "));
    println!(
        "Total: {:.1} km, {:.1} h",
        totals.total_km, totals.total_hours
    );
    for (index, day) in totals.days.iter().enumerate() {
        println!(
            "Day {}: {} stops - {:.1} h",
            index + 1,
            day.stops.len(),
            day.hours
        );
    }
}

/// One record of the catalog file.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    name: String,
    lat: f64,
    lon: f64,
}

impl From<CatalogEntry> for Stop {
    fn from(entry: CatalogEntry) -> Self {
        Self::new(
            entry.id,
            entry.name,
            Coord {
                x: entry.lon,
                y: entry.lat,
            },
        )
    }
}

fn load_catalog(path: &Path) -> eyre::Result<MemoryCatalog> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read catalog {}", path.display()))?;
    let entries: Vec<CatalogEntry> =
        serde_json::from_str(&raw).wrap_err("catalog is not a JSON array of stops")?;
    Ok(MemoryCatalog::from_stops(
        entries.into_iter().map(Stop::from),
    ))
}
