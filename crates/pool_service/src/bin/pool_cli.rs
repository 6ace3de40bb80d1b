use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use pool_core::routing::{
    build_directions_provider, CacheConfig, DirectionsProvider, DirectionsProviderKind,
};
use pool_service::{
    dry_run, export_to_json, load_seed_file, seed_trips, NewTripRequest, TripRegistry,
    TripService, DEFAULT_DRY_RUN_LIMIT, DEFAULT_LIST_LIMIT,
};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "pool_cli",
    about = "Store trips and find pooling matches between them",
    long_about = "Adds trips to a JSON trip store, resolving each route through a\n\
                  directions backend, and ranks the stored trips that could share a ride."
)]
struct Cli {
    /// OSRM base URL; straight-line routes are used when unset
    #[arg(long, env = "OSRM_ENDPOINT", global = true)]
    osrm_endpoint: Option<String>,
    /// Lifetime of cached routes in seconds
    #[arg(long, env = "CACHE_TTL_SECONDS", global = true)]
    cache_ttl_secs: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the store with trips resolved from a sample file
    Seed {
        /// JSON array of trips with snake_case fields
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        store: PathBuf,
    },
    /// Add one trip to the store
    Add {
        #[arg(long)]
        store: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        pickup_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        pickup_lng: f64,
        #[arg(long, allow_negative_numbers = true)]
        drop_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        drop_lng: f64,
        /// RFC 3339 timestamp, e.g. 2025-01-15T09:00:00Z
        #[arg(long)]
        departure_time: DateTime<Utc>,
    },
    /// Print stored trips, newest first
    List {
        #[arg(long)]
        store: PathBuf,
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: usize,
    },
    /// Print ranked matches for a stored trip
    Matches {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        trip_id: String,
    },
    /// Match the most recent trips against each other and write the results
    DryRun {
        #[arg(long)]
        store: PathBuf,
        #[arg(long, default_value = "data/output.json")]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_DRY_RUN_LIMIT)]
        limit: usize,
    },
}

// ── Helpers ────────────────────────────────────────────────────────

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn provider_kind(endpoint: Option<String>) -> DirectionsProviderKind {
    match endpoint {
        #[cfg(feature = "osrm")]
        Some(endpoint) => DirectionsProviderKind::Osrm { endpoint },
        #[cfg(not(feature = "osrm"))]
        Some(endpoint) => {
            log::warn!(
                "ignoring OSRM endpoint {endpoint}: pool_cli was built without the `osrm` feature"
            );
            DirectionsProviderKind::StraightLine
        }
        None => DirectionsProviderKind::StraightLine,
    }
}

fn open_service(
    cli_endpoint: Option<String>,
    cache_ttl_secs: Option<u64>,
    registry: TripRegistry,
) -> Result<TripService<Box<dyn DirectionsProvider>>> {
    let mut cache = CacheConfig::from_env();
    if let Some(secs) = cache_ttl_secs {
        cache = cache.with_ttl(Duration::from_secs(secs));
    }
    let provider = build_directions_provider(&provider_kind(cli_endpoint), &cache)
        .context("failed to set up the directions provider")?;
    Ok(TripService::new(provider, registry))
}

fn load_store(path: &Path) -> Result<TripRegistry> {
    TripRegistry::load_json(path)
        .with_context(|| format!("failed to read trip store {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Main ───────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let (endpoint, ttl) = (cli.osrm_endpoint, cli.cache_ttl_secs);

    match cli.command {
        Commands::Seed { input, store } => {
            let items = load_seed_file(&input)
                .with_context(|| format!("failed to read seed file {}", input.display()))?;
            let mut service = open_service(endpoint, ttl, TripRegistry::new())?;
            let summary = seed_trips(&mut service, items);
            service.registry().save_json(&store)?;
            log::info!(
                "seeded {} trips ({} failed) into {}",
                summary.seeded,
                summary.failed,
                store.display()
            );
        }
        Commands::Add {
            store,
            pickup_lat,
            pickup_lng,
            drop_lat,
            drop_lng,
            departure_time,
        } => {
            let mut service = open_service(endpoint, ttl, load_store(&store)?)?;
            let request =
                NewTripRequest::new((pickup_lat, pickup_lng), (drop_lat, drop_lng), departure_time);
            let trip = service.add_trip(request)?;
            service.registry().save_json(&store)?;
            print_json(&trip)?;
        }
        Commands::List { store, limit } => {
            let service = open_service(endpoint, ttl, load_store(&store)?)?;
            print_json(&service.list_trips(limit))?;
        }
        Commands::Matches { store, trip_id } => {
            let service = open_service(endpoint, ttl, load_store(&store)?)?;
            print_json(&service.get_matches(&trip_id)?)?;
        }
        Commands::DryRun {
            store,
            output,
            limit,
        } => {
            let registry = load_store(&store)?;
            let entries = dry_run(registry.trips(), limit);
            if entries.is_empty() {
                log::info!("seed the store first: pool_cli seed --input <file> --store <store>");
                return Ok(());
            }
            print_json(&entries)?;
            export_to_json(&entries, &output)?;
            log::info!("results saved to {}", output.display());
        }
    }
    Ok(())
}
