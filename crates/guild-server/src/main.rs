//! guild-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, optionally seeds reference geography, and serves
//! the JSON API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use guild_core::{review::ReviewPolicy, store::MarketStore as _};
use guild_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Guild marketplace server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml` and the
/// `GUILD_*` environment.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host: String,
  #[serde(default = "default_port")]
  port: u16,
  #[serde(default = "default_store_path")]
  store_path: PathBuf,
  /// Optional TOML file of states and cities imported at startup.
  locations_path: Option<PathBuf>,
  /// Reject reviews for pairs the roster has never seen.
  #[serde(default)]
  require_offering_reviews: bool,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("guild.db") }

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("GUILD"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the SQLite store.
  let store_path = expand_tilde(&server_cfg.store_path);
  let mut store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if server_cfg.require_offering_reviews {
    store = store.with_review_policy(ReviewPolicy::RequireOffering);
  }

  if let Some(path) = &server_cfg.locations_path {
    seed_locations(&store, &expand_tilde(path)).await?;
  }

  let app = Router::new()
    .nest("/api", guild_api::api_router(Arc::new(store)))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

// ─── Reference-data seeding ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LocationsFile {
  #[serde(default)]
  states: Vec<StateEntry>,
}

#[derive(Debug, Deserialize)]
struct StateEntry {
  uf:   String,
  name: String,
  #[serde(default)]
  cities: Vec<CityEntry>,
}

#[derive(Debug, Deserialize)]
struct CityEntry {
  id:   i64,
  name: String,
}

/// Import states and cities from a TOML file. The store's import writes are
/// idempotent, so re-seeding on every start is safe.
async fn seed_locations(store: &SqliteStore, path: &Path) -> anyhow::Result<()> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read locations file {path:?}"))?;
  let file: LocationsFile =
    toml::from_str(&raw).context("failed to parse locations file")?;

  let mut state_count = 0usize;
  let mut city_count = 0usize;
  for state in file.states {
    store.add_state(state.uf.clone(), state.name).await?;
    state_count += 1;
    for city in state.cities {
      store.add_city(city.id, state.uf.clone(), city.name).await?;
      city_count += 1;
    }
  }

  tracing::info!("Seeded {state_count} states and {city_count} cities");
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
