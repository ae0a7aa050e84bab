//! Process-level wiring for the parcel server: configuration and the HTTP
//! middleware stack around [`parcel_api::api_router`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use config::{
  Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState,
};
use parcel_core::collection::ParcelCollection;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Environment variable prefix, e.g. `PARCEL_PORT=8080`.
pub const ENV_PREFIX: &str = "PARCEL";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite file holding the parcel collection. `~/` is expanded.
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~/` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// A builder preloaded with the defaults every source may override.
pub fn config_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
  Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 5000_i64)?
    .set_default("store_path", "parcels.db")
}

/// Load configuration from, in increasing precedence: defaults, the TOML file
/// at `path` (if it exists), `PARCEL_*` environment variables, and
/// `port_override`.
pub fn load_config(
  path: &Path,
  port_override: Option<u16>,
) -> Result<ServerConfig, ConfigError> {
  config_defaults()?
    .add_source(File::from(path).required(false))
    .add_source(Environment::with_prefix(ENV_PREFIX))
    .set_override_option("port", port_override.map(i64::from))?
    .build()?
    .try_deserialize()
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

// ─── Application ──────────────────────────────────────────────────────────────

/// The full HTTP application: API routes plus request tracing and permissive
/// CORS.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: ParcelCollection + 'static,
{
  parcel_api::api_router(store)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}
