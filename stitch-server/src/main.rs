use std::net::SocketAddr;
use std::str::FromStr;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use stitch_server::cache::{CacheConfig, CachedDirections};
use stitch_server::directions::{
    DirectionsBackend, DirectionsConfig, DirectionsError, HttpDirectionsClient,
    StraightLineDirections,
};
use stitch_server::geocode::{GeocodeClient, GeocodeConfig, GeocodeError};
use stitch_server::hubs::{HubLocator, HubRegistry, HubRegistryError, dhaka_hubs};
use stitch_server::planner::{PlannerConfig, RateTables};
use stitch_server::web::{AppState, create_router};

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "stitch_server=info,tower_http=info";

/// Reliability given to every stitched itinerary.
const DEFAULT_RELIABILITY: f64 = 0.8;

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("failed to load hubs: {0}")]
    Hubs(#[from] HubRegistryError),

    #[error("failed to create directions client: {0}")]
    Directions(#[from] DirectionsError),

    #[error("failed to create geocoder: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings read from the environment.
#[derive(Debug)]
struct ServerConfig {
    bind_addr: SocketAddr,
    directions_api_key: Option<String>,
    directions_base_url: Option<String>,
    hubs_file: Option<String>,
    max_concurrent: usize,
    leg_timeout_secs: u64,
    geocoder_user_agent: Option<String>,
}

impl ServerConfig {
    fn from_env() -> Result<Self, StartupError> {
        Ok(Self {
            bind_addr: env_parse("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            directions_api_key: env_string("DIRECTIONS_API_KEY"),
            directions_base_url: env_string("DIRECTIONS_BASE_URL"),
            hubs_file: env_string("HUBS_FILE"),
            max_concurrent: env_parse("PLANNER_MAX_CONCURRENT", 8)?,
            leg_timeout_secs: env_parse("PLANNER_LEG_TIMEOUT_SECS", 10)?,
            geocoder_user_agent: env_string("GEOCODER_USER_AGENT"),
        })
    }
}

/// A non-empty environment variable.
fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, using `default` when it is unset.
fn env_parse<T: FromStr>(name: &'static str, default: T) -> Result<T, StartupError> {
    match env_string(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| StartupError::InvalidEnv { name, value }),
        None => Ok(default),
    }
}

fn build_directions(config: &ServerConfig) -> Result<DirectionsBackend, StartupError> {
    let Some(api_key) = &config.directions_api_key else {
        warn!("DIRECTIONS_API_KEY not set; using offline straight-line estimates");
        return Ok(DirectionsBackend::Offline(StraightLineDirections::new()));
    };

    let mut directions_config =
        DirectionsConfig::new(api_key).with_max_concurrent(config.max_concurrent);
    if let Some(base_url) = &config.directions_base_url {
        directions_config = directions_config.with_base_url(base_url);
    }

    let client = HttpDirectionsClient::new(directions_config)?;
    Ok(DirectionsBackend::Http(CachedDirections::new(
        client,
        &CacheConfig::default(),
    )))
}

fn load_hubs(config: &ServerConfig) -> Result<HubRegistry, StartupError> {
    match &config.hubs_file {
        Some(path) => {
            let registry = HubRegistry::from_json_file(path)?;
            info!(path = %path, hubs = registry.len(), "Loaded hub registry");
            Ok(registry)
        }
        None => {
            let registry = dhaka_hubs();
            info!(hubs = registry.len(), "Using built-in Dhaka hub registry");
            Ok(registry)
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    let directions = build_directions(&config)?;
    let locator = HubLocator::new(load_hubs(&config)?);

    let planner_config = PlannerConfig::new(
        config.max_concurrent,
        config.leg_timeout_secs,
        DEFAULT_RELIABILITY,
        RateTables::default(),
    );

    let mut geocode_config = GeocodeConfig::new();
    if let Some(user_agent) = &config.geocoder_user_agent {
        geocode_config = geocode_config.with_user_agent(user_agent);
    }
    let geocoder = GeocodeClient::new(geocode_config)?;

    info!(backend = directions.name(), "Directions provider ready");

    let state = AppState::new(directions, locator, planner_config, geocoder);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Itinerary planner listening");
    info!("  GET  /health            - Health check");
    info!("  GET  /hubs              - List hubs");
    info!("  GET  /places/search     - Search places by name");
    info!("  GET  /places/reverse    - Name a coordinate");
    info!("  POST /itineraries/plan  - Plan itineraries");

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}
