//! Simulation JSON API - the UI layer talks to this
//!
//! Reads the parquet price store on every request, so an ingest run that
//! swaps the file in is picked up without a restart.
//!
//! Run: STORE_PATH=data/snp500.parquet cargo run --release --bin server

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dca_simulator::{
    run_simulation, store, summarize, PricePoint, SimulationRequest, SimulationResponse,
};

const DEFAULT_STORE_PATH: &str = "data/snp500.parquet";
const DEFAULT_PORT: u16 = 3030;

/// Diagnostic hint attached to store failures, for the UI to display
const STORE_HINT: &str =
    "check that the price store parquet exists with 'date' and 'price' columns; \
     run the ingest binary to (re)build it";

// ============================================================================
// State & Request/Response Types
// ============================================================================

struct AppState {
    store_path: PathBuf,
}

#[derive(Deserialize)]
struct PricesQuery {
    since: Option<NaiveDate>,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct PricesResponse {
    points: Vec<PricePoint>,
    count: usize,
}

// ============================================================================
// Handlers
// ============================================================================

async fn get_prices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PricesQuery>,
) -> Result<Json<PricesResponse>, (StatusCode, String)> {
    let since = query.since.unwrap_or(NaiveDate::MIN);
    let mut points = store::read_since(&state.store_path, since).map_err(|e| {
        error!("price store read failed: {}", e);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("price data unavailable: {}. {}", e, STORE_HINT),
        )
    })?;

    if let Some(limit) = query.limit {
        let start = points.len().saturating_sub(limit);
        points = points.split_off(start);
    }

    let count = points.len();
    Ok(Json(PricesResponse { points, count }))
}

async fn simulate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<SimulationResponse>, (StatusCode, String)> {
    let series = store::read_since(&state.store_path, request.start_date).map_err(|e| {
        error!("price store read failed: {}", e);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("price data unavailable: {}. {}", e, STORE_HINT),
        )
    })?;

    // An empty window comes back as empty steps + null summary, the "no
    // data" outcome; only arithmetic failures become an error response.
    let result = run_simulation(&series, &request).map_err(|e| {
        error!("simulation failed: {}", e);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("simulation failed: {}. {}", e, STORE_HINT),
        )
    })?;

    let summary = summarize(&request, &result.steps);
    Ok(Json(SimulationResponse {
        steps: result.steps,
        summary,
    }))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store_path = std::env::var("STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let state = Arc::new(AppState {
        store_path: PathBuf::from(&store_path),
    });

    info!("price store: {}", store_path);

    let app = Router::new()
        .route("/prices", get(get_prices))
        .route("/api/simulate", post(simulate))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("simulation server on http://{}", addr);
    info!("  GET  /prices        - price series points (?since=YYYY-MM-DD&limit=N)");
    info!("  POST /api/simulate  - run a dollar-cost-averaging simulation");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
