//! HTTP glue around the simulation.
//!
//! Two operations are exposed, plus the landing page:
//! - `POST /start-simulation` reseeds the grid
//! - `GET /next-iteration` advances one tick
//!
//! Both answer with the JSON grid snapshot. Requests are serialized through
//! a single mutex, so a tick never overlaps another tick or a start.

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use trophic_core::{AppConfig, SimError, Simulation};
use trophic_data::{GridSnapshot, StartRequest};

/// Server state shared by all handlers.
pub struct AppState {
    sim: Mutex<Simulation>,
}

impl AppState {
    #[must_use]
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim: Mutex::new(sim),
        }
    }

    /// Runs `f` with exclusive access to the simulation.
    pub fn with_sim<T>(&self, f: impl FnOnce(&mut Simulation) -> T) -> T {
        let mut sim = self.sim.lock().unwrap_or_else(|e| {
            tracing::error!("Simulation mutex poisoned, recovering: {}", e);
            e.into_inner()
        });
        f(&mut sim)
    }
}

/// Builds the full router: API routes, landing page and static assets.
pub fn router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();
    Router::new()
        .route("/start-simulation", post(start_simulation))
        .route("/next-iteration", get(next_iteration))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves until the process is stopped.
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let sim = Simulation::new(config)?;
    let state = Arc::new(AppState::new(sim));
    let app = router(state, &config.server.static_dir);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Trophic server listening on {}", addr);
    tracing::info!("    Start:  POST http://{}/start-simulation", addr);
    tracing::info!("    Tick:   GET  http://{}/next-iteration", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Runs a simulation operation on the blocking pool; ticks are CPU work and
/// may fan out over the engine's own worker threads.
async fn run_blocking<T, F>(state: Arc<AppState>, f: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&mut Simulation) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || state.with_sim(f))
        .await
        .map_err(|e| {
            tracing::error!("Simulation task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "simulation task failed").into_response()
        })
}

/// REST endpoint: reseed the grid
async fn start_simulation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> Response {
    let outcome = match run_blocking(state, move |sim| sim.start(&request)).await {
        Ok(outcome) => outcome,
        Err(resp) => return resp,
    };

    match outcome {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Caller mistakes become `400`, anything else `500`; the body is the
/// error's display text.
fn error_response(err: &SimError) -> Response {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("Simulation error: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, err.to_string()).into_response()
}

/// REST endpoint: advance one tick
async fn next_iteration(State(state): State<Arc<AppState>>) -> Response {
    match run_blocking(state, Simulation::next_iteration).await {
        Ok(snapshot) => Json::<GridSnapshot>(snapshot).into_response(),
        Err(resp) => resp,
    }
}
