use super::timer::{Algorithm, AlgorithmRunner};
use crate::config;
use anyhow::Result;
use axum::{Router, extract::State, http::StatusCode, response::Json, routing::post};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::error;

// -----------------------------------------------
// APPLICATION STATE
// -----------------------------------------------

pub struct AlgoState<A: Algorithm> {
    runner: Arc<AlgorithmRunner<A>>,
}

// derive(Clone) would require A: Clone
impl<A: Algorithm> Clone for AlgoState<A> {
    fn clone(&self) -> Self {
        Self {
            runner: Arc::clone(&self.runner),
        }
    }
}

impl<A: Algorithm> AlgoState<A> {
    pub fn new(runner: Arc<AlgorithmRunner<A>>) -> Self {
        Self { runner }
    }
}

// -----------------------------------------------
// API HANDLERS
// -----------------------------------------------

/// POST /start_algo - Start the algorithm if it is idle
async fn start_algorithm<A: Algorithm>(
    State(state): State<AlgoState<A>>,
) -> (StatusCode, Json<Value>) {
    match state.runner.start() {
        Ok(outcome) => (StatusCode::OK, Json(json!({ "message": outcome.message() }))),
        Err(e) => {
            error!(error = %e, "Failed to start algorithm");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

// -----------------------------------------------
// SERVER SETUP
// -----------------------------------------------

pub fn algo_routes<A: Algorithm>(state: AlgoState<A>) -> Router {
    Router::new()
        .route("/start_algo", post(start_algorithm::<A>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = format!("{}:{}", config::SERVER_HOST, port);
    Ok(TcpListener::bind(&addr).await?)
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app).await?;
    Ok(())
}
