use super::csv_store;
use super::models::FormattedRow;
use crate::config;
use anyhow::Result;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json},
    routing::get,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

// -----------------------------------------------
// API RESPONSE MODELS
// -----------------------------------------------

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

// -----------------------------------------------
// APPLICATION STATE
// -----------------------------------------------

#[derive(Clone)]
pub struct HistoricalState {
    data_dir: Arc<PathBuf>,
}

impl HistoricalState {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Arc::new(data_dir.into()),
        }
    }
}

// -----------------------------------------------
// API HANDLERS
// -----------------------------------------------

/// GET / - Landing page with links to every tracked index
async fn home() -> Html<String> {
    let links: String = config::INDEX_TICKERS
        .iter()
        .map(|ticker| {
            format!(
                "        <li><a href=\"/data/{}\">{} ({})</a></li>\n",
                urlencoding::encode(ticker.symbol),
                ticker.label,
                ticker.symbol
            )
        })
        .collect();

    Html(format!(
        "<h1>Welcome to the NSE HISTORICAL DATA API</h1>\n\
         <p>Use the following endpoints to access the data:</p>\n\
         <ul>\n{}</ul>\n",
        links
    ))
}

/// GET /data/{ticker} - Saved daily history for one index
async fn get_data(
    Path(ticker): Path<String>,
    State(state): State<HistoricalState>,
) -> Result<Json<Vec<FormattedRow>>, ApiError> {
    let ticker = ticker.trim();

    let Some(index) = config::find_index_ticker(ticker) else {
        return Err(api_error(StatusCode::NOT_FOUND, "Invalid ticker specified"));
    };

    let path = state.data_dir.join(index.csv_file);
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "Data file not found for the specified ticker",
        ));
    }

    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| internal_error(ticker, e.into()))?;
    let rows = csv_store::parse_rows(&text).map_err(|e| internal_error(ticker, e))?;

    if rows.is_empty() {
        return Err(api_error(StatusCode::NOT_FOUND, "No data found in file"));
    }

    let formatted = rows
        .iter()
        .map(csv_store::format_row)
        .collect::<Result<Vec<_>>>()
        .map_err(|e| internal_error(ticker, e))?;

    Ok(Json(formatted))
}

fn internal_error(ticker: &str, e: anyhow::Error) -> ApiError {
    error!(ticker, error = %e, "Failed to serve historical data");
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("An error occurred: {}", e),
    )
}

// -----------------------------------------------
// SERVER SETUP
// -----------------------------------------------

pub fn historical_routes(state: HistoricalState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/data/{ticker}", get(get_data))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, data_dir: PathBuf) -> Result<()> {
    let app = historical_routes(HistoricalState::new(data_dir));

    let addr = format!("{}:{}", config::SERVER_HOST, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "Historical data API listening");
    println!("🚀 Historical data API running on http://{}", addr);
    println!("📋 Available endpoints:");
    println!("   GET  /");
    for ticker in config::INDEX_TICKERS {
        println!("   GET  /data/{}", ticker.symbol);
    }
    println!();

    axum::serve(listener, app).await?;
    Ok(())
}
