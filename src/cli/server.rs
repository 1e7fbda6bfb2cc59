//! Demo item server
//!
//! Serves a synthetic paginated item API for local feeds to point at:
//! `GET /items?page=0` returns `{"items": [...], "next_page": 1}` until
//! the item set is exhausted, where `next_page` becomes null.

use crate::error::{Error, Result};
use crate::types::Item;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Total number of synthetic items
    pub total_items: usize,
    /// Items per page
    pub page_size: usize,
}

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    config: ServerConfig,
}

#[derive(Debug, Deserialize)]
struct ItemsQuery {
    #[serde(default)]
    page: usize,
}

#[derive(Debug, Serialize)]
struct ItemsResponse {
    items: Vec<Item>,
    next_page: Option<usize>,
}

/// Start the demo server and block until shutdown
pub async fn serve(config: ServerConfig) -> Result<()> {
    if config.page_size == 0 {
        return Err(Error::config("page size must be at least 1"));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let state = Arc::new(AppState { config });

    let app = Router::new()
        .route("/items", get(items))
        .route("/health", get(health))
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("demo item server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn items(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ItemsQuery>,
) -> impl IntoResponse {
    let ServerConfig {
        total_items,
        page_size,
        ..
    } = state.config;

    let start = query.page.saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(total_items);
    let items: Vec<Item> = (start..end)
        .map(|i| Item::new(i as u64, format!("Item {i}")))
        .collect();
    let next_page = (end < total_items).then_some(query.page + 1);

    Json(ItemsResponse { items, next_page })
}
