//! HTTP layer exposing the query pipeline and reference data.

pub mod routes;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::data::store::DataStore;
use crate::qa::respond::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub store: Arc<DataStore>,
}

pub async fn serve(
    orchestrator: Arc<Orchestrator>,
    store: Arc<DataStore>,
    host: String,
    port: u16,
) -> Result<()> {
    let state = AppState {
        orchestrator,
        store,
    };
    let router = Router::new()
        .route("/api/query", post(routes::process_query))
        .route("/api/stats", get(routes::get_stats))
        .route("/api/data/:data_type", get(routes::get_data))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving onco-assistant API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
