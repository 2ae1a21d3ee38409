//! Local HTTP facade over the resolver and the sky query controller.

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::location::LocationResolver;
use crate::sky::SkyService;

pub fn build_router(service: Arc<dyn SkyService>) -> Router {
    let state = Arc::new(AppState {
        resolver: LocationResolver::new(),
        service,
    });

    Router::new()
        .route("/api/cities", get(handlers::city_list))
        .route("/api/suggest", get(handlers::suggest))
        .route("/api/resolve", get(handlers::resolve))
        .route("/api/sky", get(handlers::sky))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, service: Arc<dyn SkyService>) -> std::io::Result<()> {
    let app = build_router(service);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await.inspect_err(|e| {
        error!("cannot bind to {}: {}", addr, e);
    })?;

    info!("SkyScope server listening on http://{}", addr);
    axum::serve(listener, app).await
}
