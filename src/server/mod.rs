pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::planner::Planner;

/// Shared handler state.
#[derive(Clone)]
pub struct ApiContext {
    pub planner: Arc<Planner>,
}

/// Build the API router over a planner.
pub fn router(planner: Arc<Planner>) -> Router {
    Router::new()
        .route("/api/tasks", get(handlers::all_tasks))
        .route(
            "/api/tasks/:date",
            get(handlers::tasks_for_date)
                .post(handlers::create_task)
                .patch(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route(
            "/api/categories/:date",
            get(handlers::categories_for_date).patch(handlers::update_category),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ApiContext { planner })
}

/// Serve the API until the process is stopped.
pub async fn serve(planner: Arc<Planner>, port: u16) -> Result<()> {
    let app = router(planner);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("listening on http://{}", addr);
    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;
    Ok(())
}
