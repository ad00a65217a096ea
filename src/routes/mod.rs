pub mod lookup;

use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let index = ServeFile::new(Path::new(&static_dir).join("index.html"));

    Router::new()
        .route_service("/", index)
        .route("/api/health", get(|| async { axum::Json(serde_json::json!({"ok": true})) }))
        .merge(lookup::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}
