mod cache;
mod config;
mod db;
mod duration;
mod error;
mod lookup;
mod models;
mod routes;
mod state;
mod store;
mod youtube;

use config::Config;
use parking_lot::Mutex;
use state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use youtube::YouTubeClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let conn = db::open(&config.db_path).expect("Failed to open database");
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .expect("Failed to build HTTP client");

    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
        youtube: YouTubeClient::new(http, config.youtube_api_base.clone()),
        config: config.clone(),
    };

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");
    tracing::info!("[server] Running on http://localhost:{}", config.port);
    axum::serve(listener, app).await.expect("Server error");
}
