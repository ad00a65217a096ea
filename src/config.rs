use crate::youtube::YOUTUBE_API_BASE;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub db_path: String,
    pub static_dir: String,
    pub youtube_api_base: String,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let db_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./youtube_data.db".to_string());

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string());

        let youtube_api_base = env::var("YOUTUBE_API_BASE")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| YOUTUBE_API_BASE.to_string());

        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(30);

        if youtube_api_base != YOUTUBE_API_BASE {
            tracing::warn!("YouTube API base overridden: {}", youtube_api_base);
        }

        Self {
            port,
            db_path,
            static_dir,
            youtube_api_base,
            http_timeout_secs,
        }
    }
}
