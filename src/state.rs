use crate::config::Config;
use crate::db::Db;
use crate::youtube::YouTubeClient;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub youtube: YouTubeClient,
    pub config: Config,
}
