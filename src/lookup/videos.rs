use crate::db::Db;
use crate::error::AppError;
use crate::lookup::collector::collect_channel_videos;
use crate::models::{Video, VideoCategory};
use crate::store::{self, DEFAULT_LIST_LIMIT};
use crate::youtube::YouTubeApi;

/// Refreshes the channel's uploads and returns one category of them.
///
/// Unlike channel lookups this path always goes to the API first; the store is
/// only read after a fresh collection. Whether it should be cache-first too is
/// an open product decision.
pub async fn get_videos<Y: YouTubeApi>(
    youtube: &Y,
    db: &Db,
    api_key: &str,
    channel_id: &str,
    category: VideoCategory,
) -> Result<Vec<Video>, AppError> {
    let collected = collect_channel_videos(youtube, db, api_key, channel_id).await;
    if collected.is_empty() {
        tracing::info!("[videos] Nothing collected for {} ({})", channel_id, category);
        return Ok(Vec::new());
    }

    let conn = db.lock();
    let videos = store::list_videos(&conn, channel_id, category, DEFAULT_LIST_LIMIT)?;
    Ok(videos)
}
