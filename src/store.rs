use crate::models::{Channel, Video, VideoCategory};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub const DEFAULT_LIST_LIMIT: usize = 20;

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn channel_from_row(row: &Row<'_>) -> rusqlite::Result<Channel> {
    Ok(Channel {
        channel_id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        custom_url: row.get(3)?,
        subscriber_count: row.get(4)?,
        view_count: row.get(5)?,
        video_count: row.get(6)?,
        thumbnail: row.get(7)?,
        banner_url: row.get(8)?,
        published_at: row.get(9)?,
        last_updated: row.get(10)?,
    })
}

fn video_from_row(row: &Row<'_>) -> rusqlite::Result<Video> {
    Ok(Video {
        video_id: row.get(0)?,
        channel_id: row.get(1)?,
        title: row.get(2)?,
        thumbnail: row.get(3)?,
        view_count: row.get(4)?,
        comment_count: row.get(5)?,
        published_at: row.get(6)?,
        duration: row.get(7)?,
        duration_seconds: row.get(8)?,
        is_short: row.get::<_, i64>(9)? == 1,
        last_updated: row.get(10)?,
    })
}

pub fn get_channel(conn: &Connection, channel_id: &str) -> rusqlite::Result<Option<Channel>> {
    conn.query_row(
        "SELECT channel_id, title, description, custom_url, subscriber_count, view_count,
                video_count, thumbnail, banner_url, published_at, last_updated
         FROM channels WHERE channel_id = ?1",
        [channel_id],
        channel_from_row,
    )
    .optional()
}

/// Replaces the whole channel row and stamps `last_updated` on both the row and `channel`.
pub fn put_channel(conn: &Connection, channel: &mut Channel) -> rusqlite::Result<()> {
    let now = now_timestamp();
    conn.execute(
        "INSERT OR REPLACE INTO channels
            (channel_id, title, description, custom_url, subscriber_count, view_count,
             video_count, thumbnail, banner_url, published_at, last_updated)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            channel.channel_id,
            channel.title,
            channel.description,
            channel.custom_url,
            channel.subscriber_count,
            channel.view_count,
            channel.video_count,
            channel.thumbnail,
            channel.banner_url,
            channel.published_at,
            now,
        ],
    )?;
    channel.last_updated = Some(now);
    Ok(())
}

pub fn get_video(conn: &Connection, video_id: &str) -> rusqlite::Result<Option<Video>> {
    conn.query_row(
        "SELECT video_id, channel_id, title, thumbnail, view_count, comment_count,
                published_at, duration, duration_seconds, is_short, last_updated
         FROM videos WHERE video_id = ?1",
        [video_id],
        video_from_row,
    )
    .optional()
}

/// Replaces the whole video row and stamps `last_updated` on both the row and `video`.
pub fn put_video(conn: &Connection, video: &mut Video) -> rusqlite::Result<()> {
    let now = now_timestamp();
    conn.execute(
        "INSERT OR REPLACE INTO videos
            (video_id, channel_id, title, thumbnail, view_count, comment_count,
             published_at, duration, duration_seconds, is_short, last_updated)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            video.video_id,
            video.channel_id,
            video.title,
            video.thumbnail,
            video.view_count,
            video.comment_count,
            video.published_at,
            video.duration,
            video.duration_seconds,
            video.is_short as i64,
            now,
        ],
    )?;
    video.last_updated = Some(now);
    Ok(())
}

pub fn list_videos(
    conn: &Connection,
    channel_id: &str,
    category: VideoCategory,
    limit: usize,
) -> rusqlite::Result<Vec<Video>> {
    let order = if category.by_popularity() {
        "view_count DESC"
    } else {
        "published_at DESC"
    };
    let sql = format!(
        "SELECT video_id, channel_id, title, thumbnail, view_count, comment_count,
                published_at, duration, duration_seconds, is_short, last_updated
         FROM videos
         WHERE channel_id = ?1 AND is_short = ?2
         ORDER BY {}, video_id
         LIMIT ?3",
        order
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(
            params![channel_id, category.wants_shorts() as i64, limit as i64],
            video_from_row,
        )?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
