use crate::db::Db;
use crate::duration::{is_short_duration, parse_iso_duration};
use crate::models::Video;
use crate::store;
use crate::youtube::playlist_items::PlaylistItem;
use crate::youtube::videos::{VideoResource, VIDEO_BATCH_SIZE};
use crate::youtube::{YouTubeApi, YouTubeApiError};
use std::collections::HashMap;

/// Upper bound on uploads read per collection run.
pub const MAX_COLLECTED_VIDEOS: usize = 200;

/// Hard stop on playlist requests. Pages may hold fewer than `PLAYLIST_PAGE_SIZE`
/// usable items, so this is looser than `MAX_COLLECTED_VIDEOS / PLAYLIST_PAGE_SIZE`.
const MAX_PAGES: usize = MAX_COLLECTED_VIDEOS;

#[derive(Debug, thiserror::Error)]
enum CollectError {
    #[error("channel not found")]
    ChannelNotFound,
    #[error("channel has no uploads playlist")]
    NoUploadsPlaylist,
    #[error(transparent)]
    Api(#[from] YouTubeApiError),
    #[error("store: {0}")]
    Store(#[from] rusqlite::Error),
}

/// Reads up to 200 of the channel's most recent uploads, classifies each one and
/// stores it. Returns the videos in upload-playlist order.
///
/// Any failure is logged and yields an empty list, so an empty result does not
/// prove the channel has no videos.
pub async fn collect_channel_videos<Y: YouTubeApi>(
    youtube: &Y,
    db: &Db,
    api_key: &str,
    channel_id: &str,
) -> Vec<Video> {
    match try_collect(youtube, db, api_key, channel_id).await {
        Ok(videos) => {
            tracing::info!(
                "[collector] Stored {} videos for {}",
                videos.len(),
                channel_id
            );
            videos
        }
        Err(e) => {
            tracing::error!(
                "[collector] Collecting videos for {} failed: {:?}",
                channel_id,
                e
            );
            Vec::new()
        }
    }
}

async fn try_collect<Y: YouTubeApi>(
    youtube: &Y,
    db: &Db,
    api_key: &str,
    channel_id: &str,
) -> Result<Vec<Video>, CollectError> {
    let uploads = youtube
        .channel_details(api_key, channel_id)
        .await?
        .ok_or(CollectError::ChannelNotFound)?
        .uploads_playlist_id
        .ok_or(CollectError::NoUploadsPlaylist)?;

    let items = fetch_uploads(youtube, api_key, &uploads).await?;

    let mut details: HashMap<String, VideoResource> = HashMap::with_capacity(items.len());
    let ids: Vec<String> = items.iter().map(|i| i.video_id.clone()).collect();
    for batch in ids.chunks(VIDEO_BATCH_SIZE) {
        for resource in youtube.video_details(api_key, batch).await? {
            details.insert(resource.id.clone(), resource);
        }
    }

    let mut videos = Vec::with_capacity(items.len());
    {
        let conn = db.lock();
        for item in items {
            // private or deleted uploads are missing from videos.list
            let Some(detail) = details.remove(&item.video_id) else {
                continue;
            };
            let mut video = build_video(channel_id, item, detail);
            store::put_video(&conn, &mut video)?;
            videos.push(video);
        }
    }

    Ok(videos)
}

async fn fetch_uploads<Y: YouTubeApi>(
    youtube: &Y,
    api_key: &str,
    playlist_id: &str,
) -> Result<Vec<PlaylistItem>, YouTubeApiError> {
    let mut items: Vec<PlaylistItem> = Vec::new();
    let mut page_token: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let page = youtube
            .playlist_items_page(api_key, playlist_id, page_token.as_deref())
            .await?;
        if page.items.is_empty() {
            break;
        }
        items.extend(page.items);

        page_token = page.next_page_token;
        if page_token.is_none() || items.len() >= MAX_COLLECTED_VIDEOS {
            break;
        }
    }

    items.truncate(MAX_COLLECTED_VIDEOS);
    Ok(items)
}

fn build_video(channel_id: &str, item: PlaylistItem, detail: VideoResource) -> Video {
    let seconds = parse_iso_duration(&detail.duration);
    Video {
        video_id: item.video_id,
        channel_id: channel_id.to_string(),
        title: item.title,
        thumbnail: item.thumbnail_url,
        view_count: detail.view_count,
        comment_count: detail.comment_count,
        published_at: item.published_at,
        duration: detail.duration,
        duration_seconds: i64::try_from(seconds).unwrap_or(i64::MAX),
        is_short: is_short_duration(seconds),
        last_updated: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::shared_memory;
    use crate::youtube::fake::FakeYouTube;
    use std::sync::atomic::Ordering;

    fn many_uploads(n: usize) -> Vec<(String, String)> {
        (0..n)
            .map(|i| {
                (
                    format!("vid{:03}", i),
                    format!("2024-01-01T00:{:02}:{:02}Z", (i / 60) % 60, i % 60),
                )
            })
            .collect()
    }

    fn fake_with_uploads(n: usize) -> FakeYouTube {
        let uploads = many_uploads(n);
        let rows: Vec<(&str, &str, &str, i64)> = uploads
            .iter()
            .map(|(id, at)| (id.as_str(), at.as_str(), "PT5M", 10))
            .collect();
        FakeYouTube::new().with_channel("UCbig", &rows)
    }

    #[tokio::test]
    async fn test_stops_at_cap_even_with_more_pages() {
        let yt = fake_with_uploads(260);
        let db = shared_memory();

        let videos = collect_channel_videos(&yt, &db, "key", "UCbig").await;

        assert_eq!(videos.len(), MAX_COLLECTED_VIDEOS);
        assert_eq!(yt.playlist_calls.load(Ordering::SeqCst), 4);
        assert_eq!(videos[0].video_id, "vid000");
        assert_eq!(videos[199].video_id, "vid199");
    }

    #[tokio::test]
    async fn test_short_pages_keep_paging_to_cap() {
        let yt = FakeYouTube {
            page_size: Some(10),
            ..fake_with_uploads(260)
        };
        let db = shared_memory();

        let videos = collect_channel_videos(&yt, &db, "key", "UCbig").await;

        assert_eq!(videos.len(), MAX_COLLECTED_VIDEOS);
        assert_eq!(yt.playlist_calls.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn test_empty_page_with_token_stops() {
        let yt = FakeYouTube {
            page_size: Some(0),
            ..fake_with_uploads(30)
        };
        let db = shared_memory();

        assert!(collect_channel_videos(&yt, &db, "key", "UCbig").await.is_empty());
        assert_eq!(yt.playlist_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_follows_tokens_until_exhausted() {
        let yt = fake_with_uploads(120);
        let db = shared_memory();

        let videos = collect_channel_videos(&yt, &db, "key", "UCbig").await;

        assert_eq!(videos.len(), 120);
        assert_eq!(yt.playlist_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_detail_batches_stay_within_limit() {
        let yt = fake_with_uploads(200);
        let db = shared_memory();

        collect_channel_videos(&yt, &db, "key", "UCbig").await;

        assert_eq!(yt.video_calls.load(Ordering::SeqCst), 4);
        assert_eq!(yt.largest_video_batch.load(Ordering::SeqCst), VIDEO_BATCH_SIZE);
    }

    #[tokio::test]
    async fn test_classifies_and_persists() {
        let yt = FakeYouTube::new().with_channel(
            "UCmix",
            &[
                ("short", "2024-03-01T00:00:00Z", "PT60S", 300),
                ("long", "2024-02-01T00:00:00Z", "PT1M1S", 900),
            ],
        );
        let db = shared_memory();

        let videos = collect_channel_videos(&yt, &db, "key", "UCmix").await;
        assert_eq!(videos.len(), 2);
        assert!(videos[0].is_short);
        assert_eq!(videos[0].duration_seconds, 60);
        assert!(!videos[1].is_short);
        assert_eq!(videos[1].duration_seconds, 61);

        let stored = store::get_video(&db.lock(), "long").unwrap().unwrap();
        assert_eq!(stored.channel_id, "UCmix");
        assert_eq!(stored.view_count, 900);
        assert!(!stored.is_short);
        assert!(stored.last_updated.is_some());
    }

    #[tokio::test]
    async fn test_skips_videos_without_details() {
        let mut yt = FakeYouTube::new().with_channel(
            "UCgone",
            &[
                ("kept", "2024-03-01T00:00:00Z", "PT3M", 1),
                ("private", "2024-02-01T00:00:00Z", "PT3M", 1),
            ],
        );
        yt.videos.remove("private");
        let db = shared_memory();

        let videos = collect_channel_videos(&yt, &db, "key", "UCgone").await;
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "kept");
    }

    #[tokio::test]
    async fn test_unknown_channel_is_empty() {
        let yt = FakeYouTube::new();
        let db = shared_memory();
        assert!(collect_channel_videos(&yt, &db, "key", "UCnone").await.is_empty());
        assert_eq!(yt.playlist_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_degrades_to_empty() {
        let yt = FakeYouTube {
            fail_videos: true,
            ..FakeYouTube::new().with_channel("UC1", &[("v1", "2024-01-01T00:00:00Z", "PT30S", 1)])
        };
        let db = shared_memory();

        assert!(collect_channel_videos(&yt, &db, "key", "UC1").await.is_empty());
        assert_eq!(store::get_video(&db.lock(), "v1").unwrap(), None);
    }

    #[tokio::test]
    async fn test_long_stream_duration_is_stored() {
        let yt = FakeYouTube::new().with_channel(
            "UClive",
            &[
                ("stream", "2024-01-01T00:00:00Z", "P2DT1S", 5),
                ("broken", "2024-01-02T00:00:00Z", "PT9999999999999999H", 5),
            ],
        );
        let db = shared_memory();

        let videos = collect_channel_videos(&yt, &db, "key", "UClive").await;
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].duration_seconds, 172_801);
        assert!(!videos[0].is_short);
        assert_eq!(videos[1].duration_seconds, 0);
        assert_eq!(videos[1].duration, "PT9999999999999999H");
    }

    #[tokio::test]
    async fn test_empty_playlist() {
        let yt = FakeYouTube::new().with_channel("UCquiet", &[]);
        let db = shared_memory();
        assert!(collect_channel_videos(&yt, &db, "key", "UCquiet").await.is_empty());
        assert_eq!(yt.video_calls.load(Ordering::SeqCst), 0);
    }
}
