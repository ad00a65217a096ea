//! In-memory stand-in for the YouTube Data API, with per-endpoint call counters.

use crate::youtube::channels::ChannelResource;
use crate::youtube::playlist_items::{PlaylistItem, PlaylistPage, PLAYLIST_PAGE_SIZE};
use crate::youtube::videos::VideoResource;
use crate::youtube::{YouTubeApi, YouTubeApiError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct FakeYouTube {
    pub search_results: HashMap<String, String>,
    pub channels: HashMap<String, ChannelResource>,
    /// Full playlist contents; served in pages with offset tokens.
    pub playlists: HashMap<String, Vec<PlaylistItem>>,
    pub videos: HashMap<String, VideoResource>,
    /// Items per playlist page; defaults to the API maximum.
    pub page_size: Option<usize>,
    pub fail_search: bool,
    pub fail_channels: bool,
    pub fail_videos: bool,
    pub search_calls: AtomicUsize,
    pub channel_calls: AtomicUsize,
    pub playlist_calls: AtomicUsize,
    pub video_calls: AtomicUsize,
    pub largest_video_batch: AtomicUsize,
    pub keys_seen: parking_lot::Mutex<Vec<String>>,
}

fn server_error() -> YouTubeApiError {
    YouTubeApiError {
        status: 500,
        message: "backend error".to_string(),
        reason: Some("backendError".to_string()),
    }
}

impl FakeYouTube {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a channel with an uploads playlist of `videos`, newest first.
    /// Each entry is `(video_id, published_at, duration, views)`.
    pub fn with_channel(mut self, channel_id: &str, videos: &[(&str, &str, &str, i64)]) -> Self {
        let uploads = format!("UU{}", &channel_id[2..]);
        self.channels.insert(
            channel_id.to_string(),
            ChannelResource {
                id: channel_id.to_string(),
                title: format!("Channel {}", channel_id),
                description: "A channel".to_string(),
                custom_url: "@channel".to_string(),
                published_at: "2012-01-01T00:00:00Z".to_string(),
                thumbnail_url: "https://yt3.ggpht.com/a.jpg".to_string(),
                banner_url: String::new(),
                subscriber_count: 100,
                view_count: 1000,
                video_count: videos.len() as i64,
                uploads_playlist_id: Some(uploads.clone()),
            },
        );
        let items = videos
            .iter()
            .map(|(id, published_at, _, _)| PlaylistItem {
                video_id: id.to_string(),
                title: format!("Title {}", id),
                thumbnail_url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id),
                published_at: published_at.to_string(),
            })
            .collect();
        self.playlists.insert(uploads, items);
        for (id, _, duration, views) in videos {
            self.videos.insert(
                id.to_string(),
                VideoResource {
                    id: id.to_string(),
                    duration: duration.to_string(),
                    view_count: *views,
                    comment_count: 1,
                },
            );
        }
        self
    }

    pub fn with_search(mut self, query: &str, channel_id: &str) -> Self {
        self.search_results
            .insert(query.to_string(), channel_id.to_string());
        self
    }

    pub fn total_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
            + self.channel_calls.load(Ordering::SeqCst)
            + self.playlist_calls.load(Ordering::SeqCst)
            + self.video_calls.load(Ordering::SeqCst)
    }

    fn record_key(&self, api_key: &str) {
        self.keys_seen.lock().push(api_key.to_string());
    }
}

impl YouTubeApi for FakeYouTube {
    async fn search_channel(
        &self,
        api_key: &str,
        query: &str,
    ) -> Result<Option<String>, YouTubeApiError> {
        self.record_key(api_key);
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(server_error());
        }
        Ok(self.search_results.get(query).cloned())
    }

    async fn channel_details(
        &self,
        api_key: &str,
        channel_id: &str,
    ) -> Result<Option<ChannelResource>, YouTubeApiError> {
        self.record_key(api_key);
        self.channel_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_channels {
            return Err(server_error());
        }
        Ok(self.channels.get(channel_id).cloned())
    }

    async fn playlist_items_page(
        &self,
        api_key: &str,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, YouTubeApiError> {
        self.record_key(api_key);
        self.playlist_calls.fetch_add(1, Ordering::SeqCst);
        let all = self.playlists.get(playlist_id).ok_or_else(|| YouTubeApiError {
            status: 404,
            message: "playlist not found".to_string(),
            reason: Some("playlistNotFound".to_string()),
        })?;
        let start: usize = page_token.and_then(|t| t.parse().ok()).unwrap_or(0);
        let size = self.page_size.unwrap_or(PLAYLIST_PAGE_SIZE);
        let start = start.min(all.len());
        let end = (start + size).min(all.len());
        // a zero page size keeps handing out the same token
        let more = end < all.len() || (size == 0 && !all.is_empty());
        Ok(PlaylistPage {
            items: all[start..end].to_vec(),
            next_page_token: more.then(|| end.to_string()),
        })
    }

    async fn video_details(
        &self,
        api_key: &str,
        video_ids: &[String],
    ) -> Result<Vec<VideoResource>, YouTubeApiError> {
        self.record_key(api_key);
        self.video_calls.fetch_add(1, Ordering::SeqCst);
        self.largest_video_batch
            .fetch_max(video_ids.len(), Ordering::SeqCst);
        if self.fail_videos {
            return Err(server_error());
        }
        Ok(video_ids
            .iter()
            .filter_map(|id| self.videos.get(id).cloned())
            .collect())
    }
}
