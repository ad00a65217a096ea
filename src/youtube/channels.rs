use crate::youtube::{count_field, pick_thumbnail};
use serde_json::Value;

pub const CHANNEL_PARTS: &str = "snippet,statistics,brandingSettings,contentDetails";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelResource {
    pub id: String,
    pub title: String,
    pub description: String,
    pub custom_url: String,
    pub published_at: String,
    pub thumbnail_url: String,
    pub banner_url: String,
    pub subscriber_count: i64,
    pub view_count: i64,
    pub video_count: i64,
    pub uploads_playlist_id: Option<String>,
}

/// Reads one `channels.list` item. Missing fields become empty strings or zero.
pub fn parse_channel_item(item: &Value) -> ChannelResource {
    let snippet = &item["snippet"];
    let stats = &item["statistics"];
    let text = |v: &Value| v.as_str().unwrap_or_default().to_string();

    ChannelResource {
        id: text(&item["id"]),
        title: text(&snippet["title"]),
        description: text(&snippet["description"]),
        custom_url: text(&snippet["customUrl"]),
        published_at: text(&snippet["publishedAt"]),
        thumbnail_url: pick_thumbnail(&snippet["thumbnails"]),
        banner_url: text(&item["brandingSettings"]["image"]["bannerExternalUrl"]),
        subscriber_count: count_field(&stats["subscriberCount"]),
        view_count: count_field(&stats["viewCount"]),
        video_count: count_field(&stats["videoCount"]),
        uploads_playlist_id: item["contentDetails"]["relatedPlaylists"]["uploads"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string()),
    }
}
