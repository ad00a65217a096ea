use crate::youtube::pick_thumbnail;
use serde_json::Value;

/// Largest page `playlistItems.list` will return.
pub const PLAYLIST_PAGE_SIZE: usize = 50;

const PAGE_SIZE_PARAM: &str = "50";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistItem {
    pub video_id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub published_at: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistPage {
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
}

pub fn page_params<'a>(playlist_id: &'a str, page_token: Option<&'a str>) -> Vec<(&'a str, &'a str)> {
    let mut params = vec![
        ("part", "snippet,contentDetails"),
        ("playlistId", playlist_id),
        ("maxResults", PAGE_SIZE_PARAM),
    ];
    if let Some(token) = page_token {
        params.push(("pageToken", token));
    }
    params
}

pub fn parse_page(data: &Value) -> PlaylistPage {
    let items = data["items"]
        .as_array()
        .map(|arr| arr.iter().filter_map(parse_item).collect())
        .unwrap_or_default();

    PlaylistPage {
        items,
        next_page_token: data["nextPageToken"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string()),
    }
}

fn parse_item(item: &Value) -> Option<PlaylistItem> {
    let snippet = &item["snippet"];
    let video_id = item["contentDetails"]["videoId"]
        .as_str()
        .or_else(|| snippet["resourceId"]["videoId"].as_str())
        .filter(|s| !s.is_empty())?;

    // videoPublishedAt is the upload time; snippet.publishedAt is when it joined the playlist
    let published_at = item["contentDetails"]["videoPublishedAt"]
        .as_str()
        .or_else(|| snippet["publishedAt"].as_str())
        .unwrap_or_default();

    Some(PlaylistItem {
        video_id: video_id.to_string(),
        title: snippet["title"].as_str().unwrap_or_default().to_string(),
        thumbnail_url: pick_thumbnail(&snippet["thumbnails"]),
        published_at: published_at.to_string(),
    })
}
