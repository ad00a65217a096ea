pub mod channels;
#[cfg(test)]
pub mod fake;
pub mod playlist_items;
pub mod search;
pub mod videos;

use channels::ChannelResource;
use playlist_items::PlaylistPage;
use serde_json::Value;
use std::future::Future;
use videos::VideoResource;

#[derive(Debug)]
pub struct YouTubeApiError {
    pub status: u16,
    pub message: String,
    pub reason: Option<String>,
}

impl std::fmt::Display for YouTubeApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "YouTube API error {}: {}", self.status, self.message)
    }
}

impl std::error::Error for YouTubeApiError {}

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// The remote calls the lookup pipeline makes. Every call takes the caller's API key.
pub trait YouTubeApi: Send + Sync {
    /// Channel ID of the best `type=channel` search hit, if any.
    fn search_channel(
        &self,
        api_key: &str,
        query: &str,
    ) -> impl Future<Output = Result<Option<String>, YouTubeApiError>> + Send;

    fn channel_details(
        &self,
        api_key: &str,
        channel_id: &str,
    ) -> impl Future<Output = Result<Option<ChannelResource>, YouTubeApiError>> + Send;

    fn playlist_items_page(
        &self,
        api_key: &str,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> impl Future<Output = Result<PlaylistPage, YouTubeApiError>> + Send;

    /// Statistics and content details for at most 50 IDs.
    fn video_details(
        &self,
        api_key: &str,
        video_ids: &[String],
    ) -> impl Future<Output = Result<Vec<VideoResource>, YouTubeApiError>> + Send;
}

#[derive(Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }
}

impl YouTubeApi for YouTubeClient {
    async fn search_channel(
        &self,
        api_key: &str,
        query: &str,
    ) -> Result<Option<String>, YouTubeApiError> {
        let data = youtube_get(
            &self.http,
            &self.endpoint("search"),
            &search::search_params(query),
            api_key,
        )
        .await?;
        Ok(search::top_channel_id(&data))
    }

    async fn channel_details(
        &self,
        api_key: &str,
        channel_id: &str,
    ) -> Result<Option<ChannelResource>, YouTubeApiError> {
        let params = [("part", channels::CHANNEL_PARTS), ("id", channel_id)];
        let data = youtube_get(&self.http, &self.endpoint("channels"), &params, api_key).await?;
        Ok(data["items"]
            .as_array()
            .and_then(|items| items.first())
            .map(channels::parse_channel_item))
    }

    async fn playlist_items_page(
        &self,
        api_key: &str,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, YouTubeApiError> {
        let params = playlist_items::page_params(playlist_id, page_token);
        let data =
            youtube_get(&self.http, &self.endpoint("playlistItems"), &params, api_key).await?;
        Ok(playlist_items::parse_page(&data))
    }

    async fn video_details(
        &self,
        api_key: &str,
        video_ids: &[String],
    ) -> Result<Vec<VideoResource>, YouTubeApiError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = video_ids.join(",");
        let params = [("part", videos::VIDEO_PARTS), ("id", ids.as_str())];
        let data = youtube_get(&self.http, &self.endpoint("videos"), &params, api_key).await?;
        Ok(videos::parse_video_items(&data))
    }
}

pub async fn youtube_get(
    http: &reqwest::Client,
    url: &str,
    params: &[(&str, &str)],
    api_key: &str,
) -> Result<Value, YouTubeApiError> {
    let res = http
        .get(url)
        .query(params)
        .query(&[("key", api_key)])
        .send()
        .await
        .map_err(|e| YouTubeApiError {
            status: 0,
            message: e.to_string(),
            reason: None,
        })?;

    let status = res.status().as_u16();
    if status >= 400 {
        let body: Value = res.json().await.unwrap_or_default();
        return Err(error_from_body(status, &body));
    }

    res.json().await.map_err(|e| YouTubeApiError {
        status: 0,
        message: e.to_string(),
        reason: None,
    })
}

fn error_from_body(status: u16, body: &Value) -> YouTubeApiError {
    let reason = body["error"]["errors"][0]["reason"]
        .as_str()
        .map(|s| s.to_string());
    let message = body["error"]["message"]
        .as_str()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("YouTube API error: {}", status));
    YouTubeApiError {
        status,
        message,
        reason,
    }
}

/// Statistics arrive as decimal strings; absent or malformed values count as zero.
pub(crate) fn count_field(value: &Value) -> i64 {
    match value {
        Value::String(s) => s.parse().unwrap_or(0),
        Value::Number(n) => n.as_i64().unwrap_or(0),
        _ => 0,
    }
}

/// Best available thumbnail URL, largest first.
pub(crate) fn pick_thumbnail(thumbnails: &Value) -> String {
    ["high", "medium", "default"]
        .iter()
        .find_map(|size| thumbnails[*size]["url"].as_str())
        .unwrap_or_default()
        .to_string()
}
