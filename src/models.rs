use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub custom_url: String,
    pub subscriber_count: i64,
    pub view_count: i64,
    pub video_count: i64,
    pub thumbnail: String,
    pub banner_url: String,
    pub published_at: String,
    pub last_updated: Option<String>,
}

/// Field names follow what the browser front end reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Video {
    #[serde(rename = "id")]
    pub video_id: String,
    pub channel_id: String,
    pub title: String,
    pub thumbnail: String,
    #[serde(rename = "views")]
    pub view_count: i64,
    #[serde(rename = "comments")]
    pub comment_count: i64,
    #[serde(rename = "publish_date")]
    pub published_at: String,
    pub duration: String,
    pub duration_seconds: i64,
    pub is_short: bool,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCategory {
    LatestVideos,
    PopularVideos,
    LatestShorts,
    PopularShorts,
}

impl VideoCategory {
    pub fn wants_shorts(self) -> bool {
        matches!(self, VideoCategory::LatestShorts | VideoCategory::PopularShorts)
    }

    pub fn by_popularity(self) -> bool {
        matches!(self, VideoCategory::PopularVideos | VideoCategory::PopularShorts)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VideoCategory::LatestVideos => "latest_videos",
            VideoCategory::PopularVideos => "popular_videos",
            VideoCategory::LatestShorts => "latest_shorts",
            VideoCategory::PopularShorts => "popular_shorts",
        }
    }
}

impl fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown video type: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for VideoCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest_videos" => Ok(VideoCategory::LatestVideos),
            "popular_videos" => Ok(VideoCategory::PopularVideos),
            "latest_shorts" => Ok(VideoCategory::LatestShorts),
            "popular_shorts" => Ok(VideoCategory::PopularShorts),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}
