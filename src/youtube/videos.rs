use crate::youtube::count_field;
use serde_json::Value;

pub const VIDEO_PARTS: &str = "statistics,contentDetails";

/// Most IDs `videos.list` accepts in one call.
pub const VIDEO_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoResource {
    pub id: String,
    pub duration: String,
    pub view_count: i64,
    pub comment_count: i64,
}

pub fn parse_video_items(data: &Value) -> Vec<VideoResource> {
    let Some(items) = data["items"].as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let id = item["id"].as_str().filter(|s| !s.is_empty())?;
            Some(VideoResource {
                id: id.to_string(),
                duration: item["contentDetails"]["duration"]
                    .as_str()
                    .unwrap_or("PT0S")
                    .to_string(),
                view_count: count_field(&item["statistics"]["viewCount"]),
                comment_count: count_field(&item["statistics"]["commentCount"]),
            })
        })
        .collect()
}
