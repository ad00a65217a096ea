use serde_json::Value;

pub fn search_params(query: &str) -> [(&str, &str); 4] {
    [
        ("part", "snippet"),
        ("type", "channel"),
        ("maxResults", "1"),
        ("q", query),
    ]
}

pub fn top_channel_id(data: &Value) -> Option<String> {
    let first = data["items"].as_array()?.first()?;
    first["id"]["channelId"]
        .as_str()
        .or_else(|| first["snippet"]["channelId"].as_str())
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
}
