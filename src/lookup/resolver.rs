use crate::youtube::YouTubeApi;
use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Canonical channel IDs always start with this.
pub const CHANNEL_ID_PREFIX: &str = "UC";

/// Tried in order; the first capture wins.
static URL_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"/channel/([^/?#]+)").expect("valid channel pattern"),
        Regex::new(r"/user/([^/?#]+)").expect("valid user pattern"),
        Regex::new(r"/@([^/?#]+)").expect("valid handle pattern"),
    ]
});

/// Pulls the identifier out of a channel URL, or returns the trimmed input unchanged.
pub fn extract_identifier(input: &str) -> &str {
    let input = input.trim();
    URL_PATTERNS
        .iter()
        .find_map(|re| re.captures(input).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
        .unwrap_or(input)
}

pub fn is_canonical_id(identifier: &str) -> bool {
    identifier.starts_with(CHANNEL_ID_PREFIX)
}

/// Turns free-form user input into a canonical channel ID.
///
/// Search failures are logged and reported as `None`.
pub async fn resolve_channel_id<Y: YouTubeApi>(
    youtube: &Y,
    api_key: &str,
    input: &str,
) -> Option<String> {
    let identifier = extract_identifier(input);
    if identifier.is_empty() {
        return None;
    }
    if is_canonical_id(identifier) {
        return Some(identifier.to_string());
    }

    match youtube.search_channel(api_key, identifier).await {
        Ok(Some(channel_id)) => {
            tracing::debug!("[resolver] {} -> {}", identifier, channel_id);
            Some(channel_id)
        }
        Ok(None) => {
            tracing::info!("[resolver] No channel found for {:?}", identifier);
            None
        }
        Err(e) => {
            tracing::warn!(
                "[resolver] Search failed for {:?}: {} (reason: {:?})",
                identifier,
                e,
                e.reason
            );
            None
        }
    }
}
