use crate::cache::cache_first;
use crate::db::Db;
use crate::error::AppError;
use crate::lookup::resolver::resolve_channel_id;
use crate::models::Channel;
use crate::youtube::channels::ChannelResource;
use crate::youtube::YouTubeApi;

/// Resolves `raw_input` to a channel and returns its profile, from the store when
/// present and from the API otherwise.
///
/// `Ok(None)` covers both an unresolvable input and a failed remote fetch.
pub async fn get_channel_info<Y: YouTubeApi>(
    youtube: &Y,
    db: &Db,
    api_key: &str,
    raw_input: &str,
) -> Result<Option<Channel>, AppError> {
    let Some(channel_id) = resolve_channel_id(youtube, api_key, raw_input).await else {
        return Ok(None);
    };

    let channel = cache_first(db, &channel_id, || fetch_channel(youtube, api_key, &channel_id)).await?;
    Ok(channel)
}

async fn fetch_channel<Y: YouTubeApi>(youtube: &Y, api_key: &str, channel_id: &str) -> Option<Channel> {
    match youtube.channel_details(api_key, channel_id).await {
        Ok(Some(resource)) => Some(channel_from_resource(channel_id, resource)),
        Ok(None) => {
            tracing::info!("[channel-info] Channel {} does not exist", channel_id);
            None
        }
        Err(e) => {
            tracing::error!(
                "[channel-info] Fetching {} failed: {} (reason: {:?})",
                channel_id,
                e,
                e.reason
            );
            None
        }
    }
}

fn channel_from_resource(requested_id: &str, resource: ChannelResource) -> Channel {
    let channel_id = if resource.id.is_empty() {
        requested_id.to_string()
    } else {
        resource.id
    };
    Channel {
        channel_id,
        title: resource.title,
        description: resource.description,
        custom_url: resource.custom_url,
        subscriber_count: resource.subscriber_count,
        view_count: resource.view_count,
        video_count: resource.video_count,
        thumbnail: resource.thumbnail_url,
        banner_url: resource.banner_url,
        published_at: resource.published_at,
        last_updated: None,
    }
}
