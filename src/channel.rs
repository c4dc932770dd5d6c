use crate::error::{Result, ScraperError};
use crate::youtube::YouTubeApi;
use tracing::info;

/// Resolve a channel name (or any search query) to its channel ID using the
/// top channel search result.
pub async fn resolve_channel_id<A>(api: &A, username: &str) -> Result<String>
where
    A: YouTubeApi + ?Sized,
{
    info!("🔍 Looking up channel '{}'...", username);

    match api.find_channel(username).await? {
        Some(channel_id) => {
            info!("📺 Channel '{}' resolved to {}", username, channel_id);
            Ok(channel_id)
        }
        None => Err(ScraperError::ChannelNotFound(username.to_string())),
    }
}
