//! Playlist index: every playlist of a channel with its member video IDs.

use crate::error::{Result, ScraperError};
use crate::youtube::{self, YouTubeApi};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A playlist and the IDs of the videos it contains, in playlist order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub title: String,
    pub id: String,
    pub video_ids: Vec<String>,
}

impl Playlist {
    pub fn new(title: impl Into<String>, id: impl Into<String>, video_ids: Vec<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            video_ids,
        }
    }

    pub fn url(&self) -> String {
        format!("https://www.youtube.com/playlist?list={}", self.id)
    }

    pub fn contains(&self, video_id: &str) -> bool {
        self.video_ids.iter().any(|id| id == video_id)
    }
}

/// Fetch every playlist of a channel, then every member of each playlist.
///
/// Playlists come back in the order the API lists them. A video that sits
/// in several playlists is listed in each of them.
pub async fn build_playlist_index<A>(api: &A, channel_id: &str) -> Result<Vec<Playlist>>
where
    A: YouTubeApi + ?Sized,
{
    info!("📚 Fetching playlists...");

    let resources: Vec<_> = youtube::playlists_stream(api, channel_id)
        .try_collect()
        .await?;

    let mut playlists = Vec::with_capacity(resources.len());
    for resource in resources {
        let video_ids = fetch_playlist_video_ids(api, &resource.id).await?;
        debug!(
            "Playlist '{}' ({}) has {} videos",
            resource.snippet.title,
            resource.id,
            video_ids.len()
        );
        playlists.push(Playlist::new(resource.snippet.title, resource.id, video_ids));
    }

    info!("  Found {} playlists.", playlists.len());
    Ok(playlists)
}

/// All video IDs of one playlist, across pages. Entries without a video ID
/// (deleted or private videos) are skipped.
pub async fn fetch_playlist_video_ids<A>(api: &A, playlist_id: &str) -> Result<Vec<String>>
where
    A: YouTubeApi + ?Sized,
{
    youtube::playlist_items_stream(api, playlist_id)
        .try_filter_map(|item| async move { Ok::<_, ScraperError>(item.video_id().map(String::from)) })
        .try_collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::fake::FakeYouTube;

    #[tokio::test]
    async fn test_build_index_follows_item_pages() {
        let api = FakeYouTube::default()
            .with_playlist("UC1", "PLa", "Africa", &[&["v1", "v2"], &["v3"]])
            .with_playlist("UC1", "PLb", "Asia", &[&["v2"]]);

        let playlists = build_playlist_index(&api, "UC1").await.unwrap();

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].title, "Africa");
        assert_eq!(playlists[0].video_ids, vec!["v1", "v2", "v3"]);
        assert_eq!(playlists[1].video_ids, vec!["v2"]);
        assert_eq!(
            playlists[1].url(),
            "https://www.youtube.com/playlist?list=PLb"
        );
    }

    #[tokio::test]
    async fn test_channel_without_playlists() {
        let api = FakeYouTube::default();
        let playlists = build_playlist_index(&api, "UC1").await.unwrap();
        assert!(playlists.is_empty());
    }

    #[test]
    fn test_contains() {
        let playlist = Playlist::new("A", "PLa", vec!["v1".into(), "v2".into()]);
        assert!(playlist.contains("v2"));
        assert!(!playlist.contains("v3"));
    }
}
