//! Video enumeration and enrichment for a channel.

use crate::chapters::markers::extract_chapter_markers;
use crate::error::Result;
use crate::join;
use crate::playlists::Playlist;
use crate::youtube::{self, SearchResult, SearchSnippet, VideoResource, YouTubeApi};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::pin::pin;
use tracing::{debug, info};

/// One enriched video of a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD HH:MM:SS`, so string order is chronological order
    pub published: String,
    pub view_count: String,
    /// ISO 8601 duration as reported by the API
    pub duration: String,
    pub description: String,
    pub chapter_markers: Vec<String>,
    /// Comma-joined titles of the playlists the video belongs to
    pub playlists: String,
}

impl Video {
    /// Build a video from its search hit and detail resource, deriving
    /// chapter markers and playlist membership. Title and publish time come
    /// from the search hit, so both output tables agree on the title.
    pub fn from_resource(
        listing: Option<SearchSnippet>,
        resource: VideoResource,
        playlists: &[Playlist],
    ) -> Self {
        let chapter_markers = extract_chapter_markers(&resource.snippet.description);
        let playlist_titles = join::playlist_titles(&resource.id, playlists);
        let (title, published_at) = match listing {
            Some(snippet) => (snippet.title, snippet.published_at),
            None => (resource.snippet.title, resource.snippet.published_at),
        };

        Self {
            published: normalize_published(&published_at),
            view_count: resource
                .statistics
                .view_count
                .unwrap_or_else(|| "0".to_string()),
            duration: resource.content_details.duration,
            title,
            description: resource.snippet.description,
            chapter_markers,
            playlists: playlist_titles,
            id: resource.id,
        }
    }

    pub fn url(&self) -> String {
        watch_url(&self.id)
    }
}

/// Video title and the playlists it appears in, as URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistLinkRow {
    #[serde(rename = "Video Title")]
    pub video_title: String,
    #[serde(rename = "Playlist URLs")]
    pub playlist_urls: String,
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// `2023-05-01T12:00:00Z` → `2023-05-01 12:00:00`
pub fn normalize_published(raw: &str) -> String {
    raw.replace('T', " ").replace('Z', "")
}

/// Newest first. Stable, so videos published in the same second keep
/// discovery order.
pub fn sort_newest_first(videos: &mut [Video]) {
    videos.sort_by(|a, b| b.published.cmp(&a.published));
}

/// Walks a channel's video search results, skipping any ID already seen.
///
/// The seen-set lives as long as the enricher, so one enricher shared across
/// several channels never emits the same video twice in a run.
pub struct VideoEnricher<'a, A: ?Sized> {
    api: &'a A,
    seen: HashSet<String>,
}

impl<'a, A> VideoEnricher<'a, A>
where
    A: YouTubeApi + ?Sized,
{
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            seen: HashSet::new(),
        }
    }

    /// Number of distinct video IDs seen so far
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Returns the video ID if this result has not been seen before
    fn claim(&mut self, result: &SearchResult) -> Option<String> {
        let video_id = result.video_id()?;
        if self.seen.insert(video_id.to_string()) {
            Some(video_id.to_string())
        } else {
            debug!("Skipping duplicate video {}", video_id);
            None
        }
    }

    /// Fetch details for every new video of a channel. One detail request per
    /// new video; videos whose details come back empty are skipped.
    /// Results are in discovery order.
    pub async fn collect_videos(
        &mut self,
        channel_id: &str,
        playlists: &[Playlist],
    ) -> Result<Vec<Video>> {
        info!("🎬 Fetching videos...");

        let mut results = pin!(youtube::channel_videos_stream(self.api, channel_id));
        let mut videos = Vec::new();

        while let Some(result) = results.try_next().await? {
            let Some(video_id) = self.claim(&result) else {
                continue;
            };

            match self.api.video_details(&video_id).await? {
                Some(resource) => {
                    let video = Video::from_resource(result.snippet, resource, playlists);
                    debug!(
                        "Video {} '{}': {} chapter markers, playlists [{}]",
                        video.id,
                        video.title,
                        video.chapter_markers.len(),
                        video.playlists
                    );
                    videos.push(video);
                }
                None => debug!("No details returned for {}, skipping", video_id),
            }
        }

        info!("  Found {} unique videos.", videos.len());
        Ok(videos)
    }

    /// Map every new video of a channel to the URLs of its playlists. Uses the
    /// search results only; no detail requests.
    pub async fn collect_link_rows(
        &mut self,
        channel_id: &str,
        playlists: &[Playlist],
    ) -> Result<Vec<PlaylistLinkRow>> {
        info!("🔗 Mapping videos to playlists...");

        let mut results = pin!(youtube::channel_videos_stream(self.api, channel_id));
        let mut rows = Vec::new();

        while let Some(result) = results.try_next().await? {
            let Some(video_id) = self.claim(&result) else {
                continue;
            };

            let video_title = result
                .snippet
                .map(|snippet| snippet.title)
                .unwrap_or_default();

            rows.push(PlaylistLinkRow {
                video_title,
                playlist_urls: join::playlist_urls(&video_id, playlists),
            });
        }

        info!("  Mapped {} videos.", rows.len());
        Ok(rows)
    }
}
