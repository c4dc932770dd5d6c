//! YouTube Data API v3 access.
//!
//! [`YouTubeApi`] is the seam between the pipelines and the network: one
//! method per request the pipelines issue, each returning a single page.
//! The `*_stream` helpers wrap the list methods in a [`PagedStream`] so
//! callers see a flat, lazy sequence of items:
//!
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use yt_channel_scraper::youtube::{self, YouTubeApi};
//!
//! # async fn example(api: &dyn YouTubeApi) -> yt_channel_scraper::Result<()> {
//! let playlists: Vec<_> = youtube::playlists_stream(api, "UC123").try_collect().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod playlists;
pub mod search;
pub mod types;
pub mod videos;

#[cfg(test)]
pub(crate) mod fake;

pub use client::YouTubeClient;
pub use playlists::{PlaylistItem, PlaylistResource};
pub use search::{SearchResult, SearchSnippet};
pub use types::{Page, PagedStream};
pub use videos::VideoResource;

use crate::error::Result;
use async_trait::async_trait;
use futures::Stream;

/// The requests the pipelines make against the Data API.
#[async_trait]
pub trait YouTubeApi: Send + Sync {
    /// `search.list(q, type=channel, maxResults=1)`: ID of the best match
    async fn find_channel(&self, query: &str) -> Result<Option<String>>;

    /// `playlists.list(channelId)`
    async fn list_playlists(
        &self,
        channel_id: &str,
        page_token: Option<String>,
    ) -> Result<Page<PlaylistResource>>;

    /// `playlistItems.list(playlistId)`
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<Page<PlaylistItem>>;

    /// `search.list(channelId, type=video)`
    async fn search_channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<String>,
    ) -> Result<Page<SearchResult>>;

    /// `videos.list(id, part=statistics,snippet,contentDetails)`
    async fn video_details(&self, video_id: &str) -> Result<Option<VideoResource>>;
}

/// Every playlist owned by a channel
pub fn playlists_stream<'a, A>(
    api: &'a A,
    channel_id: &'a str,
) -> impl Stream<Item = Result<PlaylistResource>> + 'a
where
    A: YouTubeApi + ?Sized,
{
    PagedStream::new(move |token| api.list_playlists(channel_id, token))
}

/// Every entry of a playlist
pub fn playlist_items_stream<'a, A>(
    api: &'a A,
    playlist_id: &'a str,
) -> impl Stream<Item = Result<PlaylistItem>> + 'a
where
    A: YouTubeApi + ?Sized,
{
    PagedStream::new(move |token| api.list_playlist_items(playlist_id, token))
}

/// Every video search result for a channel
pub fn channel_videos_stream<'a, A>(
    api: &'a A,
    channel_id: &'a str,
) -> impl Stream<Item = Result<SearchResult>> + 'a
where
    A: YouTubeApi + ?Sized,
{
    PagedStream::new(move |token| api.search_channel_videos(channel_id, token))
}
