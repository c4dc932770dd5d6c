//! In-memory Data API used by unit tests.

use crate::error::{Result, ScraperError};
use crate::youtube::playlists::{PlaylistItem, PlaylistItemSnippet, PlaylistSnippet};
use crate::youtube::search::SearchSnippet;
use crate::youtube::types::ResourceId;
use crate::youtube::videos::{ContentDetails, VideoSnippet, VideoStatistics};
use crate::youtube::{Page, PlaylistResource, SearchResult, VideoResource, YouTubeApi};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Pages are keyed by token: page 0 has no token, page `n` is requested
/// with token `"page-n"`.
#[derive(Default)]
pub struct FakeYouTube {
    pub channels: HashMap<String, String>,
    pub playlists: HashMap<String, Vec<Vec<PlaylistResource>>>,
    pub playlist_items: HashMap<String, Vec<Vec<PlaylistItem>>>,
    pub search_pages: HashMap<String, Vec<Vec<SearchResult>>>,
    pub details: HashMap<String, VideoResource>,
    /// Fail the search listing once this page index is requested
    pub fail_search_at_page: Option<usize>,
    pub detail_calls: AtomicUsize,
}

impl FakeYouTube {
    pub fn with_channel(mut self, name: &str, id: &str) -> Self {
        self.channels.insert(name.to_string(), id.to_string());
        self
    }

    pub fn with_playlist(mut self, channel_id: &str, id: &str, title: &str, pages: &[&[&str]]) -> Self {
        self.playlists
            .entry(channel_id.to_string())
            .or_insert_with(|| vec![Vec::new()])[0]
            .push(playlist(id, title));
        self.playlist_items.insert(
            id.to_string(),
            pages
                .iter()
                .map(|ids| ids.iter().map(|v| playlist_item(v)).collect())
                .collect(),
        );
        self
    }

    pub fn with_search_pages(mut self, channel_id: &str, pages: &[&[&str]]) -> Self {
        self.search_pages.insert(
            channel_id.to_string(),
            pages
                .iter()
                .map(|ids| ids.iter().map(|v| search_result(v)).collect())
                .collect(),
        );
        self
    }

    pub fn with_video(mut self, id: &str, title: &str, published: &str, description: &str) -> Self {
        self.details
            .insert(id.to_string(), video(id, title, published, description));
        self
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

fn page_index(token: &Option<String>) -> usize {
    token
        .as_deref()
        .and_then(|t| t.strip_prefix("page-"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn paged<T: Clone>(pages: Option<&Vec<Vec<T>>>, token: Option<String>) -> Page<T> {
    let index = page_index(&token);
    let Some(pages) = pages else {
        return Page::from_response(None, None);
    };
    let items = pages.get(index).cloned().unwrap_or_default();
    let next = (index + 1 < pages.len()).then(|| format!("page-{}", index + 1));
    Page::from_response(Some(items.into()), next)
}

#[async_trait]
impl YouTubeApi for FakeYouTube {
    async fn find_channel(&self, query: &str) -> Result<Option<String>> {
        Ok(self.channels.get(query).cloned())
    }

    async fn list_playlists(&self, channel_id: &str, page_token: Option<String>) -> Result<Page<PlaylistResource>> {
        Ok(paged(self.playlists.get(channel_id), page_token))
    }

    async fn list_playlist_items(&self, playlist_id: &str, page_token: Option<String>) -> Result<Page<PlaylistItem>> {
        Ok(paged(self.playlist_items.get(playlist_id), page_token))
    }

    async fn search_channel_videos(&self, channel_id: &str, page_token: Option<String>) -> Result<Page<SearchResult>> {
        if self.fail_search_at_page == Some(page_index(&page_token)) {
            return Err(ScraperError::Api {
                endpoint: "search".to_string(),
                status: 403,
                body: "quotaExceeded".to_string(),
            });
        }
        let mut page = paged(self.search_pages.get(channel_id), page_token);
        // search hits share their publish time with the video details
        for result in page.items.iter_mut() {
            let published = result
                .video_id()
                .and_then(|id| self.details.get(id))
                .map(|video| video.snippet.published_at.clone());
            if let (Some(snippet), Some(published)) = (result.snippet.as_mut(), published) {
                snippet.published_at = published;
            }
        }
        Ok(page)
    }

    async fn video_details(&self, video_id: &str) -> Result<Option<VideoResource>> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.details.get(video_id).cloned())
    }
}

pub fn playlist(id: &str, title: &str) -> PlaylistResource {
    PlaylistResource {
        id: id.to_string(),
        snippet: PlaylistSnippet {
            title: title.to_string(),
        },
    }
}

pub fn playlist_item(video_id: &str) -> PlaylistItem {
    PlaylistItem {
        snippet: PlaylistItemSnippet {
            title: String::new(),
            resource_id: ResourceId {
                kind: "youtube#video".to_string(),
                video_id: Some(video_id.to_string()),
                ..Default::default()
            },
        },
    }
}

pub fn search_result(video_id: &str) -> SearchResult {
    SearchResult {
        id: ResourceId {
            kind: "youtube#video".to_string(),
            video_id: Some(video_id.to_string()),
            ..Default::default()
        },
        snippet: Some(SearchSnippet {
            title: format!("search title {video_id}"),
            published_at: String::new(),
            description: String::new(),
            channel_id: String::new(),
        }),
    }
}

pub fn video(id: &str, title: &str, published: &str, description: &str) -> VideoResource {
    VideoResource {
        id: id.to_string(),
        snippet: VideoSnippet {
            title: title.to_string(),
            description: description.to_string(),
            published_at: published.to_string(),
        },
        statistics: VideoStatistics {
            view_count: Some("1000".to_string()),
            ..Default::default()
        },
        content_details: ContentDetails {
            duration: "PT10M".to_string(),
        },
    }
}
