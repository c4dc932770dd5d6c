//! HTTP client for the YouTube Data API v3, authenticated with a static API key.

use crate::config::{ApiConfig, ApiKey};
use crate::error::{Result, ScraperError};
use crate::youtube::playlists::{
    PlaylistItem, PlaylistItemListResponse, PlaylistListResponse, PlaylistResource,
};
use crate::youtube::search::{SearchListResponse, SearchResult};
use crate::youtube::types::Page;
use crate::youtube::videos::{VideoListResponse, VideoResource};
use crate::youtube::YouTubeApi;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Client for the YouTube Data API v3.
///
/// Every request carries the API key as the `key` query parameter. Failed
/// requests are returned as errors straight away; there is no retry.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
    page_size: String,
}

impl YouTubeClient {
    pub fn new(api_key: ApiKey, config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("yt-channel-scraper/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.to_string(),
        })
    }

    /// GET `{base_url}/{endpoint}` and decode the JSON body.
    ///
    /// Non-2xx responses become [`ScraperError::Api`] carrying the response
    /// body, which is where the API puts its quota and key errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(endpoint, ?params, "YouTube API request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.expose())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ScraperError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ScraperError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    fn with_page_token<'a>(
        mut params: Vec<(&'a str, &'a str)>,
        page_token: &'a Option<String>,
    ) -> Vec<(&'a str, &'a str)> {
        if let Some(token) = page_token {
            params.push(("pageToken", token.as_str()));
        }
        params
    }
}

#[async_trait]
impl YouTubeApi for YouTubeClient {
    async fn find_channel(&self, query: &str) -> Result<Option<String>> {
        let params = [
            ("q", query),
            ("type", "channel"),
            ("part", "id"),
            ("maxResults", "1"),
        ];
        let response: SearchListResponse = self.get_json("search", &params).await?;

        Ok(response
            .items
            .unwrap_or_default()
            .into_iter()
            .find_map(|item| item.id.channel_id))
    }

    async fn list_playlists(
        &self,
        channel_id: &str,
        page_token: Option<String>,
    ) -> Result<Page<PlaylistResource>> {
        let params = Self::with_page_token(
            vec![
                ("channelId", channel_id),
                ("part", "snippet"),
                ("maxResults", self.page_size.as_str()),
            ],
            &page_token,
        );
        let response: PlaylistListResponse = self.get_json("playlists", &params).await?;
        Ok(Page::from_response(response.items, response.next_page_token))
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<Page<PlaylistItem>> {
        let params = Self::with_page_token(
            vec![
                ("playlistId", playlist_id),
                ("part", "snippet"),
                ("maxResults", self.page_size.as_str()),
            ],
            &page_token,
        );
        let response: PlaylistItemListResponse = self.get_json("playlistItems", &params).await?;
        Ok(Page::from_response(response.items, response.next_page_token))
    }

    async fn search_channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<String>,
    ) -> Result<Page<SearchResult>> {
        let params = Self::with_page_token(
            vec![
                ("channelId", channel_id),
                ("type", "video"),
                ("part", "snippet"),
                ("maxResults", self.page_size.as_str()),
            ],
            &page_token,
        );
        let response: SearchListResponse = self.get_json("search", &params).await?;
        Ok(Page::from_response(response.items, response.next_page_token))
    }

    async fn video_details(&self, video_id: &str) -> Result<Option<VideoResource>> {
        let params = [("part", "statistics,snippet,contentDetails"), ("id", video_id)];
        let response: VideoListResponse = self.get_json("videos", &params).await?;
        Ok(response.items.into_iter().next())
    }
}
