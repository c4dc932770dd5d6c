//! YouTube Search API types.

use crate::youtube::types::{PageInfo, ResourceId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub kind: String,
    pub items: Option<VecDeque<SearchResult>>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A search result points at a video, channel or playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: ResourceId,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSnippet {
    /// HTML-escaped by the API (`&#39;` and friends)
    #[serde(default)]
    pub title: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "channelId", default)]
    pub channel_id: String,
}

impl SearchResult {
    pub fn video_id(&self) -> Option<&str> {
        self.id.video_id.as_deref()
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.id.channel_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_page() {
        let json = r#"{
            "kind": "youtube#searchListResponse",
            "nextPageToken": "CDIQAA",
            "pageInfo": {"totalResults": 812, "resultsPerPage": 50},
            "items": [
                {
                    "kind": "youtube#searchResult",
                    "id": {"kind": "youtube#video", "videoId": "dQw4w9WgXcQ"},
                    "snippet": {
                        "publishedAt": "2023-05-01T12:00:00Z",
                        "channelId": "UC123",
                        "title": "Walking around Tbilisi",
                        "description": "short"
                    }
                }
            ]
        }"#;

        let response: SearchListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.next_page_token.as_deref(), Some("CDIQAA"));
        assert_eq!(response.page_info.total_results, 812);

        let items = response.items.unwrap();
        assert_eq!(items[0].video_id(), Some("dQw4w9WgXcQ"));
        assert_eq!(items[0].channel_id(), None);
    }

    #[test]
    fn test_parse_response_without_items() {
        let response: SearchListResponse =
            serde_json::from_str(r#"{"kind": "youtube#searchListResponse"}"#).unwrap();
        assert!(response.items.is_none());
        assert!(response.next_page_token.is_none());
    }
}
