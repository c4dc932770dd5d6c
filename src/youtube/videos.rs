//! YouTube Videos API types.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `videos.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: VecDeque<VideoResource>,
}

/// A `video` resource with the snippet, statistics and contentDetails parts.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoResource {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
    #[serde(rename = "contentDetails")]
    pub content_details: ContentDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

/// Counters are strings in the API. Missing when the owner hides them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDetails {
    /// ISO 8601 duration, e.g. `PT1H2M10S`
    pub duration: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_video_details() {
        let json = r#"{
            "items": [{
                "id": "v1",
                "snippet": {
                    "title": "Inside North Korea",
                    "description": "0:00 Intro\n4:12 Border",
                    "publishedAt": "2022-01-02T03:04:05Z"
                },
                "statistics": {"likeCount": "10"},
                "contentDetails": {"duration": "PT21M3S"}
            }]
        }"#;

        let response: VideoListResponse = serde_json::from_str(json).unwrap();
        let video = &response.items[0];
        assert_eq!(video.content_details.duration, "PT21M3S");
        assert!(video.statistics.view_count.is_none());
        assert_eq!(video.statistics.like_count.as_deref(), Some("10"));
    }

    #[test]
    fn test_empty_details_response() {
        let response: VideoListResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(response.items.is_empty());
        let response: VideoListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_empty());
    }
}
