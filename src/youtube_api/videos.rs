//! Types for the `videos.list` endpoint.
//!
//! See: <https://developers.google.com/youtube/v3/docs/videos/list>

use crate::youtube_api::types::{PageInfo, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response from `videos.list` with `part=snippet,statistics`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// One item per requested id that still exists; deleted or private ids
    /// are silently dropped rather than erroring.
    #[serde(default)]
    pub items: VecDeque<Video>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// A YouTube video resource.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos>
#[derive(Debug, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub snippet: VideoSnippet,
    pub statistics: VideoStatistics,
}

/// Basic details about a video.
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoSnippet {
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    pub thumbnails: Thumbnails,
}

/// Video-level statistics. Counts are decimal strings upstream; any of them
/// can be absent (hidden like counts, disabled comments, scheduled premieres).
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_hydrated_video() {
        let body = serde_json::json!({
            "kind": "youtube#videoListResponse",
            "pageInfo": { "totalResults": 1, "resultsPerPage": 1 },
            "items": [{
                "kind": "youtube#video",
                "id": "dQw4w9WgXcQ",
                "snippet": {
                    "publishedAt": "2009-10-25T06:57:33Z",
                    "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                    "title": "Rick Astley - Never Gonna Give You Up",
                    "description": "The official video.",
                    "channelTitle": "Rick Astley",
                    "thumbnails": {
                        "medium": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/mqdefault.jpg", "width": 320, "height": 180 }
                    }
                },
                "statistics": {
                    "viewCount": "1674368864",
                    "likeCount": "18236471",
                    "commentCount": "2412532"
                }
            }]
        });

        let parsed: VideoListResponse = serde_json::from_value(body).unwrap();
        let video = &parsed.items[0];
        assert_eq!(video.id, "dQw4w9WgXcQ");
        assert_eq!(video.statistics.view_count.as_deref(), Some("1674368864"));
        assert_eq!(
            video.snippet.published_at.to_string(),
            "2009-10-25T06:57:33Z"
        );
    }

    #[test]
    fn tolerates_hidden_statistics() {
        let body = serde_json::json!({ "viewCount": "100" });
        let parsed: VideoStatistics = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.view_count.as_deref(), Some("100"));
        assert_eq!(parsed.like_count, None);
        assert_eq!(parsed.comment_count, None);
    }
}
