//! Types for the `playlistItems.list` endpoint, used to walk a channel's
//! uploads playlist.
//!
//! See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>

use crate::youtube_api::types::{PageInfo, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response from `playlistItems.list` with `part=snippet`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: VecDeque<PlaylistItem>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// A single entry in a playlist.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

/// Details of a playlist entry. For an uploads playlist, `published_at` is
/// when the entry was added to the playlist, which coincides with the upload
/// time. No statistics part exists on this endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemSnippet {
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    pub title: String,
    pub description: String,
    /// Empty object upstream for deleted or private videos, so every
    /// rendition inside ends up `None`.
    pub thumbnails: Option<Thumbnails>,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
}

/// The resource a playlist entry wraps. Always a video for uploads playlists.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceId {
    pub kind: String,
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_an_uploads_page() {
        let body = serde_json::json!({
            "kind": "youtube#playlistItemListResponse",
            "nextPageToken": "EAAaBlBUOkNBVQ",
            "pageInfo": { "totalResults": 120, "resultsPerPage": 50 },
            "items": [{
                "kind": "youtube#playlistItem",
                "snippet": {
                    "publishedAt": "2010-01-02T15:04:05Z",
                    "title": "First upload",
                    "description": "",
                    "thumbnails": {
                        "default": { "url": "https://i.ytimg.com/vi/abc123def45/default.jpg", "width": 120, "height": 90 }
                    },
                    "resourceId": { "kind": "youtube#video", "videoId": "abc123def45" }
                }
            }]
        });

        let parsed: PlaylistItemListResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.next_page_token.as_deref(), Some("EAAaBlBUOkNBVQ"));
        assert_eq!(parsed.items[0].snippet.resource_id.video_id, "abc123def45");
    }

    #[test]
    fn tolerates_a_deleted_video_entry() {
        let body = serde_json::json!({
            "kind": "youtube#playlistItemListResponse",
            "pageInfo": { "totalResults": 1, "resultsPerPage": 50 },
            "items": [{
                "snippet": {
                    "publishedAt": "2012-06-01T00:00:00Z",
                    "title": "Deleted video",
                    "description": "This video is unavailable.",
                    "thumbnails": {},
                    "resourceId": { "kind": "youtube#video", "videoId": "gone0000000" }
                }
            }]
        });

        let parsed: PlaylistItemListResponse = serde_json::from_value(body).unwrap();
        let snippet = &parsed.items[0].snippet;
        assert_eq!(snippet.title, "Deleted video");
        assert_eq!(snippet.thumbnails.as_ref().unwrap().preferred_url(), None);
        assert_eq!(parsed.next_page_token, None);
    }
}
