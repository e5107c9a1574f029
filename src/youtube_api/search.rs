//! Types for the `search.list` endpoint.
//!
//! See: <https://developers.google.com/youtube/v3/docs/search/list>

use crate::youtube_api::types::{PageInfo, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response from `search.list`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: VecDeque<SearchResult>,
    /// Token for the page after this one, absent on the last page.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// A single search hit. Which id variant is populated depends on the
/// `type` filter the search was issued with.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: Option<SearchResultSnippet>,
}

/// The id of the resource a search hit points at. Exactly one of the
/// variants is set per hit.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultId {
    pub kind: String,
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

/// Search-level details about a hit. Enough to display a result list; video
/// statistics require a follow-up `videos.list` call.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultSnippet {
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub title: String,
    /// Truncated by the upstream API; the full text requires a `videos.list`
    /// lookup.
    pub description: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    pub thumbnails: Option<Thumbnails>,
}
