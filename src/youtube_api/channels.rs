//! Types for the `channels.list` endpoint.
//!
//! See: <https://developers.google.com/youtube/v3/docs/channels/list>

use crate::youtube_api::types::{PageInfo, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response from `channels.list` with `part=snippet,statistics,contentDetails`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// The channels matching the request. Empty (the field is omitted
    /// upstream) when no channel matches the given id or username.
    #[serde(default)]
    pub items: VecDeque<Channel>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// A YouTube channel resource.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels>
#[derive(Debug, Serialize, Deserialize)]
pub struct Channel {
    /// The canonical channel id (`UC` followed by 22 characters).
    pub id: String,
    pub snippet: ChannelSnippet,
    pub statistics: ChannelStatistics,
    #[serde(rename = "contentDetails")]
    pub content_details: ChannelContentDetails,
}

/// Basic details about a channel.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
    pub description: String,
    /// The channel's handle-style vanity URL, e.g. `@somecreator`. Not every
    /// channel has claimed one.
    #[serde(rename = "customUrl")]
    pub custom_url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    pub thumbnails: Thumbnails,
}

/// Channel-level statistics.
///
/// Counts are decimal strings upstream (they are unsigned longs, and the API
/// serializes those as strings). `subscriber_count` is absent when the owner
/// has hidden it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "hiddenSubscriberCount")]
    pub hidden_subscriber_count: Option<bool>,
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
}

/// The `contentDetails` part of a channel resource.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

/// System playlists associated with a channel. Only `uploads` is still
/// populated upstream; the other historical entries (likes, favorites) come
/// back empty and are not modeled here.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelatedPlaylists {
    /// The playlist containing every public upload, in reverse upload order.
    pub uploads: String,
}

/// Response from `channels.list` with `part=id`, used for username lookups
/// where only the resolved id matters.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelIdListResponse {
    #[serde(default)]
    pub items: VecDeque<ChannelIdItem>,
}

/// A channel resource reduced to its id.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelIdItem {
    pub id: String,
}
