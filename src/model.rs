//! Domain types the dashboard works with, decoupled from the raw API
//! response shapes in [`crate::youtube_api`].

use crate::format::parse_count;
use crate::youtube_api::channels::Channel;
use crate::youtube_api::playlist_items::PlaylistItem;
use crate::youtube_api::search::SearchResult;
use crate::youtube_api::videos::Video;
use eyre::Context;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A snapshot of a channel's headline numbers, taken at fetch time.
///
/// Counts stay as the decimal strings the API returned; they are unsigned
/// longs upstream and very large channels overflow what an `f64` (and thus
/// JSON number handling in many consumers) can represent losslessly. Parse
/// with [`crate::format::parse_count`] when a number is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStats {
    /// Canonical channel id, `UC` plus 22 characters.
    pub channel_id: String,
    pub title: String,
    pub description: String,
    /// Handle-style vanity URL (`@name`), if the channel claimed one.
    pub custom_url: Option<String>,
    /// When the channel was created.
    pub published_at: Timestamp,
    pub thumbnail: Option<String>,
    /// `"0"` when the owner hides the count.
    pub subscriber_count: String,
    pub view_count: String,
    pub video_count: String,
    /// Id of the uploads playlist. The API has no "oldest video" lookup, so
    /// finding one means paging this playlist from the start.
    pub uploads_playlist: String,
}

impl From<Channel> for ChannelStats {
    fn from(channel: Channel) -> Self {
        let thumbnail = channel
            .snippet
            .thumbnails
            .preferred_url()
            .map(str::to_string);
        Self {
            channel_id: channel.id,
            title: channel.snippet.title,
            description: channel.snippet.description,
            custom_url: channel.snippet.custom_url,
            published_at: channel.snippet.published_at,
            thumbnail,
            subscriber_count: channel.statistics.subscriber_count.unwrap_or_else(zero),
            view_count: channel.statistics.view_count.unwrap_or_else(zero),
            video_count: channel.statistics.video_count.unwrap_or_else(zero),
            uploads_playlist: channel.content_details.related_playlists.uploads,
        }
    }
}

/// A snapshot of one video's details and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStat {
    pub video_id: String,
    pub published_at: Timestamp,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    /// Decimal string; `"0"` when the source endpoint carried no statistics
    /// (playlist and search entries) or the video has them disabled.
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
}

impl From<Video> for VideoStat {
    fn from(video: Video) -> Self {
        let thumbnail = video.snippet.thumbnails.preferred_url().map(str::to_string);
        Self {
            video_id: video.id,
            published_at: video.snippet.published_at,
            title: video.snippet.title,
            description: video.snippet.description,
            thumbnail,
            view_count: video.statistics.view_count.unwrap_or_else(zero),
            like_count: video.statistics.like_count.unwrap_or_else(zero),
            comment_count: video.statistics.comment_count.unwrap_or_else(zero),
        }
    }
}

impl From<PlaylistItem> for VideoStat {
    fn from(item: PlaylistItem) -> Self {
        let snippet = item.snippet;
        let thumbnail = snippet
            .thumbnails
            .as_ref()
            .and_then(|t| t.preferred_url())
            .map(str::to_string);
        // playlistItems.list has no statistics part.
        Self {
            video_id: snippet.resource_id.video_id,
            published_at: snippet.published_at,
            title: snippet.title,
            description: snippet.description,
            thumbnail,
            view_count: zero(),
            like_count: zero(),
            comment_count: zero(),
        }
    }
}

impl VideoStat {
    /// Builds a stat from a search hit, which carries no statistics either.
    /// `None` when the hit is not a video or came back without a snippet.
    pub(crate) fn from_search_hit(hit: SearchResult) -> Option<Self> {
        let video_id = hit.id.video_id?;
        let snippet = hit.snippet?;
        let thumbnail = snippet
            .thumbnails
            .as_ref()
            .and_then(|t| t.preferred_url())
            .map(str::to_string);
        Some(Self {
            video_id,
            published_at: snippet.published_at,
            title: snippet.title,
            description: snippet.description,
            thumbnail,
            view_count: zero(),
            like_count: zero(),
            comment_count: zero(),
        })
    }
}

fn zero() -> String {
    "0".to_string()
}

/// One page of a channel's videos plus the opaque continuation token, passed
/// through from upstream unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoPage {
    pub videos: Vec<VideoStat>,
    pub next_page_token: Option<String>,
}

/// Totals accumulated over every video a channel published inside a date
/// range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeStats {
    pub view_count: u64,
    pub video_count: u64,
}

/// A named set of channels to compare side by side.
///
/// Members may reference channels that are no longer tracked; comparison
/// silently skips those instead of failing the whole group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelGroup {
    pub name: String,
    pub channels: Vec<String>,
}

impl ChannelGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: Vec::new(),
        }
    }

    pub fn contains(&self, channel_id: &str) -> bool {
        self.channels.iter().any(|c| c == channel_id)
    }

    /// Adds a member, keeping the set free of duplicates. Returns whether the
    /// channel was actually added.
    pub fn add_channel(&mut self, channel_id: impl Into<String>) -> bool {
        let channel_id = channel_id.into();
        if self.contains(&channel_id) {
            return false;
        }
        self.channels.push(channel_id);
        true
    }
}

/// The orderings the video list can be displayed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoSortOrder {
    #[default]
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "viewCount")]
    ViewCount,
    #[serde(rename = "likeCount")]
    LikeCount,
}

impl FromStr for VideoSortOrder {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "viewCount" => Ok(Self::ViewCount),
            "likeCount" => Ok(Self::LikeCount),
            other => eyre::bail!(
                "unknown sort order {other:?}, expected date, viewCount, or likeCount"
            ),
        }
    }
}

/// Sorts videos in place, descending, by the selected key. The sort is stable
/// so equal keys keep their fetched order.
pub fn sort_videos(videos: &mut [VideoStat], order: VideoSortOrder) {
    match order {
        VideoSortOrder::Date => {
            videos.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        }
        VideoSortOrder::ViewCount => {
            videos.sort_by_key(|v| std::cmp::Reverse(parse_count(&v.view_count)));
        }
        VideoSortOrder::LikeCount => {
            videos.sort_by_key(|v| std::cmp::Reverse(parse_count(&v.like_count)));
        }
    }
}

/// An inclusive day-granular date window, expanded to UTC instants covering
/// the whole of both boundary days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
    published_after: Timestamp,
    published_before: Timestamp,
}

impl DateRange {
    /// Builds a range from two civil dates. Fails if `start` is after `end`;
    /// a single-day range (`start == end`) is fine.
    pub fn new(start: Date, end: Date) -> eyre::Result<Self> {
        if start > end {
            eyre::bail!("date range starts ({start}) after it ends ({end})");
        }
        let published_after = start
            .to_zoned(TimeZone::UTC)
            .context("interpret range start as a UTC instant")?
            .timestamp();
        let published_before = end
            .at(23, 59, 59, 0)
            .to_zoned(TimeZone::UTC)
            .context("interpret range end as a UTC instant")?
            .timestamp();
        Ok(Self {
            start,
            end,
            published_after,
            published_before,
        })
    }

    /// Parses `YYYY-MM-DD` boundary strings, as entered in the dashboard's
    /// range picker.
    pub fn parse(start: &str, end: &str) -> eyre::Result<Self> {
        let start = start
            .trim()
            .parse::<Date>()
            .with_context(|| format!("parse range start {start:?} as YYYY-MM-DD"))?;
        let end = end
            .trim()
            .parse::<Date>()
            .with_context(|| format!("parse range end {end:?} as YYYY-MM-DD"))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// The instant at the start of the first day, for `publishedAfter`.
    pub fn published_after(&self) -> Timestamp {
        self.published_after
    }

    /// The last whole second of the final day, for `publishedBefore`.
    pub fn published_before(&self) -> Timestamp {
        self.published_before
    }

    pub fn contains(&self, at: Timestamp) -> bool {
        self.published_after <= at && at <= self.published_before
    }
}
