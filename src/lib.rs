//! Access layer for a YouTube channel statistics dashboard.
//!
//! The dashboard itself (rendering, navigation) lives elsewhere; this crate
//! owns everything between user input and the YouTube Data API:
//!
//! - [`youtube_api`] - the API client: key-pool rotation on quota exhaustion,
//!   channel resolution from handles/URLs, statistics and video queries,
//!   date-range aggregation
//! - [`model`] - the domain types those queries produce, plus date ranges and
//!   sort orders
//! - [`compare`] - concurrent group comparisons built on the client
//! - [`state`] - file-backed persistence for keys, tracked channels, groups,
//!   and preferences
//! - [`format`] - compact count rendering (`1.5K`, `2M`)
//!
//! The typical flow: load persisted state, build a [`YouTubeClient`] over the
//! stored keys, then call query methods with whatever identifier the user
//! supplied. Tracking channels from pasted input goes through
//! [`track_channels`], which resolves line by line and persists after each
//! success so a bad line never throws away the good ones before it.

use eyre::Context;

pub mod compare;
pub mod format;
pub mod model;
pub mod state;
pub mod youtube_api;

pub use compare::{compare_group, ComparisonEntry, VideoLookup};
pub use model::{
    sort_videos, ChannelGroup, ChannelStats, DateRange, RangeStats, VideoPage, VideoSortOrder,
    VideoStat,
};
pub use state::{StateStore, DEFAULT_VIDEOS_PER_PAGE};
pub use youtube_api::{ApiError, KeyPool, YouTubeClient};

/// Splits pasted multi-line input into channel identifiers, one per line.
/// Whitespace is trimmed and blank lines are ignored.
pub fn parse_channel_list(input: &str) -> Vec<&str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Resolves and tracks every channel in pasted multi-line input.
///
/// Lines are processed strictly in input order, one at a time, so a failure
/// can name the exact line that caused it and key rotation stays predictable.
/// Each successfully resolved channel is appended to the tracked list and the
/// list is persisted immediately; a later failure therefore keeps everything
/// tracked so far. Channels already tracked (or repeated within the input)
/// are skipped, not errors.
///
/// Returns the snapshots that were newly added.
pub async fn track_channels(
    client: &YouTubeClient,
    store: &StateStore,
    input: &str,
) -> eyre::Result<Vec<ChannelStats>> {
    let mut channels = store.load_channels().await;
    let mut added = Vec::new();

    for identifier in parse_channel_list(input) {
        let stats = client
            .channel_stats(identifier)
            .await
            .wrap_err_with(|| format!("track channel {identifier:?}"))?;

        if channels
            .iter()
            .any(|channel| channel.channel_id == stats.channel_id)
        {
            tracing::debug!(
                channel_id = stats.channel_id,
                identifier,
                "channel already tracked, skipping"
            );
            continue;
        }

        tracing::info!(
            channel_id = stats.channel_id,
            title = stats.title,
            "tracking channel"
        );
        channels.push(stats.clone());
        store.save_channels(&channels).await?;
        added.push(stats);
    }

    Ok(added)
}

/// Removes a channel from the tracked list. Returns whether it was present.
///
/// Groups referencing the channel are left alone; comparison treats such
/// references as dangling and skips them.
pub async fn untrack_channel(store: &StateStore, channel_id: &str) -> eyre::Result<bool> {
    let mut channels = store.load_channels().await;
    let before = channels.len();
    channels.retain(|channel| channel.channel_id != channel_id);
    if channels.len() == before {
        return Ok(false);
    }
    store.save_channels(&channels).await?;
    tracing::info!(channel_id, "untracked channel");
    Ok(true)
}
