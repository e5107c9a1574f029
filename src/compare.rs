//! Side-by-side comparison of the channels in a group.
//!
//! Each member costs several API calls (statistics, range totals, newest and
//! oldest video), so members are fetched concurrently and joined; within one
//! member the calls stay sequential so key rotation advances predictably.
//! There is no partial success: one failing member aborts the whole
//! comparison with that first error.

use crate::model::{ChannelGroup, ChannelStats, DateRange, RangeStats, VideoStat};
use crate::youtube_api::YouTubeClient;

/// Outcome of looking up one video slot (newest or oldest) for a comparison
/// entry.
///
/// Three-valued rather than an `Option`: a rendering layer must be able to
/// tell "we have not asked yet" apart from "we asked and the channel has no
/// such video", or an in-progress comparison looks identical to one where
/// nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VideoLookup {
    /// The lookup has not run yet. Never produced by a completed fetch.
    #[default]
    NotFetched,
    /// The lookup ran and no matching video exists.
    Missing,
    /// The lookup ran and found this video.
    Found(VideoStat),
}

impl VideoLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The found video, if there is one.
    pub fn video(&self) -> Option<&VideoStat> {
        match self {
            Self::Found(video) => Some(video),
            Self::NotFetched | Self::Missing => None,
        }
    }
}

impl From<Option<VideoStat>> for VideoLookup {
    /// A completed fetch result: `None` means confirmed-missing, never
    /// not-yet-fetched.
    fn from(video: Option<VideoStat>) -> Self {
        match video {
            Some(video) => Self::Found(video),
            None => Self::Missing,
        }
    }
}

/// One channel's row in a group comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonEntry {
    /// The channel's overall snapshot, fetched fresh for the comparison.
    pub stats: ChannelStats,
    /// Range-scoped totals, present only when the comparison has a date
    /// range. When present, these override the snapshot counts for display.
    pub range_stats: Option<RangeStats>,
    pub newest_video: VideoLookup,
    pub oldest_video: VideoLookup,
}

impl ComparisonEntry {
    /// An entry whose video lookups have not happened yet, for rendering a
    /// comparison while its fetches are still in flight.
    pub fn pending(stats: ChannelStats) -> Self {
        Self {
            stats,
            range_stats: None,
            newest_video: VideoLookup::NotFetched,
            oldest_video: VideoLookup::NotFetched,
        }
    }

    /// The view count to display: the range total when a range is active,
    /// the lifetime snapshot count otherwise.
    pub fn view_count(&self) -> String {
        match &self.range_stats {
            Some(range_stats) => range_stats.view_count.to_string(),
            None => self.stats.view_count.clone(),
        }
    }

    /// The video count to display, same override rule as
    /// [`Self::view_count`].
    pub fn video_count(&self) -> String {
        match &self.range_stats {
            Some(range_stats) => range_stats.video_count.to_string(),
            None => self.stats.video_count.clone(),
        }
    }
}

/// Fetches a comparison entry for every group member that is still tracked.
///
/// Members referencing channels outside `tracked` are dangling (the channel
/// was untracked after the group was built); they are skipped up front
/// without any network traffic. The remaining members are fetched
/// concurrently and the first failure aborts the whole comparison.
pub async fn compare_group(
    client: &YouTubeClient,
    group: &ChannelGroup,
    tracked: &[ChannelStats],
    range: Option<&DateRange>,
) -> eyre::Result<Vec<ComparisonEntry>> {
    let members: Vec<&str> = group
        .channels
        .iter()
        .map(String::as_str)
        .filter(|id| tracked.iter().any(|channel| channel.channel_id == *id))
        .collect();

    let skipped = group.channels.len() - members.len();
    if skipped > 0 {
        tracing::debug!(
            group = group.name,
            skipped,
            "omitting group members that are no longer tracked"
        );
    }

    let entries = members
        .into_iter()
        .map(|channel_id| fetch_entry(client, channel_id, range));
    futures::future::try_join_all(entries).await
}

/// Fetches everything one comparison row needs, sequentially.
async fn fetch_entry(
    client: &YouTubeClient,
    channel_id: &str,
    range: Option<&DateRange>,
) -> eyre::Result<ComparisonEntry> {
    let stats = client.channel_stats(channel_id).await?;

    let range_stats = match range {
        Some(range) => Some(
            client
                .channel_stats_for_range(&stats.channel_id, range)
                .await?,
        ),
        None => None,
    };

    let newest_video = client
        .newest_video_in_range(&stats.channel_id, range)
        .await?
        .into();
    let oldest_video = client
        .oldest_video_in_range(&stats.uploads_playlist, range)
        .await?
        .into();

    Ok(ComparisonEntry {
        stats,
        range_stats,
        newest_video,
        oldest_video,
    })
}
