//! YouTube Data API v3 client for public channel and video statistics.
//!
//! This module provides key-authenticated (not OAuth) access to the handful
//! of Data API endpoints a statistics dashboard needs: `channels`, `search`,
//! `videos`, and `playlistItems`. Key-based access only reaches public data,
//! which keeps setup to "paste an API key" with no consent flow.
//!
//! # Core Concept: Quota and the Key Pool
//!
//! Every Data API call is billed against the key that made it, and `search`
//! calls cost two orders of magnitude more than plain lookups. A dashboard
//! refreshing many channels therefore drains a single key's daily budget
//! fast. [`keys::KeyPool`] holds every key the user configured and
//! [`client::YouTubeClient`] rotates through them: when a key is rejected
//! with a quota-class reason, the same logical call is retried on the next
//! key, bounded by the pool size. Callers only ever see
//! [`error::ApiError::AllKeysExhausted`] once the whole pool is spent.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use channelscope::youtube_api::{KeyPool, YouTubeClient};
//!
//! # async fn example() -> eyre::Result<()> {
//! let pool = KeyPool::new(vec!["AIza...".to_string()]);
//! let client = YouTubeClient::new(pool, reqwest::Client::new());
//!
//! // Anything resolvable works: @handle, channel URL, or canonical id.
//! let stats = client.channel_stats("@somecreator").await?;
//! println!("{}: {} subscribers", stats.title, stats.subscriber_count);
//!
//! let page = client.channel_videos(&stats.channel_id, 10, None).await?;
//! for video in &page.videos {
//!     println!("  {} ({} views)", video.title, video.view_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod error;
pub mod keys;
pub mod playlist_items;
pub mod search;
pub mod types;
pub mod videos;

// Re-export main types for convenience
pub use client::YouTubeClient;
pub use error::ApiError;
pub use keys::KeyPool;
pub use types::{PageInfo, PagedStream, Thumbnail, Thumbnails};

// Re-export commonly used wire types from each endpoint module
pub use channels::{Channel, ChannelListResponse, ChannelSnippet, ChannelStatistics};

pub use search::{SearchListResponse, SearchResult, SearchResultId, SearchResultSnippet};

pub use videos::{Video, VideoListResponse, VideoSnippet, VideoStatistics};

pub use playlist_items::{PlaylistItem, PlaylistItemListResponse, PlaylistItemSnippet};
