//! Durable client-side state: API keys, tracked channels, groups, and
//! display preferences.
//!
//! State lives as a handful of JSON files in one directory, one file per
//! logical key, read at startup and rewritten on every mutation. Loading is
//! infallible: a missing file means "use the default", and a malformed one is
//! logged and treated the same way so a corrupt preferences file can never
//! brick startup.

use crate::model::{ChannelGroup, ChannelStats};
use eyre::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

const API_KEYS_FILE: &str = "api_keys.json";
const CHANNELS_FILE: &str = "channels.json";
const GROUPS_FILE: &str = "groups.json";
const VIDEOS_PER_PAGE_FILE: &str = "videos_per_page.json";

/// How many videos a dashboard page shows unless the user changed it.
pub const DEFAULT_VIDEOS_PER_PAGE: u32 = 10;

/// File-backed store for everything that survives across sessions.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Creates a store rooted at the given directory. The directory is
    /// created lazily on the first write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The configured API keys, in rotation order. Empty when never set.
    pub async fn load_api_keys(&self) -> Vec<String> {
        self.load_or(API_KEYS_FILE, Vec::new).await
    }

    /// Persists the key list exactly as ordered; reloading yields the same
    /// rotation order with the cursor back at the first key.
    pub async fn save_api_keys(&self, keys: &[String]) -> eyre::Result<()> {
        self.save(API_KEYS_FILE, keys).await
    }

    /// The tracked channels with their last fetched snapshots.
    pub async fn load_channels(&self) -> Vec<ChannelStats> {
        self.load_or(CHANNELS_FILE, Vec::new).await
    }

    pub async fn save_channels(&self, channels: &[ChannelStats]) -> eyre::Result<()> {
        self.save(CHANNELS_FILE, channels).await
    }

    /// The comparison groups the user has defined.
    pub async fn load_groups(&self) -> Vec<ChannelGroup> {
        self.load_or(GROUPS_FILE, Vec::new).await
    }

    pub async fn save_groups(&self, groups: &[ChannelGroup]) -> eyre::Result<()> {
        self.save(GROUPS_FILE, groups).await
    }

    /// The videos-per-page preference, [`DEFAULT_VIDEOS_PER_PAGE`] when unset.
    pub async fn load_videos_per_page(&self) -> u32 {
        self.load_or(VIDEOS_PER_PAGE_FILE, || DEFAULT_VIDEOS_PER_PAGE)
            .await
    }

    pub async fn save_videos_per_page(&self, videos_per_page: u32) -> eyre::Result<()> {
        self.save(VIDEOS_PER_PAGE_FILE, &videos_per_page).await
    }

    async fn load_or<T, F>(&self, file: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.dir.join(file);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return default(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read state file, using default"
                );
                return default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "malformed state file, using default"
                );
                default()
            }
        }
    }

    async fn save<T>(&self, file: &str, value: &T) -> eyre::Result<()>
    where
        T: Serialize + ?Sized,
    {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create state directory {}", self.dir.display()))?;
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(value).context("serialize state to JSON")?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("write state file {}", path.display()))?;
        tracing::trace!(path = %path.display(), "wrote state file");
        Ok(())
    }
}
