//! Core YouTube API client functionality and API key management.

use crate::format::parse_count;
use crate::model::{ChannelStats, DateRange, RangeStats, VideoPage, VideoStat};
use crate::youtube_api::{
    channels::ChannelIdListResponse,
    channels::ChannelListResponse,
    error::{ApiError, UpstreamFailure},
    keys::KeyPool,
    playlist_items::PlaylistItemListResponse,
    search::SearchListResponse,
    types::PagedStream,
    videos::VideoListResponse,
};
use eyre::Context;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_stream::StreamExt;
use tracing::instrument;

/// Base endpoint of the YouTube Data API v3.
const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Client for interacting with the YouTube Data API v3 using API keys.
///
/// Unlike OAuth-authenticated access, key-based access only reaches public
/// data, which is all a statistics dashboard needs. The client owns a pool of
/// keys and rotates through them round-robin; when a key comes back with a
/// quota-class rejection the same logical call is transparently retried with
/// the next key, bounded by the pool size. Callers never see quota handling
/// unless every key is spent.
///
/// The pool lives behind a mutex so that concurrent calls (the group
/// comparison fans out per channel) still advance the rotation cursor one at
/// a time.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    /// The configured API keys and their rotation cursor.
    keys: Arc<Mutex<KeyPool>>,
    /// HTTP client for API requests
    client: reqwest::Client,
    /// Endpoint prefix, overridable for tests.
    base_url: String,
}

impl YouTubeClient {
    /// Creates a client over the given key pool and a shared HTTP client.
    pub fn new(keys: KeyPool, client: reqwest::Client) -> Self {
        Self::with_base_url(keys, client, YOUTUBE_API_BASE)
    }

    /// Like [`Self::new`], but pointed at a different API base URL.
    ///
    /// Meant for tests and API-compatible proxies; the path layout under the
    /// base must match the real Data API.
    pub fn with_base_url(
        keys: KeyPool,
        client: reqwest::Client,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            keys: Arc::new(Mutex::new(keys)),
            client,
            base_url: base_url.into(),
        }
    }

    /// Replaces the key pool, resetting rotation to the first key.
    ///
    /// This is the settings-change path; in-flight calls keep the attempt
    /// bound they started with.
    pub async fn configure_keys(&self, keys: Vec<String>) {
        let mut pool = self.keys.lock().await;
        pool.configure(keys);
        tracing::info!(pool_size = pool.len(), "replaced API key pool");
    }

    /// Issues one logical GET against a Data API endpoint and parses the JSON
    /// response.
    ///
    /// This consolidates everything every endpoint shares:
    /// - key selection from the pool, appended as the `key` query parameter
    /// - detection of quota-class rejections and rotation to the next key,
    ///   up to pool-size attempts in total for this one logical call
    /// - rotation on transport-level failures under the same bound, after
    ///   which the transport error itself is surfaced
    /// - immediate failure with [`ApiError::RequestFailed`] on any other
    ///   upstream rejection, passing the upstream message through
    ///
    /// Callers must not retry around this method; the attempt counter here is
    /// the only quota handling in the crate, so the bound stays shared and
    /// finite.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    pub(crate) async fn call_api<T>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        // Snapshot the size so the attempt bound is stable even if the pool
        // is swapped while this call is in flight.
        let pool_size = self.keys.lock().await.len();

        let mut attempts = 0;
        loop {
            let api_key = self.keys.lock().await.next_key()?;
            attempts += 1;

            let response = match self
                .client
                .get(&url)
                .query(query_params)
                .query(&[("key", api_key.as_str())])
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    if attempts < pool_size {
                        tracing::warn!(
                            endpoint,
                            attempt = attempts,
                            error = %e,
                            "transport failure, retrying with next API key"
                        );
                        continue;
                    }
                    return Err(e)
                        .with_context(|| format!("send GET request to YouTube API: {url}"));
                }
            };

            let status = response.status();
            if status.is_success() {
                return response
                    .json()
                    .await
                    .with_context(|| format!("parse YouTube {endpoint} API response as JSON"));
            }

            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            let failure = UpstreamFailure::from_body(&body);

            if failure.quota_exhausted {
                if attempts < pool_size {
                    tracing::warn!(
                        endpoint,
                        attempt = attempts,
                        "API key out of quota, rotating to next key"
                    );
                    continue;
                }
                tracing::error!(
                    endpoint,
                    pool_size,
                    "every configured API key is out of quota"
                );
                return Err(ApiError::AllKeysExhausted { pool_size }.into());
            }

            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message: failure.message,
            }
            .into());
        }
    }

    /// Resolves whatever the user typed into a canonical channel id.
    ///
    /// Accepted forms: the canonical id itself, `@handle`, a full channel URL
    /// in any of its historical shapes (`/channel/<id>`, `/user/<name>`,
    /// `/c/<name>`, `/@handle`), or a bare custom/legacy name.
    ///
    /// Canonical-shaped input short-circuits without touching the network.
    /// Everything else is first tried as a legacy username; if that lookup
    /// misses (or fails, which is logged and swallowed so one dead endpoint
    /// cannot block resolution), a free-text channel search decides. Fails
    /// with [`ApiError::ChannelNotFound`] when neither path produces a match
    /// and with [`ApiError::InvalidIdentifier`] when the input reduces to
    /// nothing worth sending upstream.
    #[instrument(skip(self), ret)]
    pub async fn resolve_channel_id(&self, identifier: &str) -> eyre::Result<String> {
        let normalized = normalize_identifier(identifier)?;

        if is_canonical_channel_id(&normalized) {
            tracing::trace!(channel_id = normalized, "identifier is already canonical");
            return Ok(normalized);
        }

        match self.channel_id_for_username_internal(&normalized).await {
            Ok(Some(channel_id)) => return Ok(channel_id),
            Ok(None) => {
                tracing::debug!(
                    identifier = normalized,
                    "no channel for legacy username, falling back to search"
                );
            }
            Err(e) => {
                tracing::warn!(
                    identifier = normalized,
                    error = ?e,
                    "username lookup failed, falling back to search"
                );
            }
        }

        match self.channel_id_from_search_internal(&normalized).await? {
            Some(channel_id) => Ok(channel_id),
            None => Err(ApiError::ChannelNotFound(identifier.trim().to_string()).into()),
        }
    }

    /// Fetches the current statistics snapshot for a channel.
    ///
    /// The identifier goes through [`Self::resolve_channel_id`] first, so
    /// anything that method accepts works here too.
    ///
    /// # Returns
    ///
    /// A [`ChannelStats`] with counts as the decimal strings the API
    /// returned, or [`ApiError::ChannelNotFound`] if the resolved id matches
    /// no channel.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    pub async fn channel_stats(&self, identifier: &str) -> eyre::Result<ChannelStats> {
        let channel_id = self.resolve_channel_id(identifier).await?;

        let query_params = [
            ("part", "snippet,statistics,contentDetails"),
            ("id", channel_id.as_str()),
        ];
        let channels: ChannelListResponse = self.call_api("channels", &query_params).await?;

        tracing::debug!(
            channel_id,
            total_results = channels.page_info.total_results,
            "fetched channel statistics"
        );

        match channels.items.into_iter().next() {
            Some(channel) => Ok(ChannelStats::from(channel)),
            None => Err(ApiError::ChannelNotFound(identifier.trim().to_string()).into()),
        }
    }

    /// Fetches one page of a channel's videos, newest first, with full
    /// statistics.
    ///
    /// Search results carry no statistics, so each page costs two calls: one
    /// `search.list` for the ids and one `videos.list` to hydrate them. An
    /// empty search page is returned as-is without the hydration call.
    ///
    /// # Arguments
    ///
    /// * `channel_id` - Canonical channel id (resolve first if needed)
    /// * `page_size` - Videos per page (1-50, the upstream maximum)
    /// * `page_token` - Opaque continuation token from a previous page
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    pub async fn channel_videos(
        &self,
        channel_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<VideoPage> {
        self.videos_page_internal(channel_id, page_size, page_token, None)
            .await
    }

    /// Finds the oldest video on the first page of a channel's uploads
    /// playlist.
    ///
    /// The API has no "oldest video" lookup, so this fetches the first page
    /// (up to 50 entries) of the uploads playlist, re-sorts it by publish
    /// timestamp ascending (page order is not guaranteed chronological), and
    /// takes the first entry. For channels with more than 50 uploads this is
    /// explicitly "oldest among the first page", an approximation rather than
    /// a full playlist walk.
    ///
    /// The playlist endpoint exposes no statistics, so view/like/comment
    /// counts come back as `"0"`.
    ///
    /// Any fetch failure degrades to `None` (logged, not propagated) so that
    /// a single channel's broken playlist cannot take down a whole comparison
    /// view.
    #[instrument(skip(self))]
    pub async fn oldest_video(&self, uploads_playlist_id: &str) -> Option<VideoStat> {
        match self.uploads_page_internal(uploads_playlist_id, None).await {
            Ok((items, _)) => {
                let mut videos: Vec<VideoStat> = items.into();
                videos.sort_by(|a, b| a.published_at.cmp(&b.published_at));
                videos.into_iter().next()
            }
            Err(e) => {
                tracing::warn!(
                    uploads_playlist_id,
                    error = ?e,
                    "failed to fetch uploads playlist, reporting no oldest video"
                );
                None
            }
        }
    }

    /// Sums view counts and tallies videos over everything a channel
    /// published inside the range.
    ///
    /// Pages through the full date-bounded search, batch by batch, until
    /// pagination is exhausted.
    ///
    /// # Quota
    ///
    /// By far the most expensive operation here: every 50-video batch costs
    /// one `search.list` call (100 quota units) plus one `videos.list` call.
    /// A channel with a thousand uploads in range burns two thousand units in
    /// one invocation. Callers should surface that cost to the user before
    /// kicking this off.
    #[instrument(skip(self))]
    pub async fn channel_stats_for_range(
        &self,
        channel_id: &str,
        range: &DateRange,
    ) -> eyre::Result<RangeStats> {
        let mut totals = RangeStats::default();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .videos_page_internal(channel_id, 50, page_token.as_deref(), Some(range))
                .await?;
            for video in &page.videos {
                totals.view_count += parse_count(&video.view_count);
                totals.video_count += 1;
            }
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(
            channel_id,
            video_count = totals.video_count,
            view_count = totals.view_count,
            "aggregated statistics over date range"
        );
        Ok(totals)
    }

    /// Fetches the newest video a channel published, optionally bounded by a
    /// date range.
    ///
    /// Without a range this reuses the paginated video path with a page size
    /// of one, so the result carries real statistics. With a range it issues
    /// a single date-bounded search of size one and builds the result from
    /// the search snippet alone; counts are `"0"` in that case because search
    /// results carry no statistics.
    #[instrument(skip(self))]
    pub async fn newest_video_in_range(
        &self,
        channel_id: &str,
        range: Option<&DateRange>,
    ) -> eyre::Result<Option<VideoStat>> {
        let Some(range) = range else {
            let page = self.channel_videos(channel_id, 1, None).await?;
            return Ok(page.videos.into_iter().next());
        };

        let published_after = range.published_after().to_string();
        let published_before = range.published_before().to_string();
        let query_params = [
            ("part", "snippet"),
            ("channelId", channel_id),
            ("type", "video"),
            ("order", "date"),
            ("maxResults", "1"),
            ("publishedAfter", published_after.as_str()),
            ("publishedBefore", published_before.as_str()),
        ];
        let results: SearchListResponse = self.call_api("search", &query_params).await?;

        tracing::debug!(
            channel_id,
            returned_items = results.items.len(),
            "searched for newest video in range"
        );
        Ok(results
            .items
            .into_iter()
            .next()
            .and_then(VideoStat::from_search_hit))
    }

    /// Finds the first upload whose publish timestamp falls within the range,
    /// walking the uploads playlist from its beginning.
    ///
    /// Without a range this delegates to [`Self::oldest_video`], including
    /// its swallow-errors behavior. With a range, the playlist is paged until
    /// a matching entry appears and errors do propagate; `Ok(None)` means
    /// pagination genuinely exhausted without a match.
    ///
    /// The uploads playlist is upload-ordered, not guaranteed strictly
    /// chronological, so this returns the first match in collection order
    /// even when a later entry has an earlier timestamp. Counts are `"0"`,
    /// as with [`Self::oldest_video`].
    #[instrument(skip(self))]
    pub async fn oldest_video_in_range(
        &self,
        uploads_playlist_id: &str,
        range: Option<&DateRange>,
    ) -> eyre::Result<Option<VideoStat>> {
        let Some(range) = range else {
            return Ok(self.oldest_video(uploads_playlist_id).await);
        };

        let mut uploads = std::pin::pin!(PagedStream::new(|page_token| async move {
            self.uploads_page_internal(uploads_playlist_id, page_token)
                .await
        }));

        while let Some(video) = uploads.next().await {
            let video = video?;
            if range.contains(video.published_at) {
                return Ok(Some(video));
            }
        }
        Ok(None)
    }

    /// Internal lookup of a channel id by legacy username via `channels.list`
    /// with `forUsername`. `Ok(None)` when no channel claims the name.
    async fn channel_id_for_username_internal(
        &self,
        username: &str,
    ) -> eyre::Result<Option<String>> {
        let query_params = [("part", "id"), ("forUsername", username)];
        let channels: ChannelIdListResponse = self.call_api("channels", &query_params).await?;

        tracing::debug!(
            username,
            returned_items = channels.items.len(),
            "looked up channel by legacy username"
        );
        Ok(channels.items.into_iter().next().map(|item| item.id))
    }

    /// Internal free-text channel search, taking the first hit's channel id.
    async fn channel_id_from_search_internal(&self, query: &str) -> eyre::Result<Option<String>> {
        let query_params = [
            ("part", "id"),
            ("type", "channel"),
            ("q", query),
            ("maxResults", "1"),
        ];
        let results: SearchListResponse = self.call_api("search", &query_params).await?;

        tracing::debug!(
            query,
            returned_items = results.items.len(),
            "searched for channel by free text"
        );
        Ok(results
            .items
            .into_iter()
            .next()
            .and_then(|hit| hit.id.channel_id))
    }

    /// Internal fetch of one date-descending page of a channel's videos:
    /// `search.list` for the ids, `videos.list` to hydrate statistics.
    ///
    /// The hydration call is skipped entirely when the search page is empty.
    async fn videos_page_internal(
        &self,
        channel_id: &str,
        page_size: u32,
        page_token: Option<&str>,
        range: Option<&DateRange>,
    ) -> eyre::Result<VideoPage> {
        let page_size_string = page_size.to_string();
        let mut query_params = vec![
            ("part", "id"),
            ("channelId", channel_id),
            ("type", "video"),
            ("order", "date"),
            ("maxResults", page_size_string.as_str()),
        ];

        let published_after;
        let published_before;
        if let Some(range) = range {
            published_after = range.published_after().to_string();
            published_before = range.published_before().to_string();
            query_params.push(("publishedAfter", published_after.as_str()));
            query_params.push(("publishedBefore", published_before.as_str()));
        }
        if let Some(token) = page_token {
            query_params.push(("pageToken", token));
        }

        let results: SearchListResponse = self.call_api("search", &query_params).await?;
        let next_page_token = results.next_page_token;
        let video_ids: Vec<String> = results
            .items
            .into_iter()
            .filter_map(|hit| hit.id.video_id)
            .collect();

        tracing::debug!(
            channel_id,
            returned_items = video_ids.len(),
            "searched for channel videos"
        );

        if video_ids.is_empty() {
            return Ok(VideoPage::default());
        }

        let videos = self.hydrate_videos_internal(&video_ids).await?;
        Ok(VideoPage {
            videos,
            next_page_token,
        })
    }

    /// Internal statistics hydration for a batch of video ids via one
    /// `videos.list` call. The result preserves the requested id order;
    /// upstream response order is not contractual, and deleted ids simply
    /// drop out.
    async fn hydrate_videos_internal(&self, video_ids: &[String]) -> eyre::Result<Vec<VideoStat>> {
        let joined_ids = video_ids.join(",");
        let query_params = [("part", "snippet,statistics"), ("id", joined_ids.as_str())];
        let response: VideoListResponse = self.call_api("videos", &query_params).await?;

        tracing::debug!(
            requested = video_ids.len(),
            returned_items = response.items.len(),
            "hydrated video statistics"
        );

        let mut by_id: HashMap<String, VideoStat> = response
            .items
            .into_iter()
            .map(|video| (video.id.clone(), VideoStat::from(video)))
            .collect();
        Ok(video_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect())
    }

    /// Internal fetch of one uploads-playlist page as statistic-less
    /// [`VideoStat`]s plus the continuation token.
    async fn uploads_page_internal(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> eyre::Result<(VecDeque<VideoStat>, Option<String>)> {
        let mut query_params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", "50"),
        ];
        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let page: PlaylistItemListResponse = self.call_api("playlistItems", &query_params).await?;

        tracing::debug!(
            playlist_id,
            returned_items = page.items.len(),
            "fetched uploads playlist page"
        );

        let items = page.items.into_iter().map(VideoStat::from).collect();
        Ok((items, page.next_page_token))
    }
}

/// Reduces raw user input to the token worth resolving: strips URL scaffolding
/// (`youtube.com/channel/...`, `/user/...`, `/c/...`, `/@handle`) and a
/// leading `@`. Purely string work; never touches the network.
fn normalize_identifier(input: &str) -> Result<String, ApiError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidIdentifier(input.to_string()));
    }

    let mut candidate = trimmed;
    if let Some(host_start) = candidate.find("youtube.com/") {
        let path = &candidate[host_start + "youtube.com/".len()..];
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        match (segments.next(), segments.next()) {
            (Some("channel"), Some(id)) => candidate = id,
            (Some("user"), Some(name)) => candidate = name,
            (Some("c"), Some(name)) => candidate = name,
            // Bare vanity path or a handle; trailing segments like /videos
            // belong to the page, not the identifier.
            (Some(first), _) => candidate = first,
            (None, _) => return Err(ApiError::InvalidIdentifier(input.to_string())),
        }
    }

    let candidate = candidate.strip_prefix('@').unwrap_or(candidate);
    if candidate.is_empty() {
        return Err(ApiError::InvalidIdentifier(input.to_string()));
    }
    Ok(candidate.to_string())
}

/// Whether a string already has the canonical channel id shape: `UC` plus 22
/// characters from the id alphabet.
fn is_canonical_channel_id(s: &str) -> bool {
    s.len() == 24
        && s.starts_with("UC")
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    const CANONICAL: &str = "UCuAXFkgsw1L7xaCfnd5JJOw";
    const UPLOADS: &str = "UUuAXFkgsw1L7xaCfnd5JJOw";

    fn client_for(server: &mockito::Server, keys: &[&str]) -> YouTubeClient {
        YouTubeClient::with_base_url(
            KeyPool::new(keys.iter().map(|k| k.to_string()).collect()),
            reqwest::Client::new(),
            server.url(),
        )
    }

    fn key_is(key: &str) -> Matcher {
        Matcher::UrlEncoded("key".into(), key.into())
    }

    fn quota_error_body() -> String {
        serde_json::json!({
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [{"reason": "quotaExceeded", "domain": "youtube.quota"}]
            }
        })
        .to_string()
    }

    fn channel_body() -> String {
        serde_json::json!({
            "pageInfo": {"totalResults": 1, "resultsPerPage": 5},
            "items": [{
                "id": CANONICAL,
                "snippet": {
                    "title": "Rick Astley",
                    "description": "Official channel.",
                    "customUrl": "@rickastley",
                    "publishedAt": "2006-02-20T12:00:00Z",
                    "thumbnails": {
                        "default": {"url": "https://yt3.ggpht.com/d.jpg", "width": 88, "height": 88},
                        "medium": {"url": "https://yt3.ggpht.com/m.jpg", "width": 240, "height": 240}
                    }
                },
                "statistics": {
                    "viewCount": "2000000000",
                    "subscriberCount": "4500000",
                    "hiddenSubscriberCount": false,
                    "videoCount": "120"
                },
                "contentDetails": {"relatedPlaylists": {"uploads": UPLOADS}}
            }]
        })
        .to_string()
    }

    fn empty_list_body() -> String {
        serde_json::json!({"pageInfo": {"totalResults": 0, "resultsPerPage": 5}}).to_string()
    }

    fn search_videos_body(ids: &[&str], next_token: Option<&str>) -> String {
        let mut body = serde_json::json!({
            "pageInfo": {"totalResults": ids.len(), "resultsPerPage": 50},
            "items": ids.iter().map(|id| {
                serde_json::json!({"id": {"kind": "youtube#video", "videoId": id}})
            }).collect::<Vec<_>>()
        });
        if let Some(token) = next_token {
            body["nextPageToken"] = serde_json::json!(token);
        }
        body.to_string()
    }

    fn videos_body(items: &[(&str, &str, &str)]) -> String {
        // (id, publishedAt, viewCount)
        serde_json::json!({
            "pageInfo": {"totalResults": items.len(), "resultsPerPage": 50},
            "items": items.iter().map(|(id, published, views)| {
                serde_json::json!({
                    "id": id,
                    "snippet": {
                        "publishedAt": published,
                        "channelId": CANONICAL,
                        "title": format!("video {id}"),
                        "description": "",
                        "channelTitle": "Rick Astley",
                        "thumbnails": {
                            "medium": {"url": format!("https://i.ytimg.com/vi/{id}/mq.jpg"), "width": 320, "height": 180}
                        }
                    },
                    "statistics": {"viewCount": views, "likeCount": "10", "commentCount": "2"}
                })
            }).collect::<Vec<_>>()
        })
        .to_string()
    }

    fn playlist_body(items: &[(&str, &str)], next_token: Option<&str>) -> String {
        // (videoId, publishedAt)
        let mut body = serde_json::json!({
            "pageInfo": {"totalResults": items.len(), "resultsPerPage": 50},
            "items": items.iter().map(|(id, published)| {
                serde_json::json!({
                    "snippet": {
                        "publishedAt": published,
                        "title": format!("video {id}"),
                        "description": "",
                        "thumbnails": {},
                        "resourceId": {"kind": "youtube#video", "videoId": id}
                    }
                })
            }).collect::<Vec<_>>()
        });
        if let Some(token) = next_token {
            body["nextPageToken"] = serde_json::json!(token);
        }
        body.to_string()
    }

    #[test]
    fn identifiers_normalize_to_the_resolvable_token() {
        for (input, want) in [
            ("UCuAXFkgsw1L7xaCfnd5JJOw", CANONICAL),
            ("  @MrBeast ", "MrBeast"),
            ("https://www.youtube.com/@MrBeast?si=abc123", "MrBeast"),
            ("https://www.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw", CANONICAL),
            ("https://m.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw/videos", CANONICAL),
            ("youtube.com/user/OldSchoolName", "OldSchoolName"),
            ("youtube.com/c/SomeVanity/", "SomeVanity"),
            ("Plain Query", "Plain Query"),
        ] {
            assert_eq!(normalize_identifier(input).unwrap(), want, "for {input:?}");
        }
    }

    #[test]
    fn unusable_identifiers_are_rejected_before_any_network() {
        for input in ["", "   ", "https://www.youtube.com/", "@"] {
            let err = normalize_identifier(input).unwrap_err();
            assert!(
                matches!(err, ApiError::InvalidIdentifier(_)),
                "for {input:?}: {err}"
            );
        }
    }

    #[test]
    fn canonical_shape_requires_uc_prefix_and_id_alphabet() {
        assert!(is_canonical_channel_id("UCuAXFkgsw1L7xaCfnd5JJOw"));
        assert!(is_canonical_channel_id("UC-lHJZR3Gqxm24_Vd_AJ5Yw"));
        // wrong length
        assert!(!is_canonical_channel_id("UCuAXFkgsw1L7x"));
        // wrong prefix
        assert!(!is_canonical_channel_id("UUuAXFkgsw1L7xaCfnd5JJOw"));
        // character outside the id alphabet
        assert!(!is_canonical_channel_id("UCuAXFkgsw1L7xaCfnd5JJO!"));
    }

    #[tokio::test]
    async fn canonical_id_resolves_with_zero_network_calls() {
        let mut server = mockito::Server::new_async().await;
        let untouched = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let resolved = client.resolve_channel_id(CANONICAL).await.unwrap();
        assert_eq!(resolved, CANONICAL);
        untouched.assert_async().await;
    }

    #[tokio::test]
    async fn empty_pool_fails_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let untouched = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let client = client_for(&server, &[]);

        let err = client.channel_stats(CANONICAL).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NoKeysConfigured)
        ));
        untouched.assert_async().await;
    }

    #[tokio::test]
    async fn quota_rotation_tries_every_key_exactly_once() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/channels")
            .match_query(key_is("k1"))
            .with_status(403)
            .with_body(quota_error_body())
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/channels")
            .match_query(key_is("k2"))
            .with_status(403)
            .with_body(quota_error_body())
            .expect(1)
            .create_async()
            .await;
        let client = client_for(&server, &["k1", "k2"]);

        let err = client.channel_stats(CANONICAL).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::AllKeysExhausted { pool_size: 2 })
        ));
        // exactly one attempt per key, never more
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn quota_failover_succeeds_on_the_next_key() {
        let mut server = mockito::Server::new_async().await;
        let exhausted = server
            .mock("GET", "/channels")
            .match_query(key_is("k1"))
            .with_status(403)
            .with_body(quota_error_body())
            .expect(1)
            .create_async()
            .await;
        let healthy = server
            .mock("GET", "/channels")
            .match_query(key_is("k2"))
            .with_status(200)
            .with_body(channel_body())
            .expect(1)
            .create_async()
            .await;
        let client = client_for(&server, &["k1", "k2"]);

        let stats = client.channel_stats(CANONICAL).await.unwrap();
        assert_eq!(stats.title, "Rick Astley");
        exhausted.assert_async().await;
        healthy.assert_async().await;
    }

    #[tokio::test]
    async fn single_key_pool_exhausts_after_one_attempt() {
        let mut server = mockito::Server::new_async().await;
        let only = server
            .mock("GET", "/channels")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(quota_error_body())
            .expect(1)
            .create_async()
            .await;
        let client = client_for(&server, &["solo"]);

        let err = client.channel_stats(CANONICAL).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::AllKeysExhausted { pool_size: 1 })
        ));
        only.assert_async().await;
    }

    #[tokio::test]
    async fn non_quota_rejection_fails_without_rotation() {
        let mut server = mockito::Server::new_async().await;
        let rejected = server
            .mock("GET", "/channels")
            .match_query(key_is("k1"))
            .with_status(400)
            .with_body(
                serde_json::json!({
                    "error": {
                        "message": "The request specifies an invalid filter parameter.",
                        "errors": [{"reason": "invalidFilters"}]
                    }
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let spare = server
            .mock("GET", "/channels")
            .match_query(key_is("k2"))
            .expect(0)
            .create_async()
            .await;
        let client = client_for(&server, &["k1", "k2"]);

        let err = client.channel_stats(CANONICAL).await.unwrap_err();
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::RequestFailed { status, message }) => {
                assert_eq!(*status, 400);
                assert_eq!(message, "The request specifies an invalid filter parameter.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        rejected.assert_async().await;
        spare.assert_async().await;
    }

    #[tokio::test]
    async fn transport_failure_surfaces_the_transport_error() {
        // Nothing listens on port 1, so every attempt fails before HTTP.
        let client = YouTubeClient::with_base_url(
            KeyPool::new(vec!["k1".into(), "k2".into()]),
            reqwest::Client::new(),
            "http://127.0.0.1:1",
        );

        let err = client.channel_stats(CANONICAL).await.unwrap_err();
        // The transport error is re-raised as itself once the pool is spent,
        // not rebranded as a quota problem.
        assert!(err.downcast_ref::<ApiError>().is_none(), "{err:?}");
    }

    #[tokio::test]
    async fn configure_keys_resets_rotation_to_the_first_key() {
        let mut server = mockito::Server::new_async().await;
        let before = server
            .mock("GET", "/channels")
            .match_query(key_is("k1"))
            .with_status(200)
            .with_body(channel_body())
            .expect(1)
            .create_async()
            .await;
        let after = server
            .mock("GET", "/channels")
            .match_query(key_is("fresh"))
            .with_status(200)
            .with_body(channel_body())
            .expect(2)
            .create_async()
            .await;
        let client = client_for(&server, &["k1", "k2"]);

        client.channel_stats(CANONICAL).await.unwrap();
        client.configure_keys(vec!["fresh".into()]).await;
        // Both calls after the swap use the new pool's first key.
        client.channel_stats(CANONICAL).await.unwrap();
        client.channel_stats(CANONICAL).await.unwrap();

        before.assert_async().await;
        after.assert_async().await;
    }

    #[tokio::test]
    async fn username_miss_falls_back_to_search() {
        let mut server = mockito::Server::new_async().await;
        let by_username = server
            .mock("GET", "/channels")
            .match_query(Matcher::UrlEncoded("forUsername".into(), "somehandle".into()))
            .with_status(200)
            .with_body(empty_list_body())
            .expect(1)
            .create_async()
            .await;
        let by_search = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "channel".into()),
                Matcher::UrlEncoded("q".into(), "somehandle".into()),
            ]))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "pageInfo": {"totalResults": 1, "resultsPerPage": 1},
                    "items": [{"id": {"kind": "youtube#channel", "channelId": CANONICAL}}]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let resolved = client.resolve_channel_id("@somehandle").await.unwrap();
        assert_eq!(resolved, CANONICAL);
        by_username.assert_async().await;
        by_search.assert_async().await;
    }

    #[tokio::test]
    async fn username_lookup_failure_is_swallowed_and_search_decides() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/channels")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error": {"message": "Backend Error", "errors": [{"reason": "backendError"}]}}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "pageInfo": {"totalResults": 1, "resultsPerPage": 1},
                    "items": [{"id": {"kind": "youtube#channel", "channelId": CANONICAL}}]
                })
                .to_string(),
            )
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let resolved = client.resolve_channel_id("somehandle").await.unwrap();
        assert_eq!(resolved, CANONICAL);
    }

    #[tokio::test]
    async fn unresolvable_identifier_is_channel_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/channels")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(empty_list_body())
            .create_async()
            .await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(empty_list_body())
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let err = client.resolve_channel_id("no such channel").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::ChannelNotFound(_))
        ));
    }

    #[tokio::test]
    async fn channel_stats_zero_items_is_channel_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/channels")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(empty_list_body())
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let err = client.channel_stats(CANONICAL).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::ChannelNotFound(_))
        ));
    }

    #[tokio::test]
    async fn channel_stats_maps_the_wire_fields() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/channels")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("part".into(), "snippet,statistics,contentDetails".into()),
                Matcher::UrlEncoded("id".into(), CANONICAL.into()),
            ]))
            .with_status(200)
            .with_body(channel_body())
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let stats = client.channel_stats(CANONICAL).await.unwrap();
        assert_eq!(stats.channel_id, CANONICAL);
        assert_eq!(stats.title, "Rick Astley");
        assert_eq!(stats.custom_url.as_deref(), Some("@rickastley"));
        assert_eq!(stats.subscriber_count, "4500000");
        assert_eq!(stats.uploads_playlist, UPLOADS);
        // medium rendition wins over default
        assert_eq!(stats.thumbnail.as_deref(), Some("https://yt3.ggpht.com/m.jpg"));
    }

    #[tokio::test]
    async fn empty_search_page_skips_the_hydration_call() {
        let mut server = mockito::Server::new_async().await;
        let search = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(empty_list_body())
            .expect(1)
            .create_async()
            .await;
        let hydration = server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let page = client.channel_videos(CANONICAL, 10, None).await.unwrap();
        assert_eq!(page, VideoPage::default());
        search.assert_async().await;
        hydration.assert_async().await;
    }

    #[tokio::test]
    async fn channel_videos_hydrates_in_search_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("channelId".into(), CANONICAL.into()),
                Matcher::UrlEncoded("order".into(), "date".into()),
                Matcher::UrlEncoded("type".into(), "video".into()),
                Matcher::UrlEncoded("maxResults".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(search_videos_body(&["newer-vid00", "older-vid00"], Some("NEXT")))
            .create_async()
            .await;
        server
            .mock("GET", "/videos")
            .match_query(Matcher::UrlEncoded(
                "id".into(),
                "newer-vid00,older-vid00".into(),
            ))
            .with_status(200)
            // upstream answer order differs from the requested id order
            .with_body(videos_body(&[
                ("older-vid00", "2024-01-01T00:00:00Z", "50"),
                ("newer-vid00", "2024-02-01T00:00:00Z", "99"),
            ]))
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let page = client.channel_videos(CANONICAL, 2, None).await.unwrap();
        let ids: Vec<_> = page.videos.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["newer-vid00", "older-vid00"]);
        assert_eq!(page.next_page_token.as_deref(), Some("NEXT"));
        assert_eq!(page.videos[0].view_count, "99");
    }

    #[tokio::test]
    async fn oldest_video_sorts_the_first_page_and_stops_there() {
        let mut server = mockito::Server::new_async().await;
        let first_page = server
            .mock("GET", "/playlistItems")
            .match_query(Matcher::UrlEncoded("playlistId".into(), UPLOADS.into()))
            .with_status(200)
            // loosely ordered page, and a token that must not be followed
            .with_body(playlist_body(
                &[
                    ("mid00000000", "2011-06-01T00:00:00Z"),
                    ("early0000000", "2010-01-01T00:00:00Z"),
                    ("late00000000", "2012-03-01T00:00:00Z"),
                ],
                Some("MORE"),
            ))
            .expect(1)
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let oldest = client.oldest_video(UPLOADS).await.unwrap();
        assert_eq!(oldest.video_id, "early0000000");
        assert_eq!(oldest.view_count, "0");
        assert_eq!(oldest.like_count, "0");
        first_page.assert_async().await;
    }

    #[tokio::test]
    async fn oldest_video_swallows_fetch_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/playlistItems")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error": {"message": "Backend Error", "errors": [{"reason": "backendError"}]}}"#)
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        assert_eq!(client.oldest_video(UPLOADS).await, None);
    }

    #[tokio::test]
    async fn oldest_in_range_takes_the_first_match_in_collection_order() {
        let range = DateRange::parse("2024-02-01", "2024-02-28").unwrap();
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/playlistItems")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(playlist_body(
                &[
                    ("out-of-range1", "2024-05-01T00:00:00Z"),
                    ("out-of-range2", "2023-01-01T00:00:00Z"),
                    ("first-match0", "2024-02-10T00:00:00Z"),
                    // in range and chronologically earlier, but later in
                    // collection order, so it must lose
                    ("earlier-match", "2024-02-05T00:00:00Z"),
                ],
                None,
            ))
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let found = client
            .oldest_video_in_range(UPLOADS, Some(&range))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.video_id, "first-match0");
    }

    #[tokio::test]
    async fn oldest_in_range_pages_until_a_match_appears() {
        let range = DateRange::parse("2020-01-01", "2020-12-31").unwrap();
        let mut server = mockito::Server::new_async().await;
        // Page calls rotate keys, so each page can pin its own key.
        let first_page = server
            .mock("GET", "/playlistItems")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("playlistId".into(), UPLOADS.into()),
                key_is("k1"),
            ]))
            .with_status(200)
            .with_body(playlist_body(
                &[("recent000000", "2024-01-01T00:00:00Z")],
                Some("PAGE2"),
            ))
            .expect(1)
            .create_async()
            .await;
        let second_page = server
            .mock("GET", "/playlistItems")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pageToken".into(), "PAGE2".into()),
                key_is("k2"),
            ]))
            .with_status(200)
            .with_body(playlist_body(
                &[("in-range0000", "2020-06-15T00:00:00Z")],
                None,
            ))
            .expect(1)
            .create_async()
            .await;
        let client = client_for(&server, &["k1", "k2"]);

        let found = client
            .oldest_video_in_range(UPLOADS, Some(&range))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.video_id, "in-range0000");
        first_page.assert_async().await;
        second_page.assert_async().await;
    }

    #[tokio::test]
    async fn oldest_in_range_exhausting_the_playlist_is_none_not_an_error() {
        let range = DateRange::parse("1999-01-01", "1999-12-31").unwrap();
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/playlistItems")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(playlist_body(&[("only00000000", "2024-01-01T00:00:00Z")], None))
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let found = client
            .oldest_video_in_range(UPLOADS, Some(&range))
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn oldest_in_range_with_a_range_propagates_failures() {
        let range = DateRange::parse("2020-01-01", "2020-12-31").unwrap();
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/playlistItems")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error": {"message": "Backend Error", "errors": [{"reason": "backendError"}]}}"#)
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        // Unlike the rangeless path, this must not turn a failure into None.
        assert!(client
            .oldest_video_in_range(UPLOADS, Some(&range))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn oldest_in_range_without_a_range_delegates_to_first_page_behavior() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/playlistItems")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(playlist_body(
                &[
                    ("second000000", "2011-01-01T00:00:00Z"),
                    ("first0000000", "2010-01-01T00:00:00Z"),
                ],
                None,
            ))
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let found = client.oldest_video_in_range(UPLOADS, None).await.unwrap();
        assert_eq!(found.unwrap().video_id, "first0000000");
    }

    #[tokio::test]
    async fn range_aggregation_sums_views_across_every_page() {
        let range = DateRange::parse("2024-01-01", "2024-03-31").unwrap();
        let mut server = mockito::Server::new_async().await;
        // Sequential calls rotate through the pool deterministically:
        // search (k1), videos (k2), search (k3), videos (k4).
        let search_page_1 = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("publishedAfter".into(), "2024-01-01T00:00:00Z".into()),
                Matcher::UrlEncoded("publishedBefore".into(), "2024-03-31T23:59:59Z".into()),
                Matcher::UrlEncoded("maxResults".into(), "50".into()),
                key_is("k1"),
            ]))
            .with_status(200)
            .with_body(search_videos_body(&["vid-a0000000", "vid-b0000000"], Some("PAGE2")))
            .expect(1)
            .create_async()
            .await;
        let videos_page_1 = server
            .mock("GET", "/videos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("id".into(), "vid-a0000000,vid-b0000000".into()),
                key_is("k2"),
            ]))
            .with_status(200)
            .with_body(videos_body(&[
                ("vid-a0000000", "2024-01-10T00:00:00Z", "10"),
                ("vid-b0000000", "2024-02-10T00:00:00Z", "20"),
            ]))
            .expect(1)
            .create_async()
            .await;
        let search_page_2 = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pageToken".into(), "PAGE2".into()),
                key_is("k3"),
            ]))
            .with_status(200)
            .with_body(search_videos_body(&["vid-c0000000"], None))
            .expect(1)
            .create_async()
            .await;
        let videos_page_2 = server
            .mock("GET", "/videos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("id".into(), "vid-c0000000".into()),
                key_is("k4"),
            ]))
            .with_status(200)
            .with_body(videos_body(&[("vid-c0000000", "2024-03-01T00:00:00Z", "5")]))
            .expect(1)
            .create_async()
            .await;
        let client = client_for(&server, &["k1", "k2", "k3", "k4"]);

        let totals = client
            .channel_stats_for_range(CANONICAL, &range)
            .await
            .unwrap();
        assert_eq!(
            totals,
            RangeStats {
                view_count: 35,
                video_count: 3
            }
        );
        search_page_1.assert_async().await;
        videos_page_1.assert_async().await;
        search_page_2.assert_async().await;
        videos_page_2.assert_async().await;
    }

    #[tokio::test]
    async fn newest_without_range_reuses_the_hydrated_video_path() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("maxResults".into(), "1".into()),
                Matcher::UrlEncoded("order".into(), "date".into()),
            ]))
            .with_status(200)
            .with_body(search_videos_body(&["newest000000"], Some("unused")))
            .create_async()
            .await;
        server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(videos_body(&[("newest000000", "2024-06-01T00:00:00Z", "777")]))
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let newest = client
            .newest_video_in_range(CANONICAL, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(newest.video_id, "newest000000");
        // the rangeless path hydrates, so counts are real
        assert_eq!(newest.view_count, "777");
    }

    #[tokio::test]
    async fn newest_with_range_is_a_single_bounded_search() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        let mut server = mockito::Server::new_async().await;
        let search = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("part".into(), "snippet".into()),
                Matcher::UrlEncoded("maxResults".into(), "1".into()),
                Matcher::UrlEncoded("publishedAfter".into(), "2024-01-01T00:00:00Z".into()),
                Matcher::UrlEncoded("publishedBefore".into(), "2024-01-31T23:59:59Z".into()),
            ]))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "pageInfo": {"totalResults": 1, "resultsPerPage": 1},
                    "items": [{
                        "id": {"kind": "youtube#video", "videoId": "in-range0000"},
                        "snippet": {
                            "publishedAt": "2024-01-20T00:00:00Z",
                            "channelId": CANONICAL,
                            "title": "January upload",
                            "description": "",
                            "channelTitle": "Rick Astley"
                        }
                    }]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let hydration = server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let newest = client
            .newest_video_in_range(CANONICAL, Some(&range))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(newest.video_id, "in-range0000");
        // search results carry no statistics
        assert_eq!(newest.view_count, "0");
        search.assert_async().await;
        hydration.assert_async().await;
    }

    #[tokio::test]
    async fn newest_with_range_and_no_uploads_is_none() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(empty_list_body())
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let newest = client
            .newest_video_in_range(CANONICAL, Some(&range))
            .await
            .unwrap();
        assert_eq!(newest, None);
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/channels")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("definitely not json")
            .create_async()
            .await;
        let client = client_for(&server, &["k1"]);

        let err = client.channel_stats(CANONICAL).await.unwrap_err();
        assert!(err.downcast_ref::<ApiError>().is_none());
    }
}
