//! Shared wire types and the paging infrastructure for the YouTube API client.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio_stream::Stream;

type PendingPage<'a, F, T> =
    Pin<Box<dyn Future<Output = eyre::Result<(F, (VecDeque<T>, Option<String>))>> + 'a + Send>>;

/// A stream over a paginated YouTube list endpoint that fetches follow-up
/// pages on demand.
///
/// Items are yielded one by one; when the buffered page runs out and the
/// previous response carried a `nextPageToken`, the fetcher closure is invoked
/// with that token to produce the next page. Only forward pagination is
/// supported, which is all the upstream API offers anyway.
///
/// The uploads-playlist scan uses this to walk a channel's collection from the
/// start without the caller ever seeing a page token.
pub struct PagedStream<'a, T, F> {
    /// Items from the most recently fetched page that have not been yielded.
    buffered: VecDeque<T>,
    /// The in-flight page request, if one has been started.
    in_flight: Option<PendingPage<'a, F, T>>,
    /// Set once a page arrives without a continuation token, or on error.
    exhausted: bool,
}

impl<'a, T, F> PagedStream<'a, T, F> {
    /// Creates a stream that immediately schedules the first page (fetcher
    /// called with `None`) and thereafter passes each `nextPageToken` back in.
    pub fn new<Fut>(fetcher: F) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = eyre::Result<(VecDeque<T>, Option<String>)>> + Send + 'a,
    {
        // The fetcher travels through the future so the next page's future can
        // be constructed from the previous one's output without cloning F.
        let first_page = async move {
            let page = fetcher(None).await?;
            Ok((fetcher, page))
        };
        Self {
            buffered: VecDeque::new(),
            in_flight: Some(Box::pin(first_page)),
            exhausted: false,
        }
    }
}

impl<'a, T: Unpin, F> Unpin for PagedStream<'a, T, F> {}

impl<'a, T: Unpin, F, Fut> Stream for PagedStream<'a, T, F>
where
    F: Fn(Option<String>) -> Fut,
    F: Send + 'a,
    Fut: Future<Output = eyre::Result<(VecDeque<T>, Option<String>)>> + Send + 'a,
{
    type Item = eyre::Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(item) = self.buffered.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if self.exhausted {
                return Poll::Ready(None);
            }

            let Some(in_flight) = self.in_flight.as_mut() else {
                self.exhausted = true;
                return Poll::Ready(None);
            };

            match in_flight.as_mut().poll(cx) {
                Poll::Ready(Ok((fetcher, (items, next_token)))) => {
                    self.buffered.extend(items);

                    if let Some(next_token) = next_token {
                        // Queue up the next page but do not poll it yet; it
                        // only runs if the consumer drains this page.
                        self.in_flight = Some(Box::pin(async move {
                            let page = fetcher(Some(next_token)).await?;
                            Ok((fetcher, page))
                        }));
                    } else {
                        self.exhausted = true;
                        self.in_flight = None;
                    }
                    // Loop back around to yield from the refilled buffer (an
                    // empty page with a token just fetches the next one).
                }
                Poll::Ready(Err(e)) => {
                    self.in_flight = None;
                    self.exhausted = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Paging details attached to every list response.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Serialize, Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set. For `search.list` this
    /// is an upstream approximation, not an exact count.
    #[serde(rename = "totalResults")]
    pub total_results: u32,
    /// The number of results included in this response.
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: u32,
}

/// The set of thumbnail renditions attached to a channel or video snippet.
///
/// Upstream offers more sizes (`standard`, `maxres`) but they are frequently
/// absent; the three below are the ones every resource carries in practice.
///
/// See: <https://developers.google.com/youtube/v3/docs/thumbnails>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

impl Thumbnails {
    /// The URL the dashboard should display: medium when available (default is
    /// too coarse for cards), otherwise whatever rendition exists.
    pub fn preferred_url(&self) -> Option<&str> {
        [&self.medium, &self.default, &self.high]
            .into_iter()
            .find_map(|t| t.as_ref().map(|t| t.url.as_str()))
    }
}

/// A single thumbnail rendition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
