//! Error types for the YouTube API access layer.

use serde::Deserialize;
use thiserror::Error;

/// Reasons in the upstream error envelope that mean the presenting API key has
/// exhausted its call budget and the next key in the pool should be tried.
///
/// See: <https://developers.google.com/youtube/v3/docs/errors>
const QUOTA_REASONS: [&str; 2] = ["quotaExceeded", "dailyLimitExceeded"];

/// Failures produced by the API access layer itself.
///
/// Everything here can be recovered from an [`eyre::Report`] with
/// `report.downcast_ref::<ApiError>()`, so callers that care about a specific
/// kind (a settings screen reacting to `NoKeysConfigured`, say) can still get
/// at it after the error has travelled through context layers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The key pool is empty; no request can even be attempted.
    #[error("no YouTube API keys configured")]
    NoKeysConfigured,
    /// Every key in the pool was rejected with a quota-class reason within a
    /// single logical call.
    #[error("all {pool_size} configured YouTube API keys are out of quota")]
    AllKeysExhausted {
        /// Size of the pool at the time of the call, i.e. how many keys were
        /// tried before giving up.
        pool_size: usize,
    },
    /// The upstream API rejected the request for a non-quota reason.
    ///
    /// The message is passed through from the upstream error envelope so the
    /// caller sees what YouTube actually complained about.
    #[error("YouTube API request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },
    /// Neither the username lookup nor the free-text search produced a channel
    /// for the given input.
    #[error("no channel found for {0:?}")]
    ChannelNotFound(String),
    /// The user-supplied identifier could not be reduced to anything worth
    /// sending upstream. Detected before any network call.
    #[error("cannot extract a channel identifier from {0:?}")]
    InvalidIdentifier(String),
}

/// The structured error payload the YouTube Data API returns on non-success
/// responses: `{"error": {"message": ..., "errors": [{"reason": ...}]}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

/// What the fetcher learned from a non-success upstream response body.
#[derive(Debug)]
pub(crate) struct UpstreamFailure {
    /// Human-readable message, taken from the envelope when the body parses
    /// as one and from the raw body otherwise.
    pub(crate) message: String,
    /// Whether any of the envelope's reasons is quota-class.
    pub(crate) quota_exhausted: bool,
}

impl UpstreamFailure {
    /// Interprets a non-success response body.
    ///
    /// Bodies that do not match the documented envelope shape (HTML error
    /// pages from intermediaries, truncated responses) are tolerated: the raw
    /// body becomes the message and the failure is treated as non-quota.
    pub(crate) fn from_body(body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let quota_exhausted = envelope.error.errors.iter().any(|detail| {
                    detail
                        .reason
                        .as_deref()
                        .is_some_and(|reason| QUOTA_REASONS.contains(&reason))
                });
                Self {
                    message: envelope.error.message,
                    quota_exhausted,
                }
            }
            Err(_) => Self {
                message: body.to_string(),
                quota_exhausted: false,
            },
        }
    }
}
