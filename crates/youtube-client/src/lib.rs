//! YouTube Data API v3 client library.
//!
//! Provides keyed access to the channel, playlist, search and video
//! endpoints used for channel statistics, plus the [`YoutubeApi`] trait
//! that callers are written against.

pub mod api;

use std::fmt;

pub use api::{
    ChannelSummary, MAX_RESULTS, Page, PlaylistItem, PlaylistMeta, VideoStat, YoutubeApi,
    YoutubeApiClient, parse_timestamp, watch_url,
};

/// Data API key.
///
/// The raw value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting empty or whitespace-only values.
    pub fn new(key: impl Into<String>) -> Result<Self, YoutubeError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(YoutubeError::MissingCredential);
        }
        Ok(Self(key))
    }

    /// The raw key, for request signing and fingerprinting only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Unified error type for the youtube-client crate.
#[derive(Debug, thiserror::Error)]
pub enum YoutubeError {
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("YouTube API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("API key is missing or empty")]
    MissingCredential,
}

impl From<reqwest::Error> for YoutubeError {
    /// Request URLs carry the API key as a query parameter, so it is
    /// stripped before the error can reach logs or output.
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_rejects_blank_values() {
        assert!(matches!(ApiKey::new(""), Err(YoutubeError::MissingCredential)));
        assert!(matches!(ApiKey::new("   "), Err(YoutubeError::MissingCredential)));
    }

    #[test]
    fn api_key_is_trimmed_and_masked() {
        let key = ApiKey::new("  AIza-secret \n").unwrap();
        assert_eq!(key.expose(), "AIza-secret");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }
}
