//! Channel statistics acquisition and aggregation.
//!
//! Resolves a loosely specified channel reference, pulls the channel
//! snapshot, playlists and recently published videos through a TTL cache,
//! and derives windowed and ratio metrics from the raw counters. Remote
//! failures degrade to partial data; only a missing API key is fatal.

pub mod cache;
pub mod config;
pub mod gateway;
pub mod metrics;
pub mod pagination;
pub mod ratios;
pub mod resolver;
pub mod service;
pub mod stats;
pub mod window;

#[cfg(test)]
mod testing;

pub use cache::{CacheKey, CredentialId, TtlCache};
pub use config::{AnalyticsConfig, CacheTtls};
pub use gateway::{ClientRegistry, validate_credential};
pub use metrics::{TopItem, WindowMetrics, aggregate};
pub use pagination::{Collected, PageRequest, fetch_all};
pub use ratios::{DerivedMetrics, RatioInputs, get_ratios, months_active, ratio};
pub use resolver::{ChannelInput, Resolution};
pub use service::{ChannelAnalytics, ChannelReport, PlaylistSet, WindowReport};
pub use stats::{BatchStats, get_stats};
pub use window::TimeWindow;

pub use youtube_client::{
    ApiKey, ChannelSummary, PlaylistItem, PlaylistMeta, VideoStat, YoutubeApi, YoutubeApiClient,
    YoutubeError,
};

/// Errors that stop an aggregation pass before it starts.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Api(#[from] YoutubeError),
}
