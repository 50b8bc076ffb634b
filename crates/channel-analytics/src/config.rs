//! Tunables for the aggregation pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use youtube_client::MAX_RESULTS;

/// Per-operation cache lifetimes, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheTtls {
    pub resolve_secs: u64,
    pub summary_secs: u64,
    pub playlists_secs: u64,
    pub recent_videos_secs: u64,
    pub video_stats_secs: u64,
    pub playlist_items_secs: u64,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            resolve_secs: 3600,
            summary_secs: 3600,
            playlists_secs: 1800,
            recent_videos_secs: 900,
            video_stats_secs: 1800,
            playlist_items_secs: 300,
        }
    }
}

impl CacheTtls {
    pub fn resolve(&self) -> Duration {
        Duration::from_secs(self.resolve_secs)
    }

    pub fn summary(&self) -> Duration {
        Duration::from_secs(self.summary_secs)
    }

    pub fn playlists(&self) -> Duration {
        Duration::from_secs(self.playlists_secs)
    }

    pub fn recent_videos(&self) -> Duration {
        Duration::from_secs(self.recent_videos_secs)
    }

    pub fn video_stats(&self) -> Duration {
        Duration::from_secs(self.video_stats_secs)
    }

    pub fn playlist_items(&self) -> Duration {
        Duration::from_secs(self.playlist_items_secs)
    }
}

/// Pipeline configuration. Out-of-range sizes are clamped on use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// `maxResults` for every paginated listing.
    pub page_size: u32,
    /// Ids per `videos.list` call.
    pub batch_size: usize,
    /// Candidates requested by the free-text channel search.
    pub search_candidates: u32,
    /// Activity windows, in days, computed by a full report.
    pub windows: Vec<u32>,
    /// Playlists kept in a report, largest first.
    pub top_playlists: usize,
    /// Default cap for playlist expansion.
    pub playlist_item_limit: usize,
    pub ttl: CacheTtls,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            page_size: MAX_RESULTS,
            batch_size: MAX_RESULTS as usize,
            search_candidates: 3,
            windows: vec![10, 30],
            top_playlists: 5,
            playlist_item_limit: 100,
            ttl: CacheTtls::default(),
        }
    }
}

impl AnalyticsConfig {
    pub fn page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_RESULTS)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.clamp(1, MAX_RESULTS as usize)
    }

    pub fn search_candidates(&self) -> u32 {
        self.search_candidates.clamp(1, 3)
    }
}
