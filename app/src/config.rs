//! Runtime configuration from the environment, with `.env` support.

use std::str::FromStr;

use channel_analytics::AnalyticsConfig;

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Load .env from the first candidate path that exists.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or invalid values keep defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut analytics = AnalyticsConfig::default();

        analytics.page_size = parse_or(&get, "CHANNEL_STATS_PAGE_SIZE", analytics.page_size);
        analytics.batch_size = parse_or(&get, "CHANNEL_STATS_BATCH_SIZE", analytics.batch_size);
        analytics.search_candidates = parse_or(
            &get,
            "CHANNEL_STATS_SEARCH_CANDIDATES",
            analytics.search_candidates,
        );
        analytics.top_playlists =
            parse_or(&get, "CHANNEL_STATS_TOP_PLAYLISTS", analytics.top_playlists);
        analytics.playlist_item_limit = parse_or(
            &get,
            "CHANNEL_STATS_PLAYLIST_ITEM_LIMIT",
            analytics.playlist_item_limit,
        );
        if let Some(windows) = get("CHANNEL_STATS_WINDOWS").and_then(|v| parse_windows(&v)) {
            analytics.windows = windows;
        }

        let ttl = &mut analytics.ttl;
        ttl.resolve_secs = parse_or(&get, "CHANNEL_STATS_TTL_RESOLVE", ttl.resolve_secs);
        ttl.summary_secs = parse_or(&get, "CHANNEL_STATS_TTL_SUMMARY", ttl.summary_secs);
        ttl.playlists_secs = parse_or(&get, "CHANNEL_STATS_TTL_PLAYLISTS", ttl.playlists_secs);
        ttl.recent_videos_secs = parse_or(
            &get,
            "CHANNEL_STATS_TTL_RECENT_VIDEOS",
            ttl.recent_videos_secs,
        );
        ttl.video_stats_secs =
            parse_or(&get, "CHANNEL_STATS_TTL_VIDEO_STATS", ttl.video_stats_secs);
        ttl.playlist_items_secs = parse_or(
            &get,
            "CHANNEL_STATS_TTL_PLAYLIST_ITEMS",
            ttl.playlist_items_secs,
        );

        Self {
            api_key: get(API_KEY_VAR).filter(|v| !v.trim().is_empty()),
            analytics,
        }
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
{
    let Some(raw) = get(key) else {
        return default;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(key, value = raw, "Invalid setting value, using default");
        default
    })
}

/// Comma-separated day counts, e.g. `7,28,90`. `None` if empty or malformed.
fn parse_windows(raw: &str) -> Option<Vec<u32>> {
    let windows: Result<Vec<u32>, _> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect();
    match windows {
        Ok(windows) if !windows.is_empty() => Some(windows),
        Ok(_) => None,
        Err(_) => {
            tracing::warn!(value = raw, "Invalid CHANNEL_STATS_WINDOWS, using default");
            None
        }
    }
}
