//! Cached entry points consumed by presentation and export layers.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use youtube_client::{
    ApiKey, ChannelSummary, PlaylistItem, PlaylistMeta, YoutubeApi, YoutubeApiClient,
};

use crate::cache::{CacheKey, CredentialId, TtlCache};
use crate::config::AnalyticsConfig;
use crate::gateway::{ClientRegistry, validate_credential};
use crate::metrics::{WindowMetrics, aggregate};
use crate::pagination::{Collected, fetch_playlist_items, fetch_playlists, fetch_video_ids_since};
use crate::ratios::{get_ratios, months_active, ratio};
use crate::resolver::{ChannelInput, Resolution, search_channel};
use crate::stats::{BatchStats, get_stats};
use crate::window::TimeWindow;
use crate::AnalyticsError;

/// A channel's playlists, largest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistSet {
    pub playlists: Vec<PlaylistMeta>,
    /// False when a page failed and the list may be short.
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReport {
    pub window_days: u32,
    pub metrics: WindowMetrics,
}

/// Result of one full aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelReport {
    pub channel_id: String,
    pub summary: ChannelSummary,
    pub months_active: Option<f64>,
    pub windows: Vec<WindowReport>,
    pub playlist_count: usize,
    pub top_playlists: Vec<PlaylistMeta>,
    pub playlists_complete: bool,
    /// Derived ratios keyed by name.
    pub ratios: BTreeMap<&'static str, f64>,
    /// Views of videos published in the longest window per subscriber, 5 places.
    pub views_per_subscriber_longest_window: f64,
}

/// Aggregation front end bound to one client and credential.
pub struct ChannelAnalytics<A: ?Sized = YoutubeApiClient> {
    api: Arc<A>,
    credential: CredentialId,
    cache: Arc<TtlCache>,
    config: AnalyticsConfig,
}

impl ChannelAnalytics<YoutubeApiClient> {
    /// Validate `credential` and take its pooled client from `registry`.
    pub fn connect(
        registry: &ClientRegistry,
        credential: Option<&str>,
        cache: Arc<TtlCache>,
        config: AnalyticsConfig,
    ) -> Result<Self, AnalyticsError> {
        let key = validate_credential(credential)?;
        let api = registry.client_for(&key);
        Ok(Self::new(api, &key, cache, config))
    }
}

impl<A> ChannelAnalytics<A>
where
    A: YoutubeApi + ?Sized,
{
    pub fn new(
        api: Arc<A>,
        credential: &ApiKey,
        cache: Arc<TtlCache>,
        config: AnalyticsConfig,
    ) -> Self {
        Self {
            api,
            credential: CredentialId::of(credential),
            cache,
            config,
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    fn key(&self, operation: &'static str) -> CacheKey {
        CacheKey::new(operation, &self.credential)
    }

    /// Canonical channel id for free-form input, or `None` if not found.
    pub async fn resolve(&self, input: &str) -> Option<String> {
        let query = match ChannelInput::parse(input) {
            ChannelInput::Empty => return None,
            ChannelInput::ChannelId(id) => return Some(id),
            ChannelInput::Query(query) => query,
        };

        let api = self.api.as_ref();
        let candidates = self.config.search_candidates();
        let text = query.as_str();
        let resolution = self
            .cache
            .get_or_compute_if(
                self.key("resolve").arg(text),
                self.config.ttl.resolve(),
                move || async move {
                    Ok::<_, Infallible>(search_channel(api, text, candidates).await)
                },
                |r: &Resolution| !r.is_failed(),
            )
            .await;
        match resolution {
            Ok(resolution) => resolution.channel_id(),
            Err(never) => match never {},
        }
    }

    /// Channel snapshot, or `None` if the channel is unknown or the fetch failed.
    pub async fn get_summary(&self, channel_id: &str) -> Option<ChannelSummary> {
        let api = self.api.as_ref();
        let fetched = self
            .cache
            .get_or_compute(
                self.key("summary").arg(channel_id),
                self.config.ttl.summary(),
                move || api.get_channel(channel_id),
            )
            .await;
        match fetched {
            Ok(summary) => {
                if summary.is_none() {
                    tracing::info!(channel_id, "Channel not found");
                }
                summary
            }
            Err(e) => {
                tracing::warn!(error = %e, channel_id, "Failed to fetch channel summary");
                None
            }
        }
    }

    /// Ids of videos published within the last `window_days`.
    async fn recent_video_ids(&self, channel_id: &str, window_days: u32) -> Collected<String> {
        let api = self.api.as_ref();
        let page_size = self.config.page_size();
        let published_after = TimeWindow::days(window_days).published_after(Utc::now());
        let collected = self
            .cache
            .get_or_compute_if(
                self.key("recent_videos").arg(channel_id).arg(window_days),
                self.config.ttl.recent_videos(),
                move || async move {
                    Ok::<_, Infallible>(
                        fetch_video_ids_since(api, channel_id, &published_after, page_size).await,
                    )
                },
                Collected::is_complete,
            )
            .await;
        match collected {
            Ok(collected) => collected,
            Err(never) => match never {},
        }
    }

    async fn video_stats(&self, video_ids: &[String]) -> BatchStats {
        let api = self.api.as_ref();
        let batch_size = self.config.batch_size();
        let stats = self
            .cache
            .get_or_compute_if(
                self.key("video_stats").arg(video_ids.join(",")),
                self.config.ttl.video_stats(),
                move || async move {
                    Ok::<_, Infallible>(get_stats(api, video_ids, batch_size).await)
                },
                BatchStats::is_complete,
            )
            .await;
        match stats {
            Ok(stats) => stats,
            Err(never) => match never {},
        }
    }

    /// Totals over videos published in the last `window_days`.
    ///
    /// These are cumulative counters of recent uploads, not views gained
    /// during the window.
    pub async fn get_window_metrics(&self, channel_id: &str, window_days: u32) -> WindowMetrics {
        let ids = self.recent_video_ids(channel_id, window_days).await;
        if ids.items.is_empty() {
            return WindowMetrics {
                complete: ids.is_complete(),
                ..WindowMetrics::default()
            };
        }

        let stats = self.video_stats(&ids.items).await;
        let mut metrics = aggregate(&stats.stats);
        metrics.complete = ids.is_complete() && stats.is_complete();
        tracing::debug!(
            channel_id,
            window_days,
            videos = metrics.item_count,
            total_views = metrics.total_views,
            complete = metrics.complete,
            "Window metrics aggregated"
        );
        metrics
    }

    /// Every playlist of the channel, ordered by item count descending.
    pub async fn get_playlists(&self, channel_id: &str) -> PlaylistSet {
        let api = self.api.as_ref();
        let page_size = self.config.page_size();
        let collected = self
            .cache
            .get_or_compute_if(
                self.key("playlists").arg(channel_id),
                self.config.ttl.playlists(),
                move || async move {
                    Ok::<_, Infallible>(fetch_playlists(api, channel_id, page_size).await)
                },
                Collected::is_complete,
            )
            .await;
        let collected = match collected {
            Ok(collected) => collected,
            Err(never) => match never {},
        };

        let complete = collected.is_complete();
        let mut playlists = collected.items;
        playlists.sort_by(|a, b| b.item_count.cmp(&a.item_count));
        PlaylistSet {
            playlists,
            complete,
        }
    }

    /// First `max_items` entries of a playlist, fetched on demand.
    pub async fn expand_playlist(
        &self,
        playlist_id: &str,
        max_items: usize,
    ) -> Collected<PlaylistItem> {
        let api = self.api.as_ref();
        let page_size = self.config.page_size();
        let collected = self
            .cache
            .get_or_compute_if(
                self.key("playlist_items").arg(playlist_id).arg(max_items),
                self.config.ttl.playlist_items(),
                move || async move {
                    Ok::<_, Infallible>(
                        fetch_playlist_items(api, playlist_id, page_size, max_items).await,
                    )
                },
                Collected::is_complete,
            )
            .await;
        match collected {
            Ok(collected) => collected,
            Err(never) => match never {},
        }
    }

    /// Run a full aggregation pass for free-form `input`.
    ///
    /// `None` only when the channel cannot be resolved or its summary
    /// cannot be fetched; every later failure degrades to partial data.
    pub async fn report(&self, input: &str) -> Option<ChannelReport> {
        let channel_id = self.resolve(input).await?;
        let summary = self.get_summary(&channel_id).await?;
        let now = Utc::now();

        let mut windows = Vec::with_capacity(self.config.windows.len());
        for &window_days in &self.config.windows {
            let metrics = self.get_window_metrics(&channel_id, window_days).await;
            windows.push(WindowReport {
                window_days,
                metrics,
            });
        }

        let playlists = self.get_playlists(&channel_id).await;
        let playlist_count = playlists.playlists.len();
        let ratios = get_ratios(&summary, playlist_count);

        let longest_window_views = windows
            .iter()
            .max_by_key(|w| w.window_days)
            .map_or(0, |w| w.metrics.total_views);
        let views_per_subscriber_longest_window = ratio(
            longest_window_views as f64,
            summary.subscriber_count as f64,
            5,
        );

        tracing::info!(
            channel_id = %channel_id,
            playlists = playlist_count,
            windows = windows.len(),
            "Channel report assembled"
        );

        Some(ChannelReport {
            months_active: months_active(summary.created_at, now),
            channel_id,
            summary,
            windows,
            playlist_count,
            top_playlists: playlists
                .playlists
                .into_iter()
                .take(self.config.top_playlists)
                .collect(),
            playlists_complete: playlists.complete,
            ratios,
            views_per_subscriber_longest_window,
        })
    }
}
