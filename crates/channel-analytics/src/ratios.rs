//! Safe-division ratios over already-fetched channel counters.
//!
//! A zero, negative or unknown denominator yields 0.0. Nothing here is
//! cached; every pass recomputes from the base scalars.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use youtube_client::ChannelSummary;

const DAYS_PER_MONTH: f64 = 30.0;

pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// `numerator / denominator` rounded to `places`, or 0.0 when undefined.
pub fn ratio(numerator: f64, denominator: f64, places: u32) -> f64 {
    if denominator > 0.0 && denominator.is_finite() && numerator.is_finite() {
        round_to(numerator / denominator, places)
    } else {
        0.0
    }
}

/// Whole elapsed days since creation divided by 30, 2 decimal places.
pub fn months_active(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<f64> {
    let created_at = created_at?;
    let days = (now - created_at).num_days();
    Some(round_to(days as f64 / DAYS_PER_MONTH, 2))
}

/// Base scalars the ratio set is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatioInputs {
    pub subscribers: u64,
    pub videos: u64,
    pub views: u64,
    pub months_active: Option<f64>,
    pub playlists: usize,
}

impl RatioInputs {
    pub fn from_summary(summary: &ChannelSummary, playlists: usize, now: DateTime<Utc>) -> Self {
        Self {
            subscribers: summary.subscriber_count,
            videos: summary.video_count,
            views: summary.view_count,
            months_active: months_active(summary.created_at, now),
            playlists,
        }
    }
}

/// Cross-field channel ratios.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DerivedMetrics {
    pub subs_per_month: f64,
    pub subs_per_video: f64,
    pub views_per_sub: f64,
    pub subs_per_month_per_video: f64,
    pub views_per_video: f64,
    pub views_per_month: f64,
    /// `subs_per_month / views_per_month`
    pub subs_per_view: f64,
    /// `subs_per_video / views_per_video`
    pub subs_per_view_alt: f64,
    pub subs_per_total_view: f64,
    pub playlists_per_video: f64,
    pub videos_per_month: f64,
    pub videos_per_subscriber: f64,
}

impl DerivedMetrics {
    pub fn compute(input: &RatioInputs) -> Self {
        let subs = input.subscribers as f64;
        let videos = input.videos as f64;
        let views = input.views as f64;
        let months = input.months_active.unwrap_or(0.0);
        let playlists = input.playlists as f64;

        // Second-order ratios divide the already rounded first-order ones.
        let subs_per_month = ratio(subs, months, 2);
        let subs_per_video = ratio(subs, videos, 2);
        let views_per_video = ratio(views, videos, 2);
        let views_per_month = ratio(views, months, 2);

        Self {
            subs_per_month,
            subs_per_video,
            views_per_sub: ratio(views, subs, 2),
            subs_per_month_per_video: ratio(subs_per_month, videos, 5),
            views_per_video,
            views_per_month,
            subs_per_view: ratio(subs_per_month, views_per_month, 5),
            subs_per_view_alt: ratio(subs_per_video, views_per_video, 5),
            subs_per_total_view: ratio(subs, views, 5),
            playlists_per_video: ratio(playlists, videos, 5),
            videos_per_month: ratio(videos, months, 2),
            videos_per_subscriber: ratio(videos, subs, 5),
        }
    }

    pub fn for_summary(summary: &ChannelSummary, playlists: usize, now: DateTime<Utc>) -> Self {
        Self::compute(&RatioInputs::from_summary(summary, playlists, now))
    }

    /// The ratios keyed by name.
    pub fn named(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("subs_per_month", self.subs_per_month),
            ("subs_per_video", self.subs_per_video),
            ("views_per_sub", self.views_per_sub),
            ("subs_per_month_per_video", self.subs_per_month_per_video),
            ("views_per_video", self.views_per_video),
            ("views_per_month", self.views_per_month),
            ("subs_per_view", self.subs_per_view),
            ("subs_per_view_alt", self.subs_per_view_alt),
            ("subs_per_total_view", self.subs_per_total_view),
            ("playlists_per_video", self.playlists_per_video),
            ("videos_per_month", self.videos_per_month),
            ("videos_per_subscriber", self.videos_per_subscriber),
        ])
    }
}

/// Named derived ratios for `summary`, measured against the current time.
pub fn get_ratios(
    summary: &ChannelSummary,
    playlist_count: usize,
) -> BTreeMap<&'static str, f64> {
    DerivedMetrics::for_summary(summary, playlist_count, Utc::now()).named()
}
