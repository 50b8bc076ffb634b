//! Window totals and top item over a set of per-video statistics.

use std::collections::BTreeMap;

use serde::Serialize;
use youtube_client::{VideoStat, watch_url};

use crate::ratios::ratio;

/// Most-viewed video of a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopItem {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub view_count: u64,
    /// Share of the window's total views, 4 decimal places.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowMetrics {
    pub total_views: u64,
    pub item_count: usize,
    pub top_item: Option<TopItem>,
    /// Mean views per video, 2 decimal places.
    pub average_views: f64,
    /// False when any search page or stats chunk behind these numbers failed.
    pub complete: bool,
}

impl Default for WindowMetrics {
    fn default() -> Self {
        Self {
            total_views: 0,
            item_count: 0,
            top_item: None,
            average_views: 0.0,
            complete: true,
        }
    }
}

/// Summarize `stats`. Ties for the top item go to the smallest video id.
pub fn aggregate(stats: &BTreeMap<String, VideoStat>) -> WindowMetrics {
    let total_views: u64 = stats.values().map(|v| v.view_count).sum();
    let item_count = stats.len();

    // BTreeMap iterates by ascending id; keep the first maximum seen.
    let top = stats.values().fold(None::<&VideoStat>, |best, v| match best {
        Some(b) if b.view_count >= v.view_count => Some(b),
        _ => Some(v),
    });

    let top_item = top.map(|v| TopItem {
        video_id: v.video_id.clone(),
        title: v.title.clone(),
        url: watch_url(&v.video_id),
        view_count: v.view_count,
        share: ratio(v.view_count as f64, total_views as f64, 4),
    });

    WindowMetrics {
        total_views,
        item_count,
        top_item,
        average_views: ratio(total_views as f64, item_count as f64, 2),
        complete: true,
    }
}
