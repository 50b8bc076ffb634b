//! Trailing publish-date windows and their `publishedAfter` cutoffs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Trailing activity window of whole days, anchored at fetch time.
///
/// Only the publish timestamp is filtered on, so videos scheduled or
/// unlisted before going public fall outside their real activity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub days: u32,
}

impl TimeWindow {
    pub fn days(days: u32) -> Self {
        Self { days }
    }

    /// Start of the window. Windows reaching before 1970 start at the Unix
    /// epoch, which selects the same uploads.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(Duration::days(i64::from(self.days)))
            .map_or(DateTime::UNIX_EPOCH, |cutoff| cutoff.max(DateTime::UNIX_EPOCH))
    }

    /// `publishedAfter` value: whole seconds, UTC, literal `Z` suffix.
    pub fn published_after(&self, now: DateTime<Utc>) -> String {
        self.cutoff(now).format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}
