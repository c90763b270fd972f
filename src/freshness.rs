//! Date handling and freshness buckets

use crate::config::FreshnessThresholds;
use crate::types::{FreshnessSummary, Resource};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Timestamp layout used by the resource table, e.g. `2025-07-14:09-30-00`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d:%H-%M-%S";

/// Parse a table timestamp; blank or malformed values yield `None`
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Whole days elapsed between `then` and `now`
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days()
}

/// True if `then` is at most `days` whole days before `now`
pub fn within_days(then: DateTime<Utc>, now: DateTime<Utc>, days: u32) -> bool {
    days_since(then, now) <= i64::from(days)
}

/// True if `then` falls inside the window `[now - days, ∞)`.
///
/// A window reaching past the representable date range covers every date.
pub fn on_or_after_cutoff(then: DateTime<Utc>, now: DateTime<Utc>, days: u32) -> bool {
    match now.checked_sub_signed(Duration::days(i64::from(days))) {
        Some(cutoff) => then >= cutoff,
        None => true,
    }
}

/// Count the freshness buckets for a set of resources
pub fn freshness_summary<'a, I>(
    resources: I,
    now: DateTime<Utc>,
    thresholds: &FreshnessThresholds,
) -> FreshnessSummary
where
    I: IntoIterator<Item = &'a Resource>,
{
    let mut summary = FreshnessSummary::default();

    for resource in resources {
        if resource
            .added_at
            .is_some_and(|added| within_days(added, now, thresholds.recent_added_days))
        {
            summary.recently_added += 1;
        }

        match resource.last_checked_at {
            None => summary.never_checked += 1,
            Some(checked) => {
                let age = days_since(checked, now);
                if age <= i64::from(thresholds.recent_checked_days) {
                    summary.recently_checked += 1;
                } else if age > i64::from(thresholds.outdated_days) {
                    summary.outdated_checks += 1;
                }
            }
        }
    }

    summary
}
