//! Temporal activity patterns from history timestamps and the summary
//! cache.

use super::Counter;
use crate::types::{HistoryEntry, SummaryStats};
use chrono::{Datelike, Local, TimeZone, Timelike};

/// Number of peak hours reported.
const PEAK_HOURS: usize = 3;

/// When the user codes.
#[derive(Debug, Clone, Default)]
pub struct TimePatterns {
    /// Date of the busiest `dailyActivity` entry; `None` when the
    /// sequence is empty.
    pub busiest_day_date: Option<String>,
    pub busiest_day_messages: u64,
    /// Activity count by day of week (0 = Sunday).
    pub weekday_distribution: [u64; 7],
    /// Activity count by hour of day (0-23).
    pub hour_distribution: [u64; 24],
    /// Up to three (hour, count) pairs, descending by count; ties in
    /// first-encountered order.
    pub peak_hours: Vec<(u32, u64)>,
    /// Longest session in hours, rounded to one decimal; 0.0 when the
    /// summary cache carries no longest session.
    pub longest_session_hours: f64,
    pub longest_session_messages: u64,
}

/// Weekday name from a Sunday-first index.
pub fn day_name(day: usize) -> &'static str {
    match day {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}

/// Derive weekday/hour histograms and session-length extremes.
///
/// Timestamps are interpreted in local time. Entries with a zero or
/// unconvertible timestamp are excluded from the histograms only; they
/// still count everywhere else.
pub fn analyze(stats: &SummaryStats, history: &[HistoryEntry]) -> TimePatterns {
    let mut patterns = TimePatterns::default();

    // First entry with the maximal count wins ties
    let mut busiest: Option<(&str, u64)> = None;
    for day in &stats.daily_activity {
        if busiest.map(|(_, c)| day.message_count > c).unwrap_or(true) {
            busiest = Some((&day.date, day.message_count));
        }
    }
    if let Some((date, count)) = busiest {
        patterns.busiest_day_date = Some(date.to_string());
        patterns.busiest_day_messages = count;
    }

    let mut hour_counts: Counter<u32> = Counter::new();
    for entry in history {
        if entry.timestamp == 0 {
            continue;
        }
        let Some(dt) = Local.timestamp_millis_opt(entry.timestamp).single() else {
            continue;
        };
        let weekday = dt.weekday().num_days_from_sunday() as usize;
        patterns.weekday_distribution[weekday] += 1;
        hour_counts.increment(dt.hour());
    }

    for &(hour, count) in hour_counts.entries() {
        patterns.hour_distribution[hour as usize] = count;
    }
    patterns.peak_hours = hour_counts.top(PEAK_HOURS);

    if let Some(longest) = &stats.longest_session {
        patterns.longest_session_hours = round1(longest.duration as f64 / 3_600_000.0);
        patterns.longest_session_messages = longest.message_count;
    }

    patterns
}

// Ties go to even, so 1.25h reports as 1.2 and 1.35h as 1.4.
fn round1(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}
