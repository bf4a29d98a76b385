//
//  stash-client
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Formatting helpers for command output. Stash reports times as
//! milliseconds since the Unix epoch.
//!
//! ```rust
//! use stash_client::util::{format_millis, truncate};
//!
//! assert_eq!(format_millis(0), "-");
//! assert_eq!(truncate("Updating develop poms", 12), "Updating ...");
//! ```

use chrono::{DateTime, Local, Utc};

/// Formats an epoch-milliseconds timestamp in local time, or `-` when unset.
pub fn format_millis(millis: i64) -> String {
    if millis <= 0 {
        return "-".to_string();
    }
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Formats an epoch-milliseconds timestamp relative to now, e.g. `3 days ago`.
pub fn format_relative_millis(millis: i64) -> String {
    if millis <= 0 {
        return "-".to_string();
    }
    relative_to(millis, Utc::now().timestamp_millis())
}

fn relative_to(millis: i64, now: i64) -> String {
    let diff = (now - millis) / 1000;
    if diff < 0 {
        return "in the future".to_string();
    }

    let (n, unit) = match diff {
        0..=59 => return "just now".to_string(),
        60..=3_599 => (diff / 60, "minute"),
        3_600..=86_399 => (diff / 3_600, "hour"),
        86_400..=604_799 => (diff / 86_400, "day"),
        604_800..=2_591_999 => (diff / 604_800, "week"),
        2_592_000..=31_535_999 => (diff / 2_592_000, "month"),
        _ => (diff / 31_536_000, "year"),
    };
    format!("{} {}{} ago", n, unit, if n == 1 { "" } else { "s" })
}

/// Shortens `s` to at most `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let mut cut: String = s.chars().take(max_len - 3).collect();
    cut.push_str("...");
    cut
}
