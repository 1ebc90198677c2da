//! # Tournament Table
//!
//! Renders a regional tournament snapshot (overall standings, completed
//! groups and the group in progress) into an HTML page.
//!
//! ## Architecture
//!
//! - **models**: Snapshot data structures (regions, groups, podium places)
//! - **fetch**: Snapshot loader with HTTP and file transports and retry
//! - **dom**: Owned HTML tree with the named surfaces renderers write into
//! - **render**: Standings, group and feedback renderers
//! - **table**: The load-then-render cycle
//! - **api**: HTTP server rendering the page per request
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod dom;
pub mod fetch;
pub mod models;
pub mod render;
pub mod table;

pub use models::*;

use std::time::Duration;

/// Parse a human-friendly duration string (e.g., "500ms", "90s", "2m", "1h").
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(n) = s.strip_suffix("ms") {
        let millis: u64 = n.parse().ok()?;
        return Some(Duration::from_millis(millis));
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Default to seconds
        (s, 1)
    };

    let num: u64 = num_str.parse().ok()?;
    num.checked_mul(multiplier).map(Duration::from_secs)
}
