//! Local time data source.

use async_trait::async_trait;
use chrono::{Local, Timelike};

use crate::registry::DataSource;

/// Formats the current local time. Keys: `now`, `date`, `time`, `hour`,
/// `weekday`; anything else gets the RFC 3339 form.
pub struct TimeSource;

#[async_trait]
impl DataSource for TimeSource {
    async fn resolve(&self, key: &str) -> String {
        let now = Local::now();
        match key {
            "now" => now.format("%A, %B %d, %Y %I:%M %p").to_string(),
            "date" => now.format("%B %d, %Y").to_string(),
            "time" => now.format("%I:%M %p").to_string(),
            "hour" => now.hour().to_string(),
            "weekday" => now.format("%A").to_string(),
            _ => now.to_rfc3339(),
        }
    }
}
