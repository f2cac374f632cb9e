// =============================================================================
// News Calendar — upcoming market events loaded from configuration
// =============================================================================
//
// File format: a JSON object mapping ISO dates to event labels, e.g.
//
//   { "2026-10-28": "FOMC rate decision", "2026-11-06": "US CPI" }
// =============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One dated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsEvent {
    pub date: NaiveDate,
    pub label: String,
}

/// Date-ordered event calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsCalendar {
    events: BTreeMap<NaiveDate, String>,
}

impl NewsCalendar {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse news calendar")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read news calendar from {}", path.display()))?;
        let calendar = Self::from_json(&content)
            .with_context(|| format!("invalid news calendar at {}", path.display()))?;
        info!(path = %path.display(), events = calendar.len(), "news calendar loaded");
        Ok(calendar)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events from `today` through `today + horizon_days`, inclusive, in date
    /// order.  A negative horizon yields nothing.
    pub fn upcoming(&self, today: NaiveDate, horizon_days: i64) -> Vec<NewsEvent> {
        if horizon_days < 0 {
            return Vec::new();
        }
        let end = Duration::try_days(horizon_days)
            .and_then(|horizon| today.checked_add_signed(horizon))
            .unwrap_or(NaiveDate::MAX);
        self.events
            .range(today..=end)
            .map(|(date, label)| NewsEvent {
                date: *date,
                label: label.clone(),
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn calendar() -> NewsCalendar {
        NewsCalendar::from_json(
            r#"{
                "2026-10-10": "Past event",
                "2026-10-16": "Retail sales",
                "2026-10-28": "FOMC rate decision",
                "2026-10-23": "PMI flash"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn upcoming_is_inclusive_and_ordered() {
        let events = calendar().upcoming(date("2026-10-16"), 7);
        let labels: Vec<&str> = events.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Retail sales", "PMI flash"]);
        assert_eq!(events[1].date, date("2026-10-23"));
    }

    #[test]
    fn wider_horizon_includes_later_events() {
        assert_eq!(calendar().upcoming(date("2026-10-16"), 30).len(), 3);
    }

    #[test]
    fn negative_horizon_is_empty() {
        assert!(calendar().upcoming(date("2026-10-16"), -1).is_empty());
    }

    #[test]
    fn huge_horizon_runs_to_end_of_calendar() {
        let cal = calendar();
        assert_eq!(cal.upcoming(date("2026-10-16"), i64::MAX).len(), 3);
        assert_eq!(cal.upcoming(date("2026-10-16"), 1_000_000_000).len(), 3);
    }

    #[test]
    fn empty_calendar() {
        let cal = NewsCalendar::from_json("{}").unwrap();
        assert!(cal.is_empty());
        assert!(cal.upcoming(date("2026-10-16"), 7).is_empty());
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(NewsCalendar::from_json(r#"{ "next week": "CPI" }"#).is_err());
    }

    #[test]
    fn load_missing_file_is_error() {
        assert!(NewsCalendar::load("/nonexistent/news_calendar.json").is_err());
    }
}
