use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// One weekday bucket of the current-week document history.
#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct HistoryEntry {
    #[schema(example = "Monday")]
    pub date: String,
    pub count: i64,
}

/// Counts and rates for a `[start, end]` date range. The timestamp rides
/// inside the data payload here, not on the envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct RangeMetrics {
    #[serde(rename = "totalTemplates")]
    pub total_templates: i64,
    #[serde(rename = "totalDocuments")]
    pub total_documents: i64,
    #[serde(rename = "failedGenerations")]
    pub failed_generations: i64,
    #[serde(rename = "generationRate")]
    pub generation_rate: f64,
    #[serde(rename = "failureRate")]
    pub failure_rate: f64,
    pub timestamp: DateTime<Utc>,
}

/// Zero-fill per-weekday counts to all seven days, with the current weekday
/// ordered last regardless of its calendar position.
pub fn normalize_history(counts: &[(String, i64)], current_day: &str) -> Vec<HistoryEntry> {
    let count_for = |day: &str| {
        counts
            .iter()
            .find(|(name, _)| name == day)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    };

    let mut entries: Vec<HistoryEntry> = WEEKDAYS
        .iter()
        .filter(|day| **day != current_day)
        .map(|day| HistoryEntry {
            date: day.to_string(),
            count: count_for(day),
        })
        .collect();

    entries.push(HistoryEntry {
        date: current_day.to_string(),
        count: count_for(current_day),
    });

    entries
}

/// Documents per day over the range. Zero when the span is not positive.
pub fn generation_rate(total_documents: i64, day_span: i64) -> f64 {
    if day_span > 0 {
        total_documents as f64 / day_span as f64
    } else {
        0.0
    }
}

/// Failed generations as a percentage of documents. Zero when no documents
/// were generated.
pub fn failure_rate(failed_generations: i64, total_documents: i64) -> f64 {
    if total_documents > 0 {
        failed_generations as f64 / total_documents as f64 * 100.0
    } else {
        0.0
    }
}
