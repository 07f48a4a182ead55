//! Per-day health score history.
//!
//! The history is append-only and chronological. A submission adds at most
//! one entry per calendar day; resubmitting on the same day keeps the first
//! entry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One recorded health score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreEntry {
    /// `None` when the submission had too few vitals to score
    pub score: Option<f64>,

    /// Submission instant (ISO-8601)
    pub timestamp: DateTime<Utc>,

    /// Calendar day of the submission (`YYYY-MM-DD`)
    pub date: NaiveDate,
}

impl HealthScoreEntry {
    /// Create an entry dated by the UTC day of `now`.
    #[must_use]
    pub fn new(score: Option<f64>, now: DateTime<Utc>) -> Self {
        Self {
            score,
            timestamp: now,
            date: now.date_naive(),
        }
    }
}

/// Append `entry` unless the history already has an entry dated `today`.
#[must_use]
pub fn append_health_score_entry(
    mut history: Vec<HealthScoreEntry>,
    entry: HealthScoreEntry,
    today: NaiveDate,
) -> Vec<HealthScoreEntry> {
    if history.iter().any(|existing| existing.date == today) {
        tracing::debug!(%today, "Health score already recorded today, keeping history");
        return history;
    }
    history.push(entry);
    history
}

/// The most recent `window` recorded scores, oldest first. Unscored entries are skipped.
#[must_use]
pub fn score_trend(history: &[HealthScoreEntry], window: usize) -> Vec<f64> {
    let scores: Vec<f64> = history.iter().filter_map(|e| e.score).collect();
    let start = scores.len().saturating_sub(window);
    scores[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn test_entry_date_is_utc_day() {
        let entry = HealthScoreEntry::new(Some(80.0), at(2026, 3, 4, 23));
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 3, 4).expect("date"));
    }

    #[test]
    fn test_append_new_day() {
        let first = HealthScoreEntry::new(Some(70.0), at(2026, 3, 3, 9));
        let second = HealthScoreEntry::new(Some(75.0), at(2026, 3, 4, 9));

        let history = append_health_score_entry(vec![first.clone()], second.clone(), second.date);
        assert_eq!(history, vec![first, second]);
    }

    #[test]
    fn test_same_day_resubmission_is_noop() {
        let morning = HealthScoreEntry::new(Some(70.0), at(2026, 3, 4, 9));
        let evening = HealthScoreEntry::new(Some(90.0), at(2026, 3, 4, 20));
        let today = morning.date;

        let once = append_health_score_entry(Vec::new(), morning.clone(), today);
        let twice = append_health_score_entry(once.clone(), evening, today);

        assert_eq!(once, twice);
        assert_eq!(twice, vec![morning]);
    }

    #[test]
    fn test_unscored_entry_still_blocks_the_day() {
        let unscored = HealthScoreEntry::new(None, at(2026, 3, 4, 9));
        let scored = HealthScoreEntry::new(Some(60.0), at(2026, 3, 4, 10));

        let history = append_health_score_entry(vec![unscored.clone()], scored, unscored.date);
        assert_eq!(history.len(), 1);
        assert!(history[0].score.is_none());
    }

    #[test]
    fn test_score_trend_window() {
        let history: Vec<HealthScoreEntry> = (1..=9)
            .map(|day| {
                let score = if day == 5 { None } else { Some(f64::from(day) * 10.0) };
                HealthScoreEntry::new(score, at(2026, 3, day, 8))
            })
            .collect();

        assert_eq!(
            score_trend(&history, 3),
            vec![70.0, 80.0, 90.0]
        );
        assert_eq!(score_trend(&history, 100).len(), 8);
        assert!(score_trend(&[], 7).is_empty());
    }

    #[test]
    fn test_entry_wire_format() {
        let entry = HealthScoreEntry::new(Some(86.7), at(2026, 3, 4, 9));
        let json = serde_json::to_value(&entry).expect("Should serialize");
        assert_eq!(json["date"], "2026-03-04");
        assert_eq!(json["score"], 86.7);
        assert!(json["timestamp"]
            .as_str()
            .expect("timestamp string")
            .starts_with("2026-03-04T09:00:00"));
    }
}
