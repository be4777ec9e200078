//! Habit log: one verdict per completed work session.
//!
//! The log is append-only. Only the session engine can push records, and
//! insertion order is chronological order.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    /// 1-based; equals the completed-session count right after the verdict.
    pub session_number: u32,
    pub goal: String,
    pub success: bool,
    pub recorded_at: DateTime<Utc>,
}

impl HabitRecord {
    pub fn outcome_label(&self) -> &'static str {
        if self.success {
            "Success"
        } else {
            "Failure"
        }
    }
}

impl fmt::Display for HabitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} - {}", self.session_number, self.goal, self.outcome_label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HabitLog {
    records: Vec<HabitRecord>,
}

impl HabitLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: HabitRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[HabitRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HabitRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&HabitRecord> {
        self.records.last()
    }

    pub fn successes(&self) -> usize {
        self.records.iter().filter(|r| r.success).count()
    }

    pub fn failures(&self) -> usize {
        self.len() - self.successes()
    }

    /// Share of successful sessions in `0.0..=1.0`, or `None` for an empty log.
    pub fn success_rate(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.successes() as f64 / self.len() as f64)
    }

    pub fn summary(&self) -> HabitSummary {
        HabitSummary {
            total: self.len(),
            successes: self.successes(),
            failures: self.failures(),
            success_rate: self.success_rate(),
        }
    }
}

impl<'a> IntoIterator for &'a HabitLog {
    type Item = &'a HabitRecord;
    type IntoIter = std::slice::Iter<'a, HabitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HabitSummary {
    pub total: usize,
    pub successes: usize,
    pub failures: usize,
    pub success_rate: Option<f64>,
}

impl fmt::Display for HabitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.success_rate {
            Some(rate) => write!(
                f,
                "{} sessions, {} succeeded, {} failed ({:.0}%)",
                self.total,
                self.successes,
                self.failures,
                rate * 100.0
            ),
            None => f.write_str("No sessions tracked yet."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u32, goal: &str, success: bool) -> HabitRecord {
        HabitRecord {
            session_number: n,
            goal: goal.into(),
            success,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn record_display_matches_tracker_line() {
        assert_eq!(record(1, "draft", true).to_string(), "1. draft - Success");
        assert_eq!(record(2, "", false).to_string(), "2.  - Failure");
    }

    #[test]
    fn empty_log_has_no_rate() {
        let log = HabitLog::new();
        assert!(log.is_empty());
        assert_eq!(log.success_rate(), None);
        assert_eq!(log.summary().to_string(), "No sessions tracked yet.");
    }

    #[test]
    fn summary_counts_outcomes_in_order() {
        let mut log = HabitLog::new();
        log.push(record(1, "a", true));
        log.push(record(2, "b", false));
        log.push(record(3, "c", true));
        log.push(record(4, "d", true));

        let numbers: Vec<u32> = log.iter().map(|r| r.session_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(log.successes(), 3);
        assert_eq!(log.failures(), 1);
        assert_eq!(log.success_rate(), Some(0.75));
        assert_eq!(
            log.summary().to_string(),
            "4 sessions, 3 succeeded, 1 failed (75%)"
        );
        assert_eq!(log.last().map(|r| r.goal.as_str()), Some("d"));
    }
}
