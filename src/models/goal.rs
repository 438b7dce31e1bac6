// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weekly distance goal model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::time_utils::start_of_day;

/// Length of a goal window.
pub const GOAL_WINDOW_DAYS: i64 = 7;

/// Stored goal record.
///
/// The document ID is derived from `(user_id, week_start_date)` so the
/// store itself rejects a second goal for the same week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Document ID (`{user_id}_{YYYY-MM-DD}`)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Target distance in km
    pub target_distance: f64,
    /// First day of the goal week (UTC midnight)
    pub week_start_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Document ID for a user's goal starting on `week_start`.
    pub fn document_id(user_id: &str, week_start: DateTime<Utc>) -> String {
        format!("{}_{}", user_id, week_start.format("%Y-%m-%d"))
    }

    /// Half-open `[start, end)` window the goal covers.
    pub fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = start_of_day(self.week_start_date);
        (start, start + Duration::days(GOAL_WINDOW_DAYS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_id_uses_calendar_day() {
        let week = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Goal::document_id("abc123", week), "abc123_2024-01-01");
    }

    #[test]
    fn test_window_is_seven_days_from_midnight() {
        let goal = Goal {
            id: "g".to_string(),
            user_id: "u".to_string(),
            target_distance: 20.0,
            week_start_date: Utc.with_ymd_and_hms(2024, 1, 1, 15, 30, 0).unwrap(),
            created_at: Utc::now(),
        };

        let (start, end) = goal.window();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap());
    }
}
