// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly progress aggregates for the goal dashboard.
//!
//! Computed on read from the workouts inside a goal's window. A week holds
//! at most a few hundred rows per user, so nothing is pre-aggregated.

use chrono::{DateTime, Datelike, Utc, Weekday};
use std::collections::HashMap;

use crate::models::{Goal, Workout};

/// Chart order for per-day distances.
const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Distance covered on one weekday.
#[derive(Debug, Clone, PartialEq)]
pub struct DayDistance {
    /// Weekday abbreviation ("Mon" .. "Sun")
    pub day: String,
    pub distance: f64,
}

/// Statistics for one goal week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyProgress {
    // ─── Window ──────────────────────────────────────────────────
    pub week_start: DateTime<Utc>,
    /// Exclusive upper bound
    pub week_end: DateTime<Utc>,

    // ─── Totals ──────────────────────────────────────────────────
    /// Total distance (km)
    pub total_distance: f64,
    pub total_calories: f64,
    /// Total duration (minutes)
    pub total_duration: u64,
    pub total_workouts: u32,
    /// Minutes per km, 0 when no distance was logged
    pub average_pace: f64,

    // ─── Breakdown ───────────────────────────────────────────────
    /// Summed distance per weekday abbreviation, only days with workouts
    pub distance_by_day: HashMap<String, f64>,

    // ─── Goal ────────────────────────────────────────────────────
    /// Percent of target reached, clamped to 100
    pub progress: f64,
    /// Distance still needed, never negative
    pub remaining_distance: f64,
}

impl WeeklyProgress {
    /// Aggregate `workouts` against `goal`.
    ///
    /// Workouts outside the goal's `[start, start + 7 days)` window are
    /// ignored, so callers may pass a superset.
    pub fn compute(goal: &Goal, workouts: &[Workout]) -> Self {
        let (week_start, week_end) = goal.window();

        let mut total_distance = 0.0;
        let mut total_calories = 0.0;
        let mut total_duration: u64 = 0;
        let mut total_workouts: u32 = 0;
        let mut distance_by_day: HashMap<String, f64> = HashMap::new();

        for workout in workouts
            .iter()
            .filter(|w| w.date >= week_start && w.date < week_end)
        {
            total_distance += workout.distance;
            total_calories += workout.calories;
            total_duration += u64::from(workout.duration);
            total_workouts += 1;
            *distance_by_day
                .entry(workout.date.weekday().to_string())
                .or_insert(0.0) += workout.distance;
        }

        let average_pace = if total_distance > 0.0 {
            total_duration as f64 / total_distance
        } else {
            0.0
        };

        let progress = if goal.target_distance > 0.0 {
            (total_distance * 100.0 / goal.target_distance).min(100.0)
        } else {
            0.0
        };

        Self {
            week_start,
            week_end,
            total_distance,
            total_calories,
            total_duration,
            total_workouts,
            average_pace,
            distance_by_day,
            progress,
            remaining_distance: (goal.target_distance - total_distance).max(0.0),
        }
    }

    /// Per-day distances Monday first, with zeros for rest days.
    pub fn daily_distances(&self) -> Vec<DayDistance> {
        WEEK_ORDER
            .iter()
            .map(|day| {
                let day = day.to_string();
                let distance = self.distance_by_day.get(&day).copied().unwrap_or(0.0);
                DayDistance { day, distance }
            })
            .collect()
    }
}
