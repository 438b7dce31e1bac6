// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Calories burned per km when no intensity is recorded.
pub const DEFAULT_CALORIES_PER_KM: f64 = 60.0;

/// Perceived effort of a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Parse the wire form (`low`, `medium`, `high`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn calories_per_km(self) -> f64 {
        match self {
            Self::Low => 50.0,
            Self::Medium => 60.0,
            Self::High => 75.0,
        }
    }
}

/// Calories for a workout of `distance_km` at the given intensity.
pub fn calories_for(distance_km: f64, intensity: Option<Intensity>) -> f64 {
    let rate = intensity.map_or(DEFAULT_CALORIES_PER_KM, Intensity::calories_per_km);
    distance_km * rate
}

/// Stored workout record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    /// Document ID
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// When the workout happened
    pub date: DateTime<Utc>,
    /// Distance in km
    pub distance: f64,
    /// Duration in whole minutes
    pub duration: u32,
    #[serde(default)]
    pub intensity: Option<Intensity>,
    pub calories: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    /// Minutes per km, or 0 for a zero-distance record.
    pub fn pace(&self) -> f64 {
        if self.distance > 0.0 {
            f64::from(self.duration) / self.distance
        } else {
            0.0
        }
    }
}
