// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout logging service.
//!
//! Every call takes the requesting user's ID; records are only visible to
//! and mutable by their owner.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::db::{new_document_id, Db};
use crate::error::{AppError, Result};
use crate::models::workout::calories_for;
use crate::models::{Intensity, Workout};
use crate::time_utils::{now_utc, parse_date_input};

/// Workout fields as supplied by a client.
///
/// Creation requires `date`, `distance` and `duration`; an update applies
/// only the fields that are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
    pub date: Option<String>,
    pub distance: Option<f64>,
    /// Minutes; must be a whole number
    pub duration: Option<f64>,
    pub intensity: Option<String>,
}

pub struct WorkoutService {
    db: Db,
}

impl WorkoutService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Log a new workout for `owner`.
    pub async fn add_workout(&self, owner: &str, input: WorkoutInput) -> Result<Workout> {
        let now = now_utc();

        let date = validate_date(
            input
                .date
                .as_deref()
                .ok_or_else(|| invalid("Workout date is required"))?,
            now,
        )?;
        let distance = validate_distance(input.distance)?;
        let duration = validate_duration(input.duration)?;
        let intensity = input.intensity.as_deref().map(parse_intensity).transpose()?;

        let workout = Workout {
            id: new_document_id()?,
            user_id: owner.to_string(),
            date,
            distance,
            duration,
            intensity,
            calories: checked_calories(distance, intensity)?,
            created_at: now,
            updated_at: now,
        };

        self.db.set_workout(&workout).await?;

        tracing::info!(
            user_id = owner,
            workout_id = %workout.id,
            distance,
            duration,
            "Workout added"
        );

        Ok(workout)
    }

    /// All of `owner`'s workouts, newest first.
    pub async fn list_workouts(&self, owner: &str) -> Result<Vec<Workout>> {
        self.db.list_workouts(owner).await
    }

    /// Apply the present fields of `input` to one of `owner`'s workouts.
    pub async fn update_workout(
        &self,
        owner: &str,
        workout_id: &str,
        input: WorkoutInput,
    ) -> Result<Workout> {
        let mut workout = self.owned_workout(owner, workout_id).await?;
        let now = now_utc();

        // Validate everything before touching the record
        let date = input
            .date
            .as_deref()
            .map(|raw| validate_date(raw, now))
            .transpose()?;
        let distance = input
            .distance
            .map(|d| validate_distance(Some(d)))
            .transpose()?;
        let duration = input
            .duration
            .map(|d| validate_duration(Some(d)))
            .transpose()?;
        let intensity = input.intensity.as_deref().map(parse_intensity).transpose()?;

        if let Some(date) = date {
            workout.date = date;
        }
        if let Some(duration) = duration {
            workout.duration = duration;
        }
        if distance.is_some() || intensity.is_some() {
            if let Some(distance) = distance {
                workout.distance = distance;
            }
            if intensity.is_some() {
                workout.intensity = intensity;
            }
            workout.calories = checked_calories(workout.distance, workout.intensity)?;
        }
        workout.updated_at = now;

        self.db.set_workout(&workout).await?;

        tracing::info!(user_id = owner, workout_id, "Workout updated");

        Ok(workout)
    }

    /// Delete one of `owner`'s workouts.
    pub async fn delete_workout(&self, owner: &str, workout_id: &str) -> Result<()> {
        self.owned_workout(owner, workout_id).await?;
        self.db.delete_workout(workout_id).await?;

        tracing::info!(user_id = owner, workout_id, "Workout deleted");

        Ok(())
    }

    /// Fetch a workout, checking it exists and belongs to `owner`.
    async fn owned_workout(&self, owner: &str, workout_id: &str) -> Result<Workout> {
        let workout = self
            .db
            .get_workout(workout_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

        if workout.user_id != owner {
            tracing::warn!(
                user_id = owner,
                workout_id,
                "Rejected access to another user's workout"
            );
            return Err(AppError::Forbidden);
        }

        Ok(workout)
    }
}

fn invalid(msg: &str) -> AppError {
    AppError::InvalidInput(msg.to_string())
}

fn validate_date(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let date = parse_date_input(raw).ok_or_else(|| invalid("Workout date is not a valid date"))?;
    if date > now {
        return Err(invalid("Workout date cannot be in the future"));
    }
    Ok(date)
}

fn validate_distance(distance: Option<f64>) -> Result<f64> {
    match distance {
        Some(d) if d.is_finite() && d > 0.0 => Ok(d),
        _ => Err(invalid("Distance must be a positive number")),
    }
}

fn validate_duration(duration: Option<f64>) -> Result<u32> {
    match duration {
        Some(d) if d.is_finite() && d.fract() == 0.0 && d > 0.0 && d <= f64::from(u32::MAX) => {
            Ok(d as u32)
        }
        _ => Err(invalid("Duration must be a positive integer")),
    }
}

/// Calories for the workout, rejecting distances too large to total.
fn checked_calories(distance: f64, intensity: Option<Intensity>) -> Result<f64> {
    let calories = calories_for(distance, intensity);
    if !calories.is_finite() {
        return Err(invalid("Distance is too large"));
    }
    Ok(calories)
}

fn parse_intensity(raw: &str) -> Result<Intensity> {
    Intensity::parse(raw).ok_or_else(|| invalid("Intensity must be one of: low, medium, high"))
}
