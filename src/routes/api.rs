// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{DayDistance, Goal, Intensity, Workout};
use crate::services::{GoalInput, GoalProgress, WorkoutInput};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/goals", get(get_goal).post(create_goal))
        .route("/api/workouts", get(list_workouts).post(add_workout))
        .route(
            "/api/workouts/{id}",
            put(update_workout).delete(delete_workout),
        )
}

// ─── Goals ───────────────────────────────────────────────────

/// Goal as returned by the API.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalResponse {
    pub id: String,
    pub user: String,
    pub target_distance: f64,
    pub week_start_date: String,
    pub created_at: String,
}

impl From<Goal> for GoalResponse {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id,
            user: goal.user_id,
            target_distance: goal.target_distance,
            week_start_date: format_utc_rfc3339(goal.week_start_date),
            created_at: format_utc_rfc3339(goal.created_at),
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayDistanceResponse {
    pub day: String,
    pub distance: f64,
}

impl From<DayDistance> for DayDistanceResponse {
    fn from(d: DayDistance) -> Self {
        Self {
            day: d.day,
            distance: d.distance,
        }
    }
}

/// Current goal with its weekly statistics.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalProgressResponse {
    pub goal: GoalResponse,
    /// Exclusive end of the goal week
    pub week_end_date: String,
    pub total_distance: f64,
    pub total_calories: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_duration: u64,
    pub total_workouts: u32,
    /// Minutes per km
    pub average_pace: f64,
    /// Distance per weekday ("Mon" .. "Sun"), days with workouts only
    pub distance_by_day: HashMap<String, f64>,
    /// All seven days, Monday first, for charting
    pub daily_distances: Vec<DayDistanceResponse>,
    /// Percent of target, at most 100
    pub progress: f64,
    pub remaining_distance: f64,
}

impl From<GoalProgress> for GoalProgressResponse {
    fn from(GoalProgress { goal, progress }: GoalProgress) -> Self {
        let daily_distances = progress
            .daily_distances()
            .into_iter()
            .map(DayDistanceResponse::from)
            .collect();

        Self {
            goal: goal.into(),
            week_end_date: format_utc_rfc3339(progress.week_end),
            total_distance: progress.total_distance,
            total_calories: progress.total_calories,
            total_duration: progress.total_duration,
            total_workouts: progress.total_workouts,
            average_pace: progress.average_pace,
            distance_by_day: progress.distance_by_day,
            daily_distances,
            progress: progress.progress,
            remaining_distance: progress.remaining_distance,
        }
    }
}

/// Set a weekly distance goal.
async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<GoalInput>, JsonRejection>,
) -> Result<(StatusCode, Json<GoalResponse>)> {
    let Json(input) = payload?;
    let goal = state.goals.create_goal(&user.user_id, input).await?;

    Ok((StatusCode::CREATED, Json(goal.into())))
}

/// Get the current goal and this week's progress toward it.
async fn get_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<GoalProgressResponse>> {
    let current = state.goals.current_goal_with_progress(&user.user_id).await?;

    Ok(Json(current.into()))
}

// ─── Workouts ────────────────────────────────────────────────

/// Workout as returned by the API.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutResponse {
    pub id: String,
    pub user: String,
    pub date: String,
    pub distance: f64,
    pub duration: u32,
    pub intensity: Option<Intensity>,
    pub calories: f64,
    /// Minutes per km
    pub pace: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        let pace = workout.pace();
        Self {
            id: workout.id,
            user: workout.user_id,
            date: format_utc_rfc3339(workout.date),
            distance: workout.distance,
            duration: workout.duration,
            intensity: workout.intensity,
            calories: workout.calories,
            pace,
            created_at: format_utc_rfc3339(workout.created_at),
            updated_at: format_utc_rfc3339(workout.updated_at),
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteWorkoutResponse {
    pub message: String,
}

/// Log a workout.
async fn add_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<WorkoutInput>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkoutResponse>)> {
    let Json(input) = payload?;
    let workout = state.workouts.add_workout(&user.user_id, input).await?;

    Ok((StatusCode::CREATED, Json(workout.into())))
}

/// List the user's workouts, newest first.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<WorkoutResponse>>> {
    let workouts = state.workouts.list_workouts(&user.user_id).await?;

    tracing::debug!(
        user_id = %user.user_id,
        count = workouts.len(),
        "Fetched workouts"
    );

    Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}

/// Update some fields of a workout.
async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
    payload: std::result::Result<Json<WorkoutInput>, JsonRejection>,
) -> Result<Json<WorkoutResponse>> {
    let Json(input) = payload?;
    let workout = state
        .workouts
        .update_workout(&user.user_id, &workout_id, input)
        .await?;

    Ok(Json(workout.into()))
}

/// Delete a workout.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> Result<Json<DeleteWorkoutResponse>> {
    state
        .workouts
        .delete_workout(&user.user_id, &workout_id)
        .await?;

    Ok(Json(DeleteWorkoutResponse {
        message: "Workout deleted successfully".to_string(),
    }))
}
