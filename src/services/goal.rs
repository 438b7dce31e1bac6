// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly goal service.
//!
//! Handles the goal workflow:
//! 1. Create one goal per user per week
//! 2. Resolve the current goal (latest week start)
//! 3. Fetch that week's workouts and compute progress

use serde::Deserialize;

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{Goal, WeeklyProgress};
use crate::time_utils::{now_utc, parse_date_input, start_of_day};

/// Goal fields as supplied by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalInput {
    pub target_distance: Option<f64>,
    pub week_start_date: Option<String>,
}

/// A goal together with the progress made in its week.
#[derive(Debug, Clone)]
pub struct GoalProgress {
    pub goal: Goal,
    pub progress: WeeklyProgress,
}

pub struct GoalService {
    db: Db,
}

impl GoalService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Create a goal for `owner`. Fails with `DuplicateGoal` if the week
    /// already has one.
    pub async fn create_goal(&self, owner: &str, input: GoalInput) -> Result<Goal> {
        let target_distance = match input.target_distance {
            Some(t) if t.is_finite() && t > 0.0 => t,
            _ => {
                return Err(AppError::InvalidInput(
                    "Target distance must be a positive number".to_string(),
                ))
            }
        };

        let week_start = input
            .week_start_date
            .as_deref()
            .and_then(parse_date_input)
            .map(start_of_day)
            .ok_or_else(|| {
                AppError::InvalidInput("Week start date is missing or invalid".to_string())
            })?;

        let goal = Goal {
            id: Goal::document_id(owner, week_start),
            user_id: owner.to_string(),
            target_distance,
            week_start_date: week_start,
            created_at: now_utc(),
        };

        if !self.db.insert_goal(&goal).await? {
            tracing::debug!(user_id = owner, goal_id = %goal.id, "Duplicate goal rejected");
            return Err(AppError::DuplicateGoal);
        }

        tracing::info!(
            user_id = owner,
            goal_id = %goal.id,
            target_distance,
            "Goal created"
        );

        Ok(goal)
    }

    /// The owner's current goal and its weekly statistics.
    ///
    /// When several goals exist, the one with the latest week start wins.
    pub async fn current_goal_with_progress(&self, owner: &str) -> Result<GoalProgress> {
        let goal = self
            .db
            .latest_goal(owner)
            .await?
            .ok_or_else(|| AppError::NotFound("No goal found".to_string()))?;

        let (week_start, week_end) = goal.window();
        let workouts = self
            .db
            .list_workouts_between(owner, week_start, week_end)
            .await?;

        let progress = WeeklyProgress::compute(&goal, &workouts);

        tracing::debug!(
            user_id = owner,
            goal_id = %goal.id,
            workouts = progress.total_workouts,
            progress = progress.progress,
            "Computed weekly progress"
        );

        Ok(GoalProgress { goal, progress })
    }
}
