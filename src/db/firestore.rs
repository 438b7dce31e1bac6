// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (accounts, with one email claim per address)
//! - Workouts (logged sessions)
//! - Goals (weekly distance targets)
//!
//! Timestamps are stored as RFC3339 strings with second precision, so
//! range filters and ordering compare lexicographically.
//!
//! The workout queries need composite indexes on `(user_id, date)`; the
//! goal lookup needs `(user_id, week_start_date)`.

use chrono::{DateTime, Utc};
use firestore::errors::FirestoreError;
use firestore::FirestoreQueryDirection;
use serde::{Deserialize, Serialize};

use crate::db::{collections, email_key};
use crate::error::AppError;
use crate::models::{Goal, User, Workout};
use crate::time_utils::format_utc_rfc3339;

/// Ownership record for a registered email.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmailClaim {
    email: String,
    user_id: String,
}

/// Firestore-backed document store.
#[derive(Clone)]
pub struct FirestoreStore {
    client: firestore::FirestoreDb,
}

impl FirestoreStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Look up a user by (lowercased) email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.to_string();
        let users: Vec<User> = self
            .client
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.field("email").eq(email.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    /// Claim the user's email, then store the user.
    ///
    /// Returns `false` without writing the user if the email is claimed.
    pub async fn insert_user(&self, user: &User) -> Result<bool, AppError> {
        let claim = EmailClaim {
            email: user.email.clone(),
            user_id: user.id.clone(),
        };
        let result: Result<EmailClaim, FirestoreError> = self
            .client
            .fluent()
            .insert()
            .into(collections::USER_EMAILS)
            .document_id(email_key(&user.email))
            .object(&claim)
            .execute()
            .await;

        match result {
            Ok(_) => {}
            Err(FirestoreError::DataConflictError(_)) => return Ok(false),
            Err(e) => return Err(AppError::Database(e.to_string())),
        }

        self.upsert_user(user).await?;
        Ok(true)
    }

    /// Store a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Get a workout by ID (any owner).
    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::WORKOUTS)
            .obj()
            .one(workout_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a workout.
    pub async fn set_workout(&self, workout: &Workout) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(&workout.id)
            .object(workout)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a workout.
    pub async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        self.client
            .fluent()
            .delete()
            .from(collections::WORKOUTS)
            .document_id(workout_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// All workouts for a user, newest first.
    pub async fn list_workouts(&self, user_id: &str) -> Result<Vec<Workout>, AppError> {
        let user_id = user_id.to_string();
        self.client
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([("date", FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Workouts for a user with `start <= date < end`.
    pub async fn list_workouts_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Workout>, AppError> {
        let user_id = user_id.to_string();
        let start = format_utc_rfc3339(start);
        let end = format_utc_rfc3339(end);

        self.client
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("date").greater_than_or_equal(start.clone()),
                    q.field("date").less_than(end.clone()),
                ])
            })
            .order_by([("date", FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Goal Operations ─────────────────────────────────────────

    /// Create a goal unless one already exists with the same document ID.
    ///
    /// Returns `false` when the document already exists.
    pub async fn insert_goal(&self, goal: &Goal) -> Result<bool, AppError> {
        let result: Result<Goal, FirestoreError> = self
            .client
            .fluent()
            .insert()
            .into(collections::GOALS)
            .document_id(&goal.id)
            .object(goal)
            .execute()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(FirestoreError::DataConflictError(_)) => Ok(false),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// The user's goal with the latest week start.
    pub async fn latest_goal(&self, user_id: &str) -> Result<Option<Goal>, AppError> {
        let user_id = user_id.to_string();
        let goals: Vec<Goal> = self
            .client
            .fluent()
            .select()
            .from(collections::GOALS)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([("week_start_date", FirestoreQueryDirection::Descending)])
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(goals.into_iter().next())
    }
}
