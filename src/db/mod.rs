// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore, with an in-memory fallback).

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreStore;
pub use self::memory::MemoryStore;

use chrono::{DateTime, Utc};
use ring::digest;
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use crate::models::{Goal, User, Workout};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// One document per registered email, keyed by `email_key`
    pub const USER_EMAILS: &str = "user_emails";
    pub const WORKOUTS: &str = "workouts";
    pub const GOALS: &str = "goals";
}

/// Random document ID: 12 bytes from the system CSPRNG, hex encoded.
pub fn new_document_id() -> Result<String, AppError> {
    let mut bytes = [0u8; 12];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System random generator failed")))?;
    Ok(hex::encode(bytes))
}

/// Document ID claiming a (normalized) email address.
///
/// Hashed so arbitrary address characters never reach a document path.
pub fn email_key(email: &str) -> String {
    hex::encode(digest::digest(&digest::SHA256, email.as_bytes()))
}

/// Database handle shared by all services.
#[derive(Clone)]
pub struct Db {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreStore),
    Memory(Arc<MemoryStore>),
}

impl Db {
    /// Open the backend selected in config.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.storage_backend {
            StorageBackend::Firestore => Ok(Self {
                backend: Backend::Firestore(FirestoreStore::new(&config.gcp_project_id).await?),
            }),
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data will not survive a restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Create an empty in-memory database.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::new())),
        }
    }

    /// Short name of the active backend, for health reporting.
    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Firestore(_) => "firestore",
            Backend::Memory(_) => "memory",
        }
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.get_user(user_id).await,
            Backend::Memory(store) => Ok(store.get_user(user_id)),
        }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.find_user_by_email(email).await,
            Backend::Memory(store) => Ok(store.find_user_by_email(email)),
        }
    }

    /// Store a new user unless the email is already registered.
    ///
    /// Returns `false` if another account holds the email.
    pub async fn insert_user(&self, user: &User) -> Result<bool, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.insert_user(user).await,
            Backend::Memory(store) => Ok(store.insert_user(user)),
        }
    }

    // ─── Workouts ────────────────────────────────────────────────

    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.get_workout(workout_id).await,
            Backend::Memory(store) => Ok(store.get_workout(workout_id)),
        }
    }

    pub async fn set_workout(&self, workout: &Workout) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.set_workout(workout).await,
            Backend::Memory(store) => {
                store.set_workout(workout);
                Ok(())
            }
        }
    }

    pub async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.delete_workout(workout_id).await,
            Backend::Memory(store) => {
                store.delete_workout(workout_id);
                Ok(())
            }
        }
    }

    /// All of a user's workouts, newest first.
    pub async fn list_workouts(&self, user_id: &str) -> Result<Vec<Workout>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.list_workouts(user_id).await,
            Backend::Memory(store) => Ok(store.list_workouts(user_id)),
        }
    }

    /// A user's workouts with `start <= date < end`.
    pub async fn list_workouts_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Workout>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.list_workouts_between(user_id, start, end).await,
            Backend::Memory(store) => Ok(store.list_workouts_between(user_id, start, end)),
        }
    }

    // ─── Goals ───────────────────────────────────────────────────

    /// Create-if-absent. Returns `false` if a goal with the same ID exists.
    pub async fn insert_goal(&self, goal: &Goal) -> Result<bool, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.insert_goal(goal).await,
            Backend::Memory(store) => Ok(store.insert_goal(goal)),
        }
    }

    /// The user's goal with the most recent week start.
    pub async fn latest_goal(&self, user_id: &str) -> Result<Option<Goal>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.latest_goal(user_id).await,
            Backend::Memory(store) => Ok(store.latest_goal(user_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_backend_name() {
        assert_eq!(Db::in_memory().backend_name(), "memory");
    }

    #[test]
    fn test_email_key_is_stable_hex() {
        let key = email_key("alice@example.com");

        assert_eq!(key.len(), 64);
        assert_eq!(key, email_key("alice@example.com"));
        assert_ne!(key, email_key("bob@example.com"));
    }

    #[test]
    fn test_document_ids_are_unique_hex() {
        let a = new_document_id().unwrap();
        let b = new_document_id().unwrap();

        assert_eq!(a.len(), 24);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
