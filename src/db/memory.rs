// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store.
//!
//! Mirrors the Firestore operations over concurrent maps. Used for local
//! runs without GCP credentials and for tests.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::models::{Goal, User, Workout};

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, User>,
    /// email -> user ID
    emails: DashMap<String, String>,
    workouts: DashMap<String, Workout>,
    goals: DashMap<String, Goal>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Users ───────────────────────────────────────────────────

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|u| u.value().clone())
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let user_id = self.emails.get(email)?.value().clone();
        self.get_user(&user_id)
    }

    /// Insert unless the email is taken. Returns `false` on conflict.
    pub fn insert_user(&self, user: &User) -> bool {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                self.users.insert(user.id.clone(), user.clone());
                slot.insert(user.id.clone());
                true
            }
        }
    }

    // ─── Workouts ────────────────────────────────────────────────

    pub fn get_workout(&self, workout_id: &str) -> Option<Workout> {
        self.workouts.get(workout_id).map(|w| w.value().clone())
    }

    pub fn set_workout(&self, workout: &Workout) {
        self.workouts.insert(workout.id.clone(), workout.clone());
    }

    pub fn delete_workout(&self, workout_id: &str) {
        self.workouts.remove(workout_id);
    }

    pub fn list_workouts(&self, user_id: &str) -> Vec<Workout> {
        let mut workouts: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .map(|w| w.value().clone())
            .collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        workouts
    }

    pub fn list_workouts_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Workout> {
        let mut workouts: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id && w.date >= start && w.date < end)
            .map(|w| w.value().clone())
            .collect();
        workouts.sort_by(|a, b| a.date.cmp(&b.date));
        workouts
    }

    // ─── Goals ───────────────────────────────────────────────────

    /// Insert unless the ID is taken. Returns `false` on conflict.
    pub fn insert_goal(&self, goal: &Goal) -> bool {
        match self.goals.entry(goal.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(goal.clone());
                true
            }
        }
    }

    pub fn latest_goal(&self, user_id: &str) -> Option<Goal> {
        self.goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .max_by(|a, b| {
                a.week_start_date
                    .cmp(&b.week_start_date)
                    .then_with(|| a.created_at.cmp(&b.created_at))
            })
            .map(|g| g.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_user_claims_email() {
        let store = MemoryStore::new();

        assert!(store.insert_user(&user("u1", "a@example.com")));
        assert!(!store.insert_user(&user("u2", "a@example.com")));

        assert!(store.get_user("u2").is_none());
        let found = store.find_user_by_email("a@example.com").unwrap();
        assert_eq!(found.id, "u1");
    }
}
