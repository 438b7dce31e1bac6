// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitTrack: log workouts and track weekly distance goals
//!
//! This crate provides the backend API: workout logging, weekly goals,
//! and the progress statistics the dashboard charts are drawn from.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;
use services::{AccountService, GoalService, WorkoutService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub accounts: AccountService,
    pub goals: GoalService,
    pub workouts: WorkoutService,
}

impl AppState {
    /// Wire up services over a database handle.
    pub fn new(config: Config, db: Db) -> Self {
        let accounts = AccountService::new(db.clone(), config.jwt_signing_key.clone());
        let goals = GoalService::new(db.clone());
        let workouts = WorkoutService::new(db.clone());

        Self {
            config,
            db,
            accounts,
            goals,
            workouts,
        }
    }
}
