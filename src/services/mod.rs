// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod account;
pub mod goal;
pub mod workout;

pub use account::{AccountService, LoginInput, RegisterInput, Session};
pub use goal::{GoalInput, GoalProgress, GoalService};
pub use workout::{WorkoutInput, WorkoutService};
