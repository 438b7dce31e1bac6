// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod goal;
pub mod progress;
pub mod user;
pub mod workout;

pub use goal::Goal;
pub use progress::{DayDistance, WeeklyProgress};
pub use user::User;
pub use workout::{Intensity, Workout};
