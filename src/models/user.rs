// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered account stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address, lowercased (unique)
    pub email: String,
    /// PBKDF2 hash in `pbkdf2-sha256$<iterations>$<salt>$<hash>` form
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}
