// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration and password login.
//!
//! Passwords are stored as PBKDF2-HMAC-SHA256 hashes with a random salt.
//! A successful register or login yields a session JWT.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use serde::Deserialize;
use std::num::NonZeroU32;
use validator::Validate;

use crate::db::{new_document_id, Db};
use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::User;
use crate::time_utils::now_utc;

static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const PBKDF2_ITERATIONS: u32 = 100_000;
const HASH_SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const CREDENTIAL_LEN: usize = digest::SHA256_OUTPUT_LEN;

/// Well-formed hash that matches no password, checked for unknown emails.
const DUMMY_PASSWORD_HASH: &str = "pbkdf2-sha256$100000$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Registration form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login form.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// A signed-in user and their session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

pub struct AccountService {
    db: Db,
    signing_key: Vec<u8>,
}

impl AccountService {
    pub fn new(db: Db, signing_key: Vec<u8>) -> Self {
        Self { db, signing_key }
    }

    /// Create an account and sign it in.
    pub async fn register(&self, input: RegisterInput) -> Result<Session> {
        let input = RegisterInput {
            name: input.name.trim().to_string(),
            email: normalize_email(&input.email),
            password: input.password,
        };

        input.validate().map_err(|errors| {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_else(|| "Invalid registration details".to_string());
            AppError::InvalidInput(message)
        })?;

        if self.db.find_user_by_email(&input.email).await?.is_some() {
            return Err(AppError::InvalidInput("User already exists".to_string()));
        }

        let user = User {
            id: new_document_id()?,
            name: input.name,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            created_at: now_utc(),
        };

        // The lookup above is only a fast path; the claim on the email is
        // what keeps concurrent registrations from both succeeding.
        if !self.db.insert_user(&user).await? {
            tracing::debug!(email = %user.email, "Duplicate registration rejected");
            return Err(AppError::InvalidInput("User already exists".to_string()));
        }

        tracing::info!(user_id = %user.id, "User registered");

        self.session_for(user)
    }

    /// Check credentials and sign in.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, input: LoginInput) -> Result<Session> {
        let email = normalize_email(&input.email);
        let Some(user) = self.db.find_user_by_email(&email).await? else {
            // Same PBKDF2 cost as a real check so response time does not
            // reveal which emails are registered.
            verify_password(&input.password, DUMMY_PASSWORD_HASH);
            return Err(AppError::Unauthorized);
        };

        if !verify_password(&input.password, &user.password_hash) {
            tracing::warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::Unauthorized);
        }

        tracing::info!(user_id = %user.id, "User logged in");

        self.session_for(user)
    }

    fn session_for(&self, user: User) -> Result<Session> {
        let token = create_jwt(&user.id, &self.signing_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;
        Ok(Session { token, user })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash a password as `pbkdf2-sha256$<iterations>$<salt>$<hash>`.
fn hash_password(password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System random generator failed")))?;

    let mut hash = [0u8; CREDENTIAL_LEN];
    pbkdf2::derive(
        PBKDF2_ALG,
        NonZeroU32::new(PBKDF2_ITERATIONS).unwrap_or(NonZeroU32::MIN),
        &salt,
        password.as_bytes(),
        &mut hash,
    );

    Ok(format!(
        "{}${}${}${}",
        HASH_SCHEME,
        PBKDF2_ITERATIONS,
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash)
    ))
}

/// Split a stored hash into iterations, salt and derived key.
fn parse_stored_hash(stored: &str) -> Option<(NonZeroU32, Vec<u8>, Vec<u8>)> {
    let parts: Vec<&str> = stored.split('$').collect();
    let [scheme, iterations, salt, hash] = parts.as_slice() else {
        return None;
    };
    if *scheme != HASH_SCHEME {
        return None;
    }

    let iterations = iterations.parse::<u32>().ok().and_then(NonZeroU32::new)?;
    let salt = STANDARD_NO_PAD.decode(salt).ok()?;
    let hash = STANDARD_NO_PAD.decode(hash).ok()?;
    Some((iterations, salt, hash))
}

/// Constant-time check of `password` against a stored hash.
fn verify_password(password: &str, stored: &str) -> bool {
    let Some((iterations, salt, hash)) = parse_stored_hash(stored) else {
        return false;
    };

    pbkdf2::verify(PBKDF2_ALG, iterations, &salt, password.as_bytes(), &hash).is_ok()
}
