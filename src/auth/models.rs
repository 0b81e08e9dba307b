// src/auth/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public view of a user. This is also the payload carried inside tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserWithPassword {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

impl From<UserWithPassword> for User {
    fn from(user: UserWithPassword) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub user: User,
    pub tokens: TokenPair,
}

/// Outcome of inspecting the token headers of one request
#[derive(Debug, Clone)]
pub enum Authentication {
    Anonymous,
    /// The access token verified
    Verified(User),
    /// The access token was missing or stale, but the refresh token was
    /// good. The new pair must be sent back to the client.
    Refreshed { user: User, tokens: TokenPair },
}

impl Authentication {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Verified(user) | Self::Refreshed { user, .. } => Some(user),
        }
    }

    pub fn into_parts(self) -> (Option<User>, Option<TokenPair>) {
        match self {
            Self::Anonymous => (None, None),
            Self::Verified(user) => (Some(user), None),
            Self::Refreshed { user, tokens } => (Some(user), Some(tokens)),
        }
    }
}
