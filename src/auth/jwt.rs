// src/auth/jwt.rs

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::models::{TokenPair, User};
use crate::config::AuthConfig;
use crate::error::{GroceryError, Result};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: User,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at timestamp
}

/// Signs and verifies the two token kinds. Access and refresh tokens use
/// separate secrets, so one can never stand in for the other.
#[derive(Clone)]
pub struct TokenIssuer {
    access_secret: String,
    refresh_secret: String,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_secret: config.access_token_secret.clone(),
            refresh_secret: config.refresh_token_secret.clone(),
            access_ttl: chrono::Duration::minutes(config.access_token_minutes),
            refresh_ttl: chrono::Duration::days(config.refresh_token_days),
        }
    }

    pub fn create_access_token(&self, user: &User) -> Result<String> {
        sign(user, &self.access_secret, self.access_ttl)
    }

    pub fn create_refresh_token(&self, user: &User) -> Result<String> {
        sign(user, &self.refresh_secret, self.refresh_ttl)
    }

    pub fn create_pair(&self, user: &User) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_access_token(user)?,
            refresh_token: self.create_refresh_token(user)?,
        })
    }

    pub fn verify_access(&self, token: &str) -> Option<User> {
        verify(token, &self.access_secret)
    }

    pub fn verify_refresh(&self, token: &str) -> Option<User> {
        verify(token, &self.refresh_secret)
    }
}

fn sign(user: &User, secret: &str, ttl: chrono::Duration) -> Result<String> {
    let now = chrono::Utc::now();
    let expiration = now
        .checked_add_signed(ttl)
        .ok_or_else(|| GroceryError::Token("Failed to calculate expiration".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        user: user.clone(),
        exp: expiration,
        iat: now.timestamp() as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &key)
        .map_err(|e| GroceryError::Token(format!("Failed to create token: {}", e)))
}

fn verify(token: &str, secret: &str) -> Option<User> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims.user)
        .ok()
}
