// src/config/auth.rs
// Token signing and password hashing settings

use anyhow::Result;

use super::helpers::{ConfigSource, env_parsed_or, require_env};

#[derive(Clone)]
pub struct AuthConfig {
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn load(source: &dyn ConfigSource) -> Result<Self> {
        let bcrypt_cost: u32 = env_parsed_or(source, "GROCERY_BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            anyhow::bail!("GROCERY_BCRYPT_COST must be between 4 and 31, got {}", bcrypt_cost);
        }

        Ok(Self {
            access_token_secret: require_env(source, "GROCERY_ACCESS_TOKEN_SECRET")?,
            refresh_token_secret: require_env(source, "GROCERY_REFRESH_TOKEN_SECRET")?,
            access_token_minutes: env_parsed_or(source, "GROCERY_ACCESS_TOKEN_MINUTES", 15)?,
            refresh_token_days: env_parsed_or(source, "GROCERY_REFRESH_TOKEN_DAYS", 10)?,
            bcrypt_cost,
        })
    }
}

// Secrets stay out of logs
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
