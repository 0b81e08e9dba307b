// src/auth/password.rs

use bcrypt::{BcryptError, hash, verify};

use crate::error::{GroceryError, Result};

// bcrypt is CPU-bound, so both calls run on the blocking pool
pub async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| GroceryError::Internal(anyhow::anyhow!("Password hashing task failed: {}", e)))?
        .map_err(|e: BcryptError| GroceryError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || verify(password, &hash))
        .await
        .map_err(|e| GroceryError::Internal(anyhow::anyhow!("Password verification task failed: {}", e)))?
        .map_err(|e: BcryptError| GroceryError::Internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}
