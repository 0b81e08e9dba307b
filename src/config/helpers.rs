// src/config/helpers.rs
// Helper functions for loading environment variables

use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

/// Where configuration values come from. The process environment in
/// production, a map in tests.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for std::collections::HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        std::collections::HashMap::get(self, key).cloned()
    }
}

pub fn require_env(source: &dyn ConfigSource, key: &str) -> Result<String> {
    source
        .get(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("Missing required env var: {}", key))
}

pub fn env_or(source: &dyn ConfigSource, key: &str, default: &str) -> String {
    source.get(key).unwrap_or_else(|| default.to_string())
}

pub fn env_parsed_or<T>(source: &dyn ConfigSource, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match source.get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Failed to parse {}", key)),
        None => Ok(default),
    }
}
