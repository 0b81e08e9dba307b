// src/config/server.rs
// Server, database, and logging configuration

use anyhow::Result;

use super::helpers::{ConfigSource, env_or, env_parsed_or};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn load(source: &dyn ConfigSource) -> Result<Self> {
        Ok(Self {
            host: env_or(source, "GROCERY_HOST", "0.0.0.0"),
            port: env_parsed_or(source, "GROCERY_PORT", 4000)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn load(source: &dyn ConfigSource) -> Result<Self> {
        Ok(Self {
            url: env_or(source, "DATABASE_URL", "sqlite://grocery.db"),
            max_connections: env_parsed_or(source, "GROCERY_SQLITE_MAX_CONNECTIONS", 5)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn load(source: &dyn ConfigSource) -> Result<Self> {
        let format = match env_or(source, "GROCERY_LOG_FORMAT", "text").to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" => LogFormat::Text,
            other => anyhow::bail!("Invalid GROCERY_LOG_FORMAT '{}', expected 'text' or 'json'", other),
        };

        Ok(Self {
            level: env_or(source, "GROCERY_LOG_LEVEL", "info"),
            format,
        })
    }
}
