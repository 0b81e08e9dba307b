// src/config/mod.rs
// Central configuration for the grocery backend

pub mod auth;
pub mod helpers;
pub mod images;
pub mod server;

use anyhow::Result;

pub use auth::AuthConfig;
pub use helpers::{ConfigSource, EnvSource};
pub use images::ImageConfig;
pub use server::{DatabaseConfig, LogFormat, LoggingConfig, ServerConfig};

/// Main configuration structure - composes all domain configs
#[derive(Debug, Clone)]
pub struct GroceryConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub images: ImageConfig,
}

impl GroceryConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env file
        dotenvy::dotenv().ok(); // Don't fail if .env doesn't exist (for production)
        Self::load(&EnvSource)
    }

    pub fn load(source: &dyn ConfigSource) -> Result<Self> {
        Ok(Self {
            server: ServerConfig::load(source)?,
            database: DatabaseConfig::load(source)?,
            logging: LoggingConfig::load(source)?,
            auth: AuthConfig::load(source)?,
            images: ImageConfig::load(source)?,
        })
    }

    pub fn bind_address(&self) -> String {
        self.server.bind_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn required() -> HashMap<String, String> {
        [
            ("GROCERY_ACCESS_TOKEN_SECRET", "access"),
            ("GROCERY_REFRESH_TOKEN_SECRET", "refresh"),
            ("GROCERY_CLOUD_NAME", "demo"),
            ("GROCERY_CLOUD_API", "key"),
            ("GROCERY_CLOUD_API_SECRET", "secret"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_defaults_apply() {
        let config = GroceryConfig::load(&required()).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:4000");
        assert_eq!(config.database.url, "sqlite://grocery.db");
        assert_eq!(config.auth.access_token_minutes, 15);
        assert_eq!(config.auth.refresh_token_days, 10);
        assert_eq!(config.auth.bcrypt_cost, 12);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.images.upload_dir, std::path::PathBuf::from("public/images"));
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let mut source = required();
        source.remove("GROCERY_REFRESH_TOKEN_SECRET");
        let err = GroceryConfig::load(&source).unwrap_err();
        assert!(err.to_string().contains("GROCERY_REFRESH_TOKEN_SECRET"));
    }

    #[test]
    fn test_unparsable_port_is_an_error() {
        let mut source = required();
        source.insert("GROCERY_PORT".into(), "not-a-port".into());
        assert!(GroceryConfig::load(&source).is_err());
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let config = GroceryConfig::load(&required()).unwrap();
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("\"access\""));
    }
}
