// src/config/images.rs
// Image host credentials and local upload staging

use anyhow::Result;
use std::path::PathBuf;

use super::helpers::{ConfigSource, env_or, require_env};

#[derive(Clone)]
pub struct ImageConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub upload_dir: PathBuf,
}

impl ImageConfig {
    pub fn load(source: &dyn ConfigSource) -> Result<Self> {
        Ok(Self {
            cloud_name: require_env(source, "GROCERY_CLOUD_NAME")?,
            api_key: require_env(source, "GROCERY_CLOUD_API")?,
            api_secret: require_env(source, "GROCERY_CLOUD_API_SECRET")?,
            upload_dir: PathBuf::from(env_or(source, "GROCERY_UPLOAD_DIR", "public/images")),
        })
    }
}

impl std::fmt::Debug for ImageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("upload_dir", &self.upload_dir)
            .finish()
    }
}
