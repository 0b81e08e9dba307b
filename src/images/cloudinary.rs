// src/images/cloudinary.rs
// Signed uploads and deletes against the Cloudinary REST API

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::{ImageHost, StoredImage};
use crate::config::ImageConfig;
use crate::error::{GroceryError, Result};

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

pub struct CloudinaryHost {
    client: reqwest::Client,
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryHost {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    /// Point the client somewhere other than the public API
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", self.api_base.trim_end_matches('/'), self.cloud_name, action)
    }

    async fn upload_inner(&self, image: &StoredImage) -> anyhow::Result<String> {
        let bytes = tokio::fs::read(&image.path)
            .await
            .with_context(|| format!("Failed to read staged file {}", image.path.display()))?;

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(&[("timestamp", timestamp.as_str())], &self.api_secret);

        let file = reqwest::multipart::Part::bytes(bytes)
            .file_name(image.filename.clone())
            .mime_str(&image.mimetype)
            .context("Invalid image mimetype")?;

        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .context("Failed to send upload request")?
            .error_for_status()
            .context("Non-2xx from image upload")?
            .json::<UploadResponse>()
            .await
            .context("Failed to parse upload response")?;

        Ok(response.secure_url)
    }

    async fn delete_inner(&self, public_id: &str) -> anyhow::Result<String> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );

        let params = [
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp),
            ("api_key", self.api_key.clone()),
            ("signature", signature),
            ("signature_algorithm", "sha256".to_string()),
        ];

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await
            .context("Failed to send destroy request")?
            .error_for_status()
            .context("Non-2xx from image destroy")?
            .json::<DestroyResponse>()
            .await
            .context("Failed to parse destroy response")?;

        Ok(response.result)
    }
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    async fn upload(&self, image: &StoredImage) -> Result<String> {
        let url = self
            .upload_inner(image)
            .await
            .map_err(|e| GroceryError::ImageHost(format!("Error uploading image: {:#}", e)))?;

        info!("Uploaded image {} to {}", image.filename, url);
        Ok(url)
    }

    async fn delete(&self, image_url: &str) -> Result<()> {
        let public_id = public_id_from_url(image_url).ok_or_else(|| {
            GroceryError::ImageHost(format!("Cannot derive image id from {}", image_url))
        })?;

        let result = self
            .delete_inner(&public_id)
            .await
            .map_err(|e| GroceryError::ImageHost(format!("Error deleting image: {:#}", e)))?;

        debug!("Destroy {} -> {}", public_id, result);
        Ok(())
    }
}

/// Request signature: the params sorted by name and joined as `k=v&k=v`,
/// followed by the API secret, hashed with sha256
pub(crate) fn sign(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// The host identifies images by the last path segment of their URL,
/// minus the extension
pub fn public_id_from_url(url: &str) -> Option<String> {
    let name = url.rsplit('/').next()?;
    let id = match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    };

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_from_url() {
        assert_eq!(
            public_id_from_url("https://res.cloudinary.com/demo/image/upload/v1612/abc123.jpg"),
            Some("abc123".to_string())
        );
        assert_eq!(
            public_id_from_url("https://res.cloudinary.com/demo/image/upload/abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(public_id_from_url("https://host/path/"), None);
        assert_eq!(public_id_from_url("https://host/.png"), None);
    }

    #[test]
    fn test_signature_sorts_params() {
        let a = sign(&[("timestamp", "1"), ("public_id", "x")], "secret");
        let b = sign(&[("public_id", "x"), ("timestamp", "1")], "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let mut hasher = Sha256::new();
        hasher.update(b"public_id=x&timestamp=1secret");
        assert_eq!(a, hex::encode(hasher.finalize()));
    }

    #[test]
    fn test_endpoint_layout() {
        let host = CloudinaryHost::new(&ImageConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            upload_dir: "public/images".into(),
        })
        .with_api_base("http://localhost:9000/v1_1/");

        assert_eq!(host.endpoint("upload"), "http://localhost:9000/v1_1/demo/image/upload");
    }
}
