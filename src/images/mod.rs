// src/images/mod.rs
// Area images: local staging of uploads and the remote image host

pub mod cloudinary;
pub mod upload;

use async_trait::async_trait;

use crate::error::Result;

pub use cloudinary::{CloudinaryHost, public_id_from_url};
pub use upload::{PendingUpload, StoredImage, store_upload};

/// Remote storage that serves area images
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload a staged file and return its public https URL
    async fn upload(&self, image: &StoredImage) -> Result<String>;

    /// Remove a previously uploaded image, identified by its URL
    async fn delete(&self, image_url: &str) -> Result<()>;
}
