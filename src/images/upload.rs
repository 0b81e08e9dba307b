// src/images/upload.rs

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error};

use crate::error::{GroceryError, Result};

/// An upload received from a client, fully buffered
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// An upload written to the staging directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub id: String,
    pub filename: String,
    pub mimetype: String,
    pub path: PathBuf,
}

/// Write an upload to `<dir>/<shortid>-<filename>`
pub async fn store_upload(dir: &Path, upload: PendingUpload) -> Result<StoredImage> {
    let filename = sanitize_filename(&upload.filename);
    let id = short_id();
    let path = dir.join(format!("{}-{}", id, filename));
    let mimetype = upload.content_type.unwrap_or_else(|| {
        mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .to_string()
    });

    if let Err(e) = write_file(dir, &path, &upload.bytes).await {
        error!("Error saving file {}: {}", path.display(), e);
        // Don't leave a partial file behind
        let _ = tokio::fs::remove_file(&path).await;
        return Err(GroceryError::Upload(format!(
            "Error storing image on server: {}",
            e
        )));
    }

    debug!("Stored upload {} ({} bytes)", path.display(), upload.bytes.len());

    Ok(StoredImage {
        id,
        filename,
        mimetype,
        path,
    })
}

async fn write_file(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.flush().await
}

/// Keep only the final path component so a client cannot write outside
/// the staging directory
fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    match base {
        "" | "." | ".." => "upload".to_string(),
        other => other.to_string(),
    }
}

fn short_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}
