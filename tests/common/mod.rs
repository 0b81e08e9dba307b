// tests/common/mod.rs
// Shared test utilities: in-memory state with a recording image host

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use grocery_list::auth::User;
use grocery_list::config::GroceryConfig;
use grocery_list::db::create_memory_pool;
use grocery_list::error::Result;
use grocery_list::images::{ImageHost, StoredImage};
use grocery_list::state::AppState;

/// Image host that hands out predictable URLs and remembers deletes
#[derive(Default)]
pub struct RecordingImageHost {
    pub uploads: Mutex<Vec<StoredImage>>,
    pub deletes: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageHost for RecordingImageHost {
    async fn upload(&self, image: &StoredImage) -> Result<String> {
        self.uploads.lock().unwrap().push(image.clone());
        Ok(format!("https://images.test/grocery/{}.png", image.id))
    }

    async fn delete(&self, image_url: &str) -> Result<()> {
        self.deletes.lock().unwrap().push(image_url.to_string());
        Ok(())
    }
}

pub struct TestContext {
    pub state: AppState,
    pub images: Arc<RecordingImageHost>,
    pub upload_dir: TempDir,
}

pub fn test_config(upload_dir: &std::path::Path) -> GroceryConfig {
    let source: HashMap<String, String> = [
        ("GROCERY_ACCESS_TOKEN_SECRET", "test-access-secret"),
        ("GROCERY_REFRESH_TOKEN_SECRET", "test-refresh-secret"),
        ("GROCERY_CLOUD_NAME", "test-cloud"),
        ("GROCERY_CLOUD_API", "test-key"),
        ("GROCERY_CLOUD_API_SECRET", "test-secret"),
        // Minimum cost keeps password hashing fast
        ("GROCERY_BCRYPT_COST", "4"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .chain([(
        "GROCERY_UPLOAD_DIR".to_string(),
        upload_dir.to_string_lossy().into_owned(),
    )])
    .collect();

    GroceryConfig::load(&source).expect("test config")
}

pub async fn setup() -> TestContext {
    let pool = create_memory_pool()
        .await
        .expect("Failed to create in-memory database");
    let upload_dir = tempfile::tempdir().expect("tempdir");
    let images = Arc::new(RecordingImageHost::default());

    let state = AppState::with_image_host(pool, test_config(upload_dir.path()), images.clone());

    TestContext {
        state,
        images,
        upload_dir,
    }
}

/// Register a user directly through the service
pub async fn register(state: &AppState, email: &str, password: &str) -> User {
    state
        .auth_service
        .register(grocery_list::auth::RegisterRequest {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: Some(password.to_string()),
        })
        .await
        .expect("register")
}
