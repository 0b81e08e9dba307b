// src/state.rs
// Application state shared by the HTTP handlers and GraphQL resolvers

use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

use crate::auth::AuthService;
use crate::config::GroceryConfig;
use crate::images::{CloudinaryHost, ImageHost};
use crate::services::{CatalogService, GroceryListService};
use crate::store::{AreaStore, GroceryListStore, ItemStore};

#[derive(Clone)]
pub struct AppState {
    pub sqlite_pool: SqlitePool,
    pub config: Arc<GroceryConfig>,
    pub auth_service: Arc<AuthService>,
    pub catalog_service: Arc<CatalogService>,
    pub grocery_service: Arc<GroceryListService>,
}

impl AppState {
    /// Production wiring: images go to Cloudinary
    pub fn new(pool: SqlitePool, config: GroceryConfig) -> Self {
        let images: Arc<dyn ImageHost> = Arc::new(CloudinaryHost::new(&config.images));
        Self::with_image_host(pool, config, images)
    }

    pub fn with_image_host(
        pool: SqlitePool,
        config: GroceryConfig,
        images: Arc<dyn ImageHost>,
    ) -> Self {
        let items = ItemStore::new(pool.clone());

        info!("Initializing auth service");
        let auth_service = Arc::new(AuthService::new(pool.clone(), &config.auth));

        let catalog_service = Arc::new(CatalogService::new(
            AreaStore::new(pool.clone()),
            items.clone(),
            images,
            config.images.upload_dir.clone(),
        ));

        let grocery_service = Arc::new(GroceryListService::new(
            GroceryListStore::new(pool.clone()),
            items,
        ));

        Self {
            sqlite_pool: pool,
            config: Arc::new(config),
            auth_service,
            catalog_service,
            grocery_service,
        }
    }
}
