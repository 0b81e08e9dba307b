// src/services/catalog.rs
// Areas, their images, and the items filed under them

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{GroceryError, Result};
use crate::images::{ImageHost, PendingUpload, store_upload};
use crate::store::{Area, AreaStore, Item, ItemStore, normalize_name};

pub struct CatalogService {
    areas: AreaStore,
    items: ItemStore,
    images: Arc<dyn ImageHost>,
    upload_dir: PathBuf,
}

impl CatalogService {
    pub fn new(
        areas: AreaStore,
        items: ItemStore,
        images: Arc<dyn ImageHost>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            areas,
            items,
            images,
            upload_dir,
        }
    }

    pub async fn areas(&self) -> Result<Vec<Area>> {
        self.areas.all().await
    }

    pub async fn items(&self) -> Result<Vec<Item>> {
        self.items.all().await
    }

    pub async fn items_for_area(&self, area_id: &str) -> Result<Vec<Item>> {
        Ok(self.require_area(area_id).await?.items)
    }

    pub async fn add_area(&self, name: &str, upload: PendingUpload) -> Result<Area> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GroceryError::invalid_input("Area name is required"));
        }

        let image_url = self.publish_image(upload).await?;
        let area = self.areas.create(name, Some(&image_url)).await?;

        info!("Created area {} ({})", area.name, area.id);
        Ok(area)
    }

    pub async fn update_area(
        &self,
        area_id: &str,
        name: Option<&str>,
        upload: Option<PendingUpload>,
    ) -> Result<Area> {
        let area = self.require_area(area_id).await?;

        let new_image = match upload {
            Some(upload) => Some(self.publish_image(upload).await?),
            None => None,
        };
        let name = name.map(str::trim).filter(|n| !n.is_empty());

        let updated = self
            .areas
            .update(area_id, name, new_image.as_deref())
            .await?
            .ok_or_else(|| GroceryError::not_found("Area not found"))?;

        if new_image.is_some() {
            if let Some(old) = area.image_url.as_deref() {
                self.discard_image(old).await;
            }
        }

        Ok(updated)
    }

    pub async fn delete_area(&self, area_id: &str) -> Result<Area> {
        let area = self
            .areas
            .delete(area_id)
            .await?
            .ok_or_else(|| GroceryError::not_found("Area not found"))?;

        if let Some(url) = area.image_url.as_deref() {
            self.discard_image(url).await;
        }

        info!("Deleted area {} ({})", area.name, area.id);
        Ok(area)
    }

    pub async fn add_item_to_area(&self, name: &str, area_id: &str) -> Result<Item> {
        let area = self.require_area(area_id).await?;
        let name = normalize_name(name);

        let item = match self.items.find_by_name(&name).await? {
            Some(existing) if area.contains(&existing.id) => {
                return Err(GroceryError::conflict(format!(
                    "Item already exists in {}",
                    area.name
                )));
            }
            Some(existing) => existing,
            None => self.items.create(&name).await?,
        };

        self.areas.attach_item(&area.id, &item.id).await?;
        Ok(item)
    }

    pub async fn delete_item_from_area(&self, area_id: &str, item_id: &str) -> Result<Item> {
        let area = self.require_area(area_id).await?;

        let item = area
            .items
            .into_iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| GroceryError::not_found("Item not found in area"))?;

        self.areas.detach_item(area_id, item_id).await?;
        Ok(item)
    }

    pub async fn update_item(&self, name: &str, item_id: &str) -> Result<Item> {
        self.items
            .rename(item_id, name)
            .await?
            .ok_or_else(|| GroceryError::not_found("Item not found"))
    }

    async fn require_area(&self, area_id: &str) -> Result<Area> {
        self.areas
            .find_by_id(area_id)
            .await?
            .ok_or_else(|| GroceryError::not_found("Area not found"))
    }

    /// Stage an upload locally, then push it to the image host
    async fn publish_image(&self, upload: PendingUpload) -> Result<String> {
        let stored = store_upload(&self.upload_dir, upload).await?;

        self.images.upload(&stored).await.inspect_err(|e| {
            warn!("Error uploading image {}: {}", stored.filename, e);
        })
    }

    /// Image deletes never fail the surrounding mutation
    async fn discard_image(&self, url: &str) {
        if let Err(e) = self.images.delete(url).await {
            warn!("Failed to delete image {}: {}", url, e);
        }
    }
}
