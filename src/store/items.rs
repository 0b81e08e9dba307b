// src/store/items.rs

use sqlx::SqlitePool;

use super::models::Item;
use crate::db::{new_id, now};
use crate::error::{GroceryError, Result};

/// Item names are case-insensitive; the stored form is lowercase
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Clone)]
pub struct ItemStore {
    db: SqlitePool,
}

impl ItemStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn all(&self) -> Result<Vec<Item>> {
        Ok(
            sqlx::query_as::<_, Item>("SELECT id, name FROM items ORDER BY name")
                .fetch_all(&self.db)
                .await?,
        )
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Item>> {
        Ok(
            sqlx::query_as::<_, Item>("SELECT id, name FROM items WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.db)
                .await?,
        )
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Item>> {
        Ok(
            sqlx::query_as::<_, Item>("SELECT id, name FROM items WHERE name = ?")
                .bind(normalize_name(name))
                .fetch_optional(&self.db)
                .await?,
        )
    }

    pub async fn create(&self, name: &str) -> Result<Item> {
        let item = Item {
            id: new_id(),
            name: normalize_name(name),
        };
        if item.name.is_empty() {
            return Err(GroceryError::invalid_input("Item name is required"));
        }

        sqlx::query("INSERT INTO items (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&item.id)
            .bind(&item.name)
            .bind(now())
            .execute(&self.db)
            .await
            .map_err(conflict_on_unique)?;

        Ok(item)
    }

    /// Look an item up by name, creating it when it does not exist yet
    pub async fn find_or_create(&self, name: &str) -> Result<Item> {
        match self.find_by_name(name).await? {
            Some(item) => Ok(item),
            None => self.create(name).await,
        }
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<Option<Item>> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(GroceryError::invalid_input("Item name is required"));
        }

        let result = sqlx::query("UPDATE items SET name = ? WHERE id = ?")
            .bind(&name)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(conflict_on_unique)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Item {
            id: id.to_string(),
            name,
        }))
    }
}

fn conflict_on_unique(err: sqlx::Error) -> GroceryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            GroceryError::conflict("Item already exists")
        }
        _ => GroceryError::Database(err),
    }
}
