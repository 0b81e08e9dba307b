// src/store/areas.rs

use sqlx::SqlitePool;

use super::models::{Area, AreaRow, Item};
use crate::db::{new_id, now};
use crate::error::Result;

#[derive(Clone)]
pub struct AreaStore {
    db: SqlitePool,
}

impl AreaStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn all(&self) -> Result<Vec<Area>> {
        let rows = sqlx::query_as::<_, AreaRow>(
            "SELECT id, name, image_url FROM areas ORDER BY created_at, name",
        )
        .fetch_all(&self.db)
        .await?;

        let mut areas = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.items_for_area(&row.id).await?;
            areas.push(Area::from_row(row, items));
        }
        Ok(areas)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Area>> {
        let Some(row) = self.find_row(id).await? else {
            return Ok(None);
        };
        let items = self.items_for_area(&row.id).await?;
        Ok(Some(Area::from_row(row, items)))
    }

    pub async fn create(&self, name: &str, image_url: Option<&str>) -> Result<Area> {
        let id = new_id();

        sqlx::query("INSERT INTO areas (id, name, image_url, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(image_url)
            .bind(now())
            .execute(&self.db)
            .await?;

        Ok(Area {
            id,
            name: name.to_string(),
            image_url: image_url.map(str::to_string),
            items: Vec::new(),
        })
    }

    /// Update whichever fields are given. Returns the refreshed area, or
    /// `None` when it does not exist.
    pub async fn update(
        &self,
        id: &str,
        name: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Option<Area>> {
        let result = sqlx::query(
            "UPDATE areas SET name = COALESCE(?, name), image_url = COALESCE(?, image_url) WHERE id = ?",
        )
        .bind(name)
        .bind(image_url)
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    /// Delete an area, returning it as it was just before removal
    pub async fn delete(&self, id: &str) -> Result<Option<Area>> {
        let mut tx = self.db.begin().await?;

        let Some(row) = sqlx::query_as::<_, AreaRow>(
            "SELECT id, name, image_url FROM areas WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT i.id, i.name FROM area_items ai
            JOIN items i ON i.id = ai.item_id
            WHERE ai.area_id = ?
            ORDER BY ai.position
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM areas WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(Area::from_row(row, items)))
    }

    pub async fn items_for_area(&self, area_id: &str) -> Result<Vec<Item>> {
        Ok(sqlx::query_as::<_, Item>(
            r#"
            SELECT i.id, i.name FROM area_items ai
            JOIN items i ON i.id = ai.item_id
            WHERE ai.area_id = ?
            ORDER BY ai.position
            "#,
        )
        .bind(area_id)
        .fetch_all(&self.db)
        .await?)
    }

    pub async fn contains_item(&self, area_id: &str, item_id: &str) -> Result<bool> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM area_items WHERE area_id = ? AND item_id = ?")
                .bind(area_id)
                .bind(item_id)
                .fetch_one(&self.db)
                .await?;

        Ok(count.0 > 0)
    }

    /// Append an item to the end of the area. Attaching twice is a no-op.
    pub async fn attach_item(&self, area_id: &str, item_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO area_items (area_id, item_id, position)
            VALUES (?, ?, (SELECT COALESCE(MAX(position), -1) + 1 FROM area_items WHERE area_id = ?))
            "#,
        )
        .bind(area_id)
        .bind(item_id)
        .bind(area_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Remove the link between area and item. Returns whether it existed.
    pub async fn detach_item(&self, area_id: &str, item_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM area_items WHERE area_id = ? AND item_id = ?")
            .bind(area_id)
            .bind(item_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_row(&self, id: &str) -> Result<Option<AreaRow>> {
        Ok(
            sqlx::query_as::<_, AreaRow>("SELECT id, name, image_url FROM areas WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.db)
                .await?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::store::ItemStore;

    async fn stores() -> (AreaStore, ItemStore) {
        let pool = create_memory_pool().await.unwrap();
        (AreaStore::new(pool.clone()), ItemStore::new(pool))
    }

    #[tokio::test]
    async fn test_items_keep_insertion_order() {
        let (areas, items) = stores().await;
        let dairy = areas.create("Dairy", None).await.unwrap();
        let milk = items.create("milk").await.unwrap();
        let butter = items.create("butter").await.unwrap();

        areas.attach_item(&dairy.id, &milk.id).await.unwrap();
        areas.attach_item(&dairy.id, &butter.id).await.unwrap();
        areas.attach_item(&dairy.id, &milk.id).await.unwrap();

        let found = areas.find_by_id(&dairy.id).await.unwrap().unwrap();
        assert_eq!(found.items, vec![milk.clone(), butter]);
        assert!(areas.contains_item(&dairy.id, &milk.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_only_touches_given_fields() {
        let (areas, _) = stores().await;
        let area = areas.create("Produce", Some("https://img/a.png")).await.unwrap();

        let renamed = areas.update(&area.id, Some("Fruit"), None).await.unwrap().unwrap();
        assert_eq!(renamed.name, "Fruit");
        assert_eq!(renamed.image_url.as_deref(), Some("https://img/a.png"));

        assert!(areas.update("missing", Some("x"), None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_area_and_keeps_items() {
        let (areas, items) = stores().await;
        let area = areas.create("Bakery", None).await.unwrap();
        let bread = items.create("bread").await.unwrap();
        areas.attach_item(&area.id, &bread.id).await.unwrap();

        let deleted = areas.delete(&area.id).await.unwrap().unwrap();
        assert_eq!(deleted.items, vec![bread.clone()]);
        assert!(areas.find_by_id(&area.id).await.unwrap().is_none());
        assert!(items.find_by_id(&bread.id).await.unwrap().is_some());
        assert!(areas.delete(&area.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_detach_reports_missing_link() {
        let (areas, items) = stores().await;
        let area = areas.create("Frozen", None).await.unwrap();
        let peas = items.create("peas").await.unwrap();

        assert!(!areas.detach_item(&area.id, &peas.id).await.unwrap());
        areas.attach_item(&area.id, &peas.id).await.unwrap();
        assert!(areas.detach_item(&area.id, &peas.id).await.unwrap());
        assert!(areas.items_for_area(&area.id).await.unwrap().is_empty());
    }
}
