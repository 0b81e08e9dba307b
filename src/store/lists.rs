// src/store/lists.rs

use sqlx::SqlitePool;
use std::collections::HashMap;

use super::models::{GroceryList, Item};
use crate::db::{new_id, now};
use crate::error::Result;

#[derive(Clone)]
pub struct GroceryListStore {
    db: SqlitePool,
}

impl GroceryListStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// The household list: the oldest one created
    pub async fn first(&self) -> Result<Option<GroceryList>> {
        let id: Option<(String,)> =
            sqlx::query_as("SELECT id FROM grocery_lists ORDER BY created_at, rowid LIMIT 1")
                .fetch_optional(&self.db)
                .await?;

        match id {
            Some((id,)) => self.find_by_id(&id).await,
            None => Ok(None),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<GroceryList>> {
        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM grocery_lists WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        if exists.is_none() {
            return Ok(None);
        }

        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT i.id, i.name FROM grocery_list_items gi
            JOIN items i ON i.id = gi.item_id
            WHERE gi.grocery_list_id = ?
            ORDER BY gi.position
            "#,
        )
        .bind(id)
        .fetch_all(&self.db)
        .await?;

        Ok(Some(GroceryList {
            id: id.to_string(),
            items,
        }))
    }

    pub async fn create(&self) -> Result<GroceryList> {
        let id = new_id();

        sqlx::query("INSERT INTO grocery_lists (id, created_at) VALUES (?, ?)")
            .bind(&id)
            .bind(now())
            .execute(&self.db)
            .await?;

        Ok(GroceryList {
            id,
            items: Vec::new(),
        })
    }

    /// Append an item to the end of the list
    pub async fn push_item(&self, list_id: &str, item_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO grocery_list_items (grocery_list_id, position, item_id)
            VALUES (?, (SELECT COALESCE(MAX(position), -1) + 1 FROM grocery_list_items WHERE grocery_list_id = ?), ?)
            "#,
        )
        .bind(list_id)
        .bind(list_id)
        .bind(item_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Remove the earliest occurrence of an item. Returns whether one was found.
    pub async fn remove_first(&self, list_id: &str, item_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM grocery_list_items
            WHERE grocery_list_id = ?
              AND position = (
                SELECT MIN(position) FROM grocery_list_items
                WHERE grocery_list_id = ? AND item_id = ?
              )
            "#,
        )
        .bind(list_id)
        .bind(list_id)
        .bind(item_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn clear(&self, list_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM grocery_list_items WHERE grocery_list_id = ?")
            .bind(list_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Rewrite the list so it holds exactly `item_ids`, in that order.
    ///
    /// The current entries are read and compared inside the same write
    /// transaction, so an entry added concurrently is never dropped.
    pub async fn reorder(&self, list_id: &str, item_ids: &[String]) -> Result<Reorder> {
        let mut tx = self.db.begin().await?;

        // Take the write lock before reading the current entries
        let touched = sqlx::query("UPDATE grocery_lists SET id = id WHERE id = ?")
            .bind(list_id)
            .execute(&mut *tx)
            .await?;
        if touched.rows_affected() == 0 {
            return Ok(Reorder::Missing);
        }

        let current: Vec<(String,)> = sqlx::query_as(
            "SELECT item_id FROM grocery_list_items WHERE grocery_list_id = ? ORDER BY position",
        )
        .bind(list_id)
        .fetch_all(&mut *tx)
        .await?;

        if current.len() != item_ids.len() {
            return Ok(Reorder::Stale);
        }
        if !same_entries(current.iter().map(|(id,)| id.as_str()), item_ids) {
            return Ok(Reorder::Mismatch);
        }

        sqlx::query("DELETE FROM grocery_list_items WHERE grocery_list_id = ?")
            .bind(list_id)
            .execute(&mut *tx)
            .await?;

        for (position, item_id) in item_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO grocery_list_items (grocery_list_id, position, item_id) VALUES (?, ?, ?)",
            )
            .bind(list_id)
            .bind(position as i64)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Reorder::Applied)
    }
}

/// Result of a reorder request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reorder {
    Applied,
    /// The list does not exist
    Missing,
    /// The request holds a different number of entries than the list
    Stale,
    /// Same length, but not the same entries
    Mismatch,
}

/// Multiset equality, so duplicated entries must be reordered, not dropped
fn same_entries<'a>(current: impl Iterator<Item = &'a str>, sorted: &[String]) -> bool {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for id in current {
        *counts.entry(id).or_default() += 1;
    }
    for id in sorted {
        *counts.entry(id.as_str()).or_default() -= 1;
    }
    counts.values().all(|c| *c == 0)
}
