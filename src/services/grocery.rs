// src/services/grocery.rs
// The shared grocery list

use crate::error::{GroceryError, Result};
use crate::store::{GroceryList, GroceryListStore, ItemStore, Reorder};

pub struct GroceryListService {
    lists: GroceryListStore,
    items: ItemStore,
}

impl GroceryListService {
    pub fn new(lists: GroceryListStore, items: ItemStore) -> Self {
        Self { lists, items }
    }

    pub async fn grocery_list(&self) -> Result<GroceryList> {
        self.lists
            .first()
            .await?
            .ok_or_else(|| GroceryError::not_found("Grocery list not found"))
    }

    pub async fn create_grocery_list(&self) -> Result<GroceryList> {
        self.lists.create().await
    }

    /// Append an item, found by id, then by name, or created from the name
    pub async fn add_item(
        &self,
        grocery_id: &str,
        item_id: &str,
        name: Option<&str>,
    ) -> Result<GroceryList> {
        self.require_list(grocery_id, "Grocery list not found").await?;

        let item = match self.items.find_by_id(item_id).await? {
            Some(item) => item,
            None => match name.map(str::trim).filter(|n| !n.is_empty()) {
                Some(name) => self.items.find_or_create(name).await?,
                None => return Err(GroceryError::not_found("Item not found")),
            },
        };

        self.lists.push_item(grocery_id, &item.id).await?;
        self.require_list(grocery_id, "Grocery list not found").await
    }

    pub async fn remove_item(&self, grocery_id: &str, item_id: &str) -> Result<GroceryList> {
        self.require_list(grocery_id, "Grocery list not found").await?;

        if !self.lists.remove_first(grocery_id, item_id).await? {
            return Err(GroceryError::not_found("Item not found on grocery list"));
        }

        self.require_list(grocery_id, "Grocery list not found").await
    }

    pub async fn reset(&self, grocery_id: &str) -> Result<GroceryList> {
        self.require_list(grocery_id, "Grocery list not found").await?;
        self.lists.clear(grocery_id).await?;
        self.require_list(grocery_id, "Grocery list not found").await
    }

    /// Reorder the list. A count mismatch means the client is looking at a
    /// stale list, so nothing changes.
    pub async fn sort(&self, grocery_id: &str, sorted_ids: &[String]) -> Result<GroceryList> {
        match self.lists.reorder(grocery_id, sorted_ids).await? {
            Reorder::Missing => Err(GroceryError::not_found("List not found")),
            Reorder::Mismatch => Err(GroceryError::invalid_input(
                "Sorted items do not match grocery list",
            )),
            Reorder::Stale | Reorder::Applied => self.require_list(grocery_id, "List not found").await,
        }
    }

    async fn require_list(&self, grocery_id: &str, missing: &str) -> Result<GroceryList> {
        self.lists
            .find_by_id(grocery_id)
            .await?
            .ok_or_else(|| GroceryError::not_found(missing))
    }
}
