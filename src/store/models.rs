// src/store/models.rs

use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Item {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct AreaRow {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

/// An area with its items populated in position order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub items: Vec<Item>,
}

impl Area {
    pub(crate) fn from_row(row: AreaRow, items: Vec<Item>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            items,
        }
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|i| i.id == item_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryList {
    pub id: String,
    pub items: Vec<Item>,
}
