// src/store/mod.rs
// SQLite access for the catalog and the grocery list

pub mod areas;
pub mod items;
pub mod lists;
pub mod models;

pub use areas::AreaStore;
pub use items::{ItemStore, normalize_name};
pub use lists::{GroceryListStore, Reorder};
pub use models::{Area, GroceryList, Item};
