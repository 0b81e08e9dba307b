// src/lib.rs

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod images;
pub mod services;
pub mod state;
pub mod store;

// Export commonly used items
pub use config::GroceryConfig;
pub use error::{GroceryError, Result};
pub use state::AppState;
