// src/services/mod.rs
// Domain operations behind the GraphQL resolvers

pub mod catalog;
pub mod grocery;

pub use catalog::CatalogService;
pub use grocery::GroceryListService;
