// src/api/mod.rs

pub mod http;

pub use http::create_router;
