// src/auth/mod.rs
// Password hashing, token issuance and request authentication

pub mod jwt;
pub mod models;
pub mod password;
pub mod service;

pub use jwt::{Claims, TokenIssuer};
pub use models::{Authentication, LoginResponse, RegisterRequest, TokenPair, User};
pub use service::AuthService;
