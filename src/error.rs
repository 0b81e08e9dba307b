// src/error.rs
// Domain error type and its mapping onto GraphQL errors

use async_graphql::ErrorExtensions;
use thiserror::Error;
use tracing::error;

/// Main error type for the grocery backend
#[derive(Error, Debug)]
pub enum GroceryError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Invalid Password")]
    InvalidPassword,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Upload(String),

    #[error("{0}")]
    ImageHost(String),

    #[error("token error: {0}")]
    Token(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience type alias for Result using GroceryError
pub type Result<T> = std::result::Result<T, GroceryError>;

impl GroceryError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Stable machine-readable code exposed as `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidPassword => "INVALID_CREDENTIALS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidInput(_) => "BAD_USER_INPUT",
            Self::Upload(_) => "UPLOAD_FAILED",
            Self::ImageHost(_) => "IMAGE_HOST_ERROR",
            Self::Token(_) => "TOKEN_ERROR",
            Self::Database(_) | Self::Io(_) | Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Message safe to hand to clients. Infrastructure failures are logged
    /// in full and replaced by a generic message.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(e) => {
                error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            Self::Io(e) => {
                error!("I/O error: {:?}", e);
                "Internal server error".to_string()
            }
            Self::Internal(e) => {
                error!("Internal error: {:?}", e);
                "Internal server error".to_string()
            }
            Self::Token(e) => {
                error!("Token error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn into_graphql(self) -> async_graphql::Error {
        self.extend()
    }
}

impl ErrorExtensions for GroceryError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}

/// Extension trait for converting domain results at the resolver boundary
pub trait IntoGraphqlResult<T> {
    fn into_gql(self) -> async_graphql::Result<T>;
}

impl<T> IntoGraphqlResult<T> for Result<T> {
    fn into_gql(self) -> async_graphql::Result<T> {
        self.map_err(GroceryError::into_graphql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_their_message() {
        let err = GroceryError::not_found("Area not found");
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.public_message(), "Area not found");
    }

    #[test]
    fn test_infrastructure_errors_are_masked() {
        let err = GroceryError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_graphql_error_carries_code_extension() {
        let result: Result<()> = Err(GroceryError::Unauthorized);
        let err = result.into_gql().unwrap_err();
        assert_eq!(err.message, "Unauthorized");

        let extensions = err.extensions.expect("extensions set");
        let code = extensions.get("code").expect("code set");
        assert_eq!(code, &async_graphql::Value::from("UNAUTHORIZED"));
    }
}
