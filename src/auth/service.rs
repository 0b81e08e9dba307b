// src/auth/service.rs

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::jwt::TokenIssuer;
use super::models::{Authentication, LoginResponse, RegisterRequest, TokenPair, User, UserWithPassword};
use super::password::{hash_password, verify_password};
use crate::config::AuthConfig;
use crate::db::{new_id, now};
use crate::error::{GroceryError, Result};

pub struct AuthService {
    db: SqlitePool,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(db: SqlitePool, config: &AuthConfig) -> Self {
        Self {
            db,
            tokens: TokenIssuer::new(config),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        let email = normalize_email(&req.email);
        if email.is_empty() {
            return Err(GroceryError::invalid_input("Email is required"));
        }

        if self.get_user_by_email(&email).await?.is_some() {
            return Err(GroceryError::conflict("User already registered"));
        }

        let password = req
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| GroceryError::invalid_input("Password is required"))?;

        let password_hash = hash_password(&password, self.bcrypt_cost).await?;
        let user_id = new_id();

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user_id)
        .bind(&req.name)
        .bind(&email)
        .bind(&password_hash)
        .bind(now())
        .execute(&self.db)
        .await?;

        info!("Registered user {}", user_id);

        Ok(User {
            id: user_id,
            name: Some(req.name),
            email,
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let user = self
            .get_user_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| GroceryError::not_found("User not found"))?;

        if !verify_password(password, &user.password_hash).await? {
            return Err(GroceryError::InvalidPassword);
        }

        let user: User = user.into();
        let tokens = self.tokens.create_pair(&user)?;

        info!("User {} logged in", user.id);

        Ok(LoginResponse { user, tokens })
    }

    /// Exchange a refresh token for a new pair. Yields `None` unless the
    /// token verifies and its user still exists.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<Option<(User, TokenPair)>> {
        let Some(claimed) = self.tokens.verify_refresh(refresh_token) else {
            return Ok(None);
        };

        let Some(user) = self.get_user_by_id(&claimed.id).await? else {
            debug!("Refresh token names unknown user {}", claimed.id);
            return Ok(None);
        };

        let user: User = user.into();
        let tokens = self.tokens.create_pair(&user)?;

        info!("Refreshed tokens for user {}", user.id);

        Ok(Some((user, tokens)))
    }

    /// Resolve the requester from the raw `x-token` / `x-refresh-token`
    /// header values.
    pub async fn authenticate(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> Result<Authentication> {
        if let Some(user) = present(access_token).and_then(|t| self.tokens.verify_access(t)) {
            return Ok(Authentication::Verified(user));
        }

        if let Some(token) = present(refresh_token) {
            if let Some((user, tokens)) = self.refresh_tokens(token).await? {
                return Ok(Authentication::Refreshed { user, tokens });
            }
        }

        Ok(Authentication::Anonymous)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, UserWithPassword>(
            "SELECT * FROM users ORDER BY created_at, email",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserWithPassword>> {
        Ok(
            sqlx::query_as::<_, UserWithPassword>("SELECT * FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.db)
                .await?,
        )
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<Option<UserWithPassword>> {
        Ok(
            sqlx::query_as::<_, UserWithPassword>("SELECT * FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(&self.db)
                .await?,
        )
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Clients send the literal string "undefined" when they hold no token
fn present(header: Option<&str>) -> Option<&str> {
    header
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "undefined" && *v != "null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    async fn service() -> AuthService {
        let pool = create_memory_pool().await.unwrap();
        AuthService::new(
            pool,
            &AuthConfig {
                access_token_secret: "access".into(),
                refresh_token_secret: "refresh".into(),
                access_token_minutes: 15,
                refresh_token_days: 10,
                bcrypt_cost: 4,
            },
        )
    }

    fn request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Sam".into(),
            email: email.into(),
            password: Some("correct horse".into()),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = service().await;
        let user = auth.register(request("Sam@Example.com")).await.unwrap();
        assert_eq!(user.email, "sam@example.com");

        let login = auth.login("sam@example.com", "correct horse").await.unwrap();
        assert_eq!(login.user, user);
        assert_eq!(auth.tokens().verify_access(&login.tokens.access_token), Some(user));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_missing_password() {
        let auth = service().await;
        auth.register(request("sam@example.com")).await.unwrap();

        let err = auth.register(request("sam@example.com")).await.unwrap_err();
        assert_eq!(err.to_string(), "User already registered");

        let mut no_password = request("other@example.com");
        no_password.password = None;
        let err = auth.register(no_password).await.unwrap_err();
        assert_eq!(err.to_string(), "Password is required");
    }

    #[tokio::test]
    async fn test_login_failures() {
        let auth = service().await;
        auth.register(request("sam@example.com")).await.unwrap();

        let err = auth.login("nobody@example.com", "x").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");

        let err = auth.login("sam@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, GroceryError::InvalidPassword));
        assert_eq!(err.to_string(), "Invalid Password");
    }

    #[tokio::test]
    async fn test_authenticate_prefers_access_token() {
        let auth = service().await;
        let user = auth.register(request("sam@example.com")).await.unwrap();
        let pair = auth.tokens().create_pair(&user).unwrap();

        let result = auth
            .authenticate(Some(&pair.access_token), Some(&pair.refresh_token))
            .await
            .unwrap();
        assert!(matches!(result, Authentication::Verified(u) if u == user));
    }

    #[tokio::test]
    async fn test_authenticate_falls_back_to_refresh() {
        let auth = service().await;
        let user = auth.register(request("sam@example.com")).await.unwrap();
        let pair = auth.tokens().create_pair(&user).unwrap();

        let result = auth
            .authenticate(Some("undefined"), Some(&pair.refresh_token))
            .await
            .unwrap();

        let (resolved, tokens) = result.into_parts();
        assert_eq!(resolved, Some(user.clone()));
        let tokens = tokens.expect("refresh issues a new pair");
        assert_eq!(auth.tokens().verify_access(&tokens.access_token), Some(user));
    }

    #[tokio::test]
    async fn test_refresh_for_deleted_user_is_anonymous() {
        let auth = service().await;
        let ghost = User {
            id: "missing".into(),
            name: None,
            email: "ghost@example.com".into(),
        };
        let pair = auth.tokens().create_pair(&ghost).unwrap();

        let result = auth.authenticate(None, Some(&pair.refresh_token)).await.unwrap();
        assert!(result.user().is_none());
    }

    #[tokio::test]
    async fn test_access_token_in_refresh_slot_is_rejected() {
        let auth = service().await;
        let user = auth.register(request("sam@example.com")).await.unwrap();
        let pair = auth.tokens().create_pair(&user).unwrap();

        assert!(auth.refresh_tokens(&pair.access_token).await.unwrap().is_none());
    }
}
