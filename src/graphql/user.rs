// src/graphql/user.rs

use async_graphql::{Context, Object};

use super::context::{app_state, current_user, require_user};
use super::types::RegisterUserInput;
use crate::auth::User;
use crate::error::{GroceryError, IntoGraphqlResult};

pub const TOKEN_HEADER: &str = "x-token";
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";
pub const EXPOSE_HEADERS_VALUE: &str = "x-token, x-refresh-token";

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        require_user(ctx)?;
        app_state(ctx)?.auth_service.list_users().await.into_gql()
    }

    /// Verifies credentials and hands back a token pair in the
    /// `x-token` / `x-refresh-token` response headers
    async fn login_user(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> async_graphql::Result<User> {
        let login = app_state(ctx)?
            .auth_service
            .login(&email, &password)
            .await
            .into_gql()?;

        ctx.insert_http_header("access-control-expose-headers", EXPOSE_HEADERS_VALUE);
        ctx.insert_http_header(TOKEN_HEADER, login.tokens.access_token);
        ctx.insert_http_header(REFRESH_TOKEN_HEADER, login.tokens.refresh_token);

        Ok(login.user)
    }

    async fn is_authenticated(&self, ctx: &Context<'_>) -> async_graphql::Result<User> {
        current_user(ctx)
            .cloned()
            .ok_or_else(|| GroceryError::Unauthenticated.into_graphql())
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn register_user(
        &self,
        ctx: &Context<'_>,
        user_data: Option<RegisterUserInput>,
    ) -> async_graphql::Result<User> {
        let input = user_data
            .ok_or_else(|| GroceryError::invalid_input("userData is required"))
            .into_gql()?;

        app_state(ctx)?
            .auth_service
            .register(input.into())
            .await
            .into_gql()
    }
}
