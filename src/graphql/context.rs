// src/graphql/context.rs
// Per-request helpers shared by the resolvers

use async_graphql::{Context, Upload};
use std::io::Read;

use crate::auth::User;
use crate::error::{GroceryError, IntoGraphqlResult};
use crate::images::PendingUpload;
use crate::state::AppState;

pub fn app_state<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a AppState> {
    ctx.data::<AppState>()
}

/// The user attached by the HTTP layer, if the request's token verified
pub fn current_user<'a>(ctx: &Context<'a>) -> Option<&'a User> {
    ctx.data_opt::<User>()
}

pub fn require_user<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a User> {
    current_user(ctx).ok_or_else(|| GroceryError::Unauthorized.into_graphql())
}

/// Buffer a multipart upload. The engine spools uploads to a temp file, so
/// reading it is blocking work.
pub async fn read_upload(ctx: &Context<'_>, upload: Upload) -> async_graphql::Result<PendingUpload> {
    let value = upload.value(ctx).map_err(|e| {
        GroceryError::Upload(format!("Error storing image on server: {}", e)).into_graphql()
    })?;

    let filename = value.filename.clone();
    let content_type = value.content_type.clone();

    let bytes = tokio::task::spawn_blocking(move || {
        let mut buf = Vec::new();
        value.into_read().read_to_end(&mut buf).map(|_| buf)
    })
    .await
    .map_err(|e| GroceryError::Internal(anyhow::anyhow!("Upload reader panicked: {}", e)))
    .into_gql()?
    .map_err(|e| GroceryError::Upload(format!("Error storing image on server: {}", e)))
    .into_gql()?;

    Ok(PendingUpload {
        filename,
        content_type,
        bytes,
    })
}
