// src/graphql/area.rs
// Areas, items and the grocery list

use async_graphql::{Context, ID, Object, Upload};

use super::context::{app_state, read_upload, require_user};
use super::types::ItemInput;
use crate::error::IntoGraphqlResult;
use crate::store::{Area, GroceryList, Item};

#[derive(Default)]
pub struct AreaQuery;

#[Object]
impl AreaQuery {
    async fn areas(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Area>> {
        require_user(ctx)?;
        app_state(ctx)?.catalog_service.areas().await.into_gql()
    }

    async fn items(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Item>> {
        app_state(ctx)?.catalog_service.items().await.into_gql()
    }

    async fn grocery_list(&self, ctx: &Context<'_>) -> async_graphql::Result<GroceryList> {
        app_state(ctx)?.grocery_service.grocery_list().await.into_gql()
    }

    async fn get_items_for_area(
        &self,
        ctx: &Context<'_>,
        area_id: ID,
    ) -> async_graphql::Result<Vec<Item>> {
        require_user(ctx)?;
        app_state(ctx)?
            .catalog_service
            .items_for_area(&area_id)
            .await
            .into_gql()
    }
}

#[derive(Default)]
pub struct AreaMutation;

#[Object]
impl AreaMutation {
    async fn add_item_to_area(
        &self,
        ctx: &Context<'_>,
        name: String,
        area_id: ID,
    ) -> async_graphql::Result<Item> {
        require_user(ctx)?;
        app_state(ctx)?
            .catalog_service
            .add_item_to_area(&name, &area_id)
            .await
            .into_gql()
    }

    async fn delete_item_from_area(
        &self,
        ctx: &Context<'_>,
        area_id: ID,
        item_id: ID,
    ) -> async_graphql::Result<Item> {
        require_user(ctx)?;
        app_state(ctx)?
            .catalog_service
            .delete_item_from_area(&area_id, &item_id)
            .await
            .into_gql()
    }

    async fn update_item(
        &self,
        ctx: &Context<'_>,
        name: String,
        item_id: ID,
    ) -> async_graphql::Result<Item> {
        require_user(ctx)?;
        app_state(ctx)?
            .catalog_service
            .update_item(&name, &item_id)
            .await
            .into_gql()
    }

    async fn add_area(
        &self,
        ctx: &Context<'_>,
        name: String,
        image_upload: Upload,
    ) -> async_graphql::Result<Area> {
        require_user(ctx)?;
        let upload = read_upload(ctx, image_upload).await?;
        app_state(ctx)?
            .catalog_service
            .add_area(&name, upload)
            .await
            .into_gql()
    }

    async fn update_area(
        &self,
        ctx: &Context<'_>,
        area_id: ID,
        name: Option<String>,
        image_upload: Option<Upload>,
    ) -> async_graphql::Result<Area> {
        require_user(ctx)?;
        let upload = match image_upload {
            Some(upload) => Some(read_upload(ctx, upload).await?),
            None => None,
        };
        app_state(ctx)?
            .catalog_service
            .update_area(&area_id, name.as_deref(), upload)
            .await
            .into_gql()
    }

    async fn delete_area(&self, ctx: &Context<'_>, area_id: ID) -> async_graphql::Result<Area> {
        require_user(ctx)?;
        app_state(ctx)?
            .catalog_service
            .delete_area(&area_id)
            .await
            .into_gql()
    }

    async fn create_grocery_list(&self, ctx: &Context<'_>) -> async_graphql::Result<GroceryList> {
        require_user(ctx)?;
        app_state(ctx)?
            .grocery_service
            .create_grocery_list()
            .await
            .into_gql()
    }

    async fn add_item_to_grocery_list(
        &self,
        ctx: &Context<'_>,
        grocery_id: ID,
        item_id: ID,
        name: Option<String>,
    ) -> async_graphql::Result<GroceryList> {
        require_user(ctx)?;
        app_state(ctx)?
            .grocery_service
            .add_item(&grocery_id, &item_id, name.as_deref())
            .await
            .into_gql()
    }

    async fn remove_item_from_grocery_list(
        &self,
        ctx: &Context<'_>,
        grocery_id: ID,
        item_id: ID,
    ) -> async_graphql::Result<GroceryList> {
        require_user(ctx)?;
        app_state(ctx)?
            .grocery_service
            .remove_item(&grocery_id, &item_id)
            .await
            .into_gql()
    }

    async fn reset_grocery_list(
        &self,
        ctx: &Context<'_>,
        grocery_id: ID,
    ) -> async_graphql::Result<GroceryList> {
        require_user(ctx)?;
        app_state(ctx)?
            .grocery_service
            .reset(&grocery_id)
            .await
            .into_gql()
    }

    async fn sort_grocery_list(
        &self,
        ctx: &Context<'_>,
        grocery_id: ID,
        sorted_items: Option<Vec<ItemInput>>,
    ) -> async_graphql::Result<GroceryList> {
        require_user(ctx)?;
        let sorted_ids: Vec<String> = sorted_items
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.id.0)
            .collect();

        app_state(ctx)?
            .grocery_service
            .sort(&grocery_id, &sorted_ids)
            .await
            .into_gql()
    }
}
