// src/graphql/mod.rs
// Schema assembly

pub mod area;
pub mod context;
pub mod types;
pub mod user;

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::state::AppState;

pub use user::{EXPOSE_HEADERS_VALUE, REFRESH_TOKEN_HEADER, TOKEN_HEADER};

#[derive(MergedObject, Default)]
pub struct QueryRoot(user::UserQuery, area::AreaQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(user::UserMutation, area::AreaMutation);

pub type GrocerySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> GrocerySchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}
