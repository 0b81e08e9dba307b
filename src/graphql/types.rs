// src/graphql/types.rs
// GraphQL views of the domain models. Field names follow what the web
// client already queries (`_id`, `imageURL`).

use async_graphql::{ID, InputObject, Object};

use crate::auth::{RegisterRequest, User};
use crate::store::{Area, GroceryList, Item};

#[Object]
impl Item {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    async fn name(&self) -> &str {
        &self.name
    }
}

#[Object]
impl Area {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    #[graphql(name = "imageURL")]
    async fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    async fn items(&self) -> &[Item] {
        &self.items
    }
}

#[Object]
impl GroceryList {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    async fn items(&self) -> &[Item] {
        &self.items
    }
}

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    async fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    async fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

/// One entry of a reordered grocery list
#[derive(Debug, Clone, InputObject)]
pub struct ItemInput {
    #[graphql(name = "_id")]
    pub id: ID,
    pub name: String,
    /// Document version sent back by older clients; ignored
    #[graphql(name = "_v")]
    pub version: Option<i32>,
}

#[derive(Debug, Clone, InputObject)]
pub struct RegisterUserInput {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

impl From<RegisterUserInput> for RegisterRequest {
    fn from(input: RegisterUserInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            password: input.password,
        }
    }
}
