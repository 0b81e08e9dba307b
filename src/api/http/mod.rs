// src/api/http/mod.rs

pub mod graphql;
pub mod health;

use axum::{
    Router,
    http::{HeaderName, HeaderValue},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::graphql::{GrocerySchema, REFRESH_TOKEN_HEADER, TOKEN_HEADER, build_schema};
use crate::state::AppState;

pub use graphql::{graphiql, graphql_handler};
pub use health::{health_check, liveness_check};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Multipart requests carry whole area images. Larger bodies get 413.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Router state: the services plus the schema built over them
#[derive(Clone)]
pub struct HttpState {
    pub app: AppState,
    pub schema: GrocerySchema,
}

pub fn create_router(app: AppState) -> Router {
    let schema = build_schema(app.clone());

    // Browser clients can only read rotated tokens if they are exposed
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(TOKEN_HEADER),
            HeaderName::from_static(REFRESH_TOKEN_HEADER),
        ]);

    let version_header = SetResponseHeaderLayer::if_not_present(
        HeaderName::from_static("x-api-version"),
        HeaderValue::from_static(API_VERSION),
    );

    Router::new()
        .route(
            "/graphql",
            get(graphiql)
                .post(graphql_handler)
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
        // Health endpoints for load balancers
        .route("/health", get(health_check))
        .route("/live", get(liveness_check))
        .layer(version_header)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(HttpState { app, schema })
}
