// src/api/http/graphql.rs
//
// GraphQL endpoint. Authentication happens here, before execution: the
// token headers are checked and the verified user is attached to the
// request data for the resolvers.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header::ACCESS_CONTROL_EXPOSE_HEADERS},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, error};

use super::HttpState;
use crate::auth::{Authentication, TokenPair};
use crate::graphql::{EXPOSE_HEADERS_VALUE, REFRESH_TOKEN_HEADER, TOKEN_HEADER};

/// POST /graphql
pub async fn graphql_handler(
    State(state): State<HttpState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> Response {
    let authentication = state
        .app
        .auth_service
        .authenticate(header_str(&headers, TOKEN_HEADER), header_str(&headers, REFRESH_TOKEN_HEADER))
        .await
        .unwrap_or_else(|e| {
            error!("Failed to authenticate request: {}", e);
            Authentication::Anonymous
        });

    let (user, refreshed) = authentication.into_parts();

    let mut request = req.into_inner();
    if let Some(user) = user {
        debug!("Request authenticated as {}", user.id);
        request = request.data(user);
    }

    let mut response = GraphQLResponse::from(state.schema.execute(request).await).into_response();

    if let Some(tokens) = refreshed {
        set_token_headers(response.headers_mut(), &tokens);
    }

    response
}

/// GET /graphql
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn set_token_headers(headers: &mut HeaderMap, tokens: &TokenPair) {
    let (Ok(access), Ok(refresh)) = (
        HeaderValue::from_str(&tokens.access_token),
        HeaderValue::from_str(&tokens.refresh_token),
    ) else {
        error!("Refreshed tokens are not valid header values");
        return;
    };

    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(EXPOSE_HEADERS_VALUE),
    );
    headers.insert(TOKEN_HEADER, access);
    headers.insert(REFRESH_TOKEN_HEADER, refresh);
}
