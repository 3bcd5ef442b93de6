//! API service routes

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::graphql::ApiSchema;

/// Create the router for the API service
///
/// `/graphql` accepts both GET and POST and requires no authentication.
pub fn create_router(schema: ApiSchema, exposes_explorer: bool) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/graphql", get(graphql_handler).post(graphql_handler));

    if exposes_explorer {
        router = router.route("/graphiql", get(graphiql));
    }

    router.layer(TraceLayer::new_for_http()).with_state(schema)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}

/// Execute a GraphQL request
pub async fn graphql_handler(State(schema): State<ApiSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// Interactive schema explorer
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
