//! Shared fixtures for the API integration tests

use api::{
    AppState, build_schema,
    models::{CustomerInput, NewUser},
    routes::create_router,
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{TimeZone, Utc};
use common::{Role, password::hash_password};
use serde_json::{Value, json};
use tower::ServiceExt;

/// (username, password, role, active)
pub const TEST_USERS: &[(&str, &str, Role, bool)] = &[
    ("testadmin", "admin123", Role::Admin, true),
    ("testmanager", "manager123", Role::Manager, true),
    ("testuser", "user123", Role::User, true),
    ("inactiveuser", "inactive123", Role::User, false),
];

/// In-memory state with four users and three customers
pub async fn seeded_state() -> AppState {
    let state = AppState::in_memory();

    for (username, password, role, is_active) in TEST_USERS {
        state
            .users
            .create(NewUser {
                username: username.to_string(),
                email: format!("{}@test.com", username),
                password_hash: hash_password(password),
                first_name: "Test".to_string(),
                last_name: username.to_string(),
                role: *role,
                is_active: *is_active,
            })
            .await
            .unwrap();
    }

    for (first_name, last_name, year) in [("Alice", "Jones", 1980), ("Bob", "Miller", 1975), ("Carol", "King", 1992)] {
        state
            .customers
            .create(CustomerInput {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                contact: "+1-555-0000".to_string(),
                email: format!("{}@test.com", first_name.to_lowercase()),
                date_of_birth: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
            })
            .await
            .unwrap();
    }

    state
}

pub async fn test_app() -> Router {
    create_router(build_schema(seeded_state().await), true)
}

/// POST a GraphQL document and return the decoded response body
pub async fn post_graphql(app: &Router, query: &str) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    read_json(response.into_body()).await
}

pub async fn read_json(body: Body) -> Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Message of the first GraphQL error, if any
pub fn first_error(response: &Value) -> Option<&str> {
    response["errors"][0]["message"].as_str()
}
