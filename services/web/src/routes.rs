//! Web front-end routes

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{account, customers, home, users},
    session::renew_session,
    state::AppState,
};

/// Create the router for the web front-end
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(home::index))
        .route("/Home/Privacy", get(home::privacy))
        .route("/Account/Login", get(account::login_page).post(account::login))
        .route("/Account/Register", get(account::register_page).post(account::register))
        .route("/Account/Logout", post(account::logout))
        .route("/Account/AccessDenied", get(account::access_denied))
        .route("/Customers", get(customers::index))
        .route("/Customers/Index", get(customers::index))
        .route("/Customers/Details/:id", get(customers::details))
        .route("/Customers/Create", get(customers::create_page).post(customers::create))
        .route("/Customers/Edit/:id", get(customers::edit_page).post(customers::edit))
        .route("/Customers/Delete/:id", post(customers::delete))
        .route("/Users", get(users::index))
        .route("/Users/Index", get(users::index))
        .route("/Users/Details/:id", get(users::details))
        .route("/Users/Create", get(users::create_page).post(users::create))
        .route("/Users/EditRole/:id", get(users::edit_role_page).post(users::edit_role))
        .route("/Users/EditRoleAjax/:id", post(users::edit_role_ajax))
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            renew_session,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "web-service"
    }))
}
