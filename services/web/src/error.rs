//! Custom error types for the web front-end

use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::views;

/// Failure talking to the GraphQL API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("GraphQL request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Custom error type for the web front-end
#[derive(Error, Debug)]
pub enum WebError {
    #[error("Not found")]
    NotFound,

    /// Authenticated, but the role is not on the page's allow-list
    #[error("Access denied")]
    AccessDenied { ajax: bool },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Session error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound => (StatusCode::NOT_FOUND, Html(views::not_found())).into_response(),
            WebError::AccessDenied { ajax: true } => (
                StatusCode::FORBIDDEN,
                Json(json!({ "success": false, "message": "Access denied." })),
            )
                .into_response(),
            WebError::AccessDenied { ajax: false } => {
                Redirect::to("/Account/AccessDenied").into_response()
            }
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::error_page(
                        "An unexpected error occurred. Please try again later.",
                    )),
                )
                    .into_response()
            }
        }
    }
}

/// Type alias for handler results
pub type WebResult<T> = Result<T, WebError>;
