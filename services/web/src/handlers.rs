//! Request handlers, one module per controller

use axum::{
    Json,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub mod account;
pub mod customers;
pub mod home;
pub mod users;

/// Request sent by page scripts rather than a plain form post
pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("X-Requested-With")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == "XMLHttpRequest")
}

/// `{success, message}` body answered to AJAX requests
pub fn ajax_result(success: bool, message: impl Into<String>) -> Response {
    Json(json!({ "success": success, "message": message.into() })).into_response()
}
