//! One-shot messages carried across a redirect in a short-lived cookie

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "customer_hub_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

fn set(jar: CookieJar, flash: &Flash) -> CookieJar {
    let Ok(json) = serde_json::to_vec(flash) else {
        return jar;
    };

    let cookie = Cookie::build((FLASH_COOKIE, URL_SAFE_NO_PAD.encode(json)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(1))
        .build();

    jar.add(cookie)
}

pub fn success(jar: CookieJar, message: &str) -> CookieJar {
    set(
        jar,
        &Flash {
            kind: FlashKind::Success,
            message: message.to_string(),
        },
    )
}

pub fn error(jar: CookieJar, message: &str) -> CookieJar {
    set(
        jar,
        &Flash {
            kind: FlashKind::Error,
            message: message.to_string(),
        },
    )
}

/// Read and clear the pending message
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = URL_SAFE_NO_PAD
        .decode(cookie.value())
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok());

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}
