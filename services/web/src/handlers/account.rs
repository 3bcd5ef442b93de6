//! Login, logout and self-service registration

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use tracing::info;

use crate::{
    error::WebResult,
    flash,
    models::{LoginForm, RegisterForm, ReturnUrlQuery},
    session::{CurrentUser, SessionKeys},
    state::AppState,
    views,
};

/// Only same-site paths are followed after login
pub fn is_local_url(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
}

pub async fn login_page(Query(query): Query<ReturnUrlQuery>, jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    let return_url = query.return_url.unwrap_or_default();

    (jar, Html(views::login(&return_url, "", &[], flash.as_ref())))
}

pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<ReturnUrlQuery>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    let return_url = query.return_url.unwrap_or_default();
    let username = form.username.trim();

    if username.is_empty() || form.password.is_empty() {
        let errors = vec!["Username and password are required.".to_string()];
        return Ok(Html(views::login(&return_url, username, &errors, None)).into_response());
    }

    if state.auth.validate_user(username, &form.password).await {
        if let Some(user) = state.auth.get_user_by_username(username).await {
            let claims = state.sessions.claims_for(&user, form.remember_me, Utc::now());
            let cookie = state.sessions.issue(&claims)?;

            info!("User {} logged in", user.username);

            let target = if is_local_url(&return_url) { return_url.as_str() } else { "/" };
            return Ok((jar.add(cookie), Redirect::to(target)).into_response());
        }
    }

    let errors = vec!["Invalid login attempt.".to_string()];
    Ok(Html(views::login(&return_url, username, &errors, None)).into_response())
}

pub async fn register_page() -> Html<String> {
    Html(views::register(&RegisterForm::default(), &[]))
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let errors = form.validate();
    if !errors.is_empty() {
        return Html(views::register(&form, &errors)).into_response();
    }

    if state.auth.register_user(&form).await {
        let jar = flash::success(jar, "Registration successful! Please log in.");
        return (jar, Redirect::to("/Account/Login")).into_response();
    }

    let errors = vec!["Registration failed. Please try again.".to_string()];
    Html(views::register(&form, &errors)).into_response()
}

pub async fn logout(user: Option<CurrentUser>, jar: CookieJar) -> impl IntoResponse {
    if let Some(CurrentUser(claims)) = user {
        info!("User {} logged out", claims.name);
    }

    (jar.remove(SessionKeys::removal()), Redirect::to("/"))
}

pub async fn access_denied(user: Option<CurrentUser>) -> Html<String> {
    Html(views::access_denied(user.as_ref().map(|user| &user.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_local_return_urls_are_followed() {
        assert!(is_local_url("/Customers"));
        assert!(is_local_url("/Customers/Edit/3?tab=1"));
        assert!(!is_local_url(""));
        assert!(!is_local_url("https://evil.example.com"));
        assert!(!is_local_url("//evil.example.com"));
        assert!(!is_local_url("/\\evil.example.com"));
    }
}
