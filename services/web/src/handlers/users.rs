//! User administration pages, Admin only

use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use common::Role;
use tracing::info;

use crate::{
    error::{WebError, WebResult},
    flash,
    handlers::{ajax_result, is_ajax},
    models::{CreateUserForm, RoleForm},
    session::CurrentUser,
    state::AppState,
    views,
};

const ADMIN_ROLES: &[Role] = &[Role::Admin];

pub async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    jar: CookieJar,
) -> WebResult<Response> {
    user.require(ADMIN_ROLES, is_ajax(&headers))?;
    let (jar, flash) = flash::take(jar);

    let users = state.users.get_users().await;
    Ok((jar, Html(views::users_index(&user.0, flash.as_ref(), &users))).into_response())
}

pub async fn details(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> WebResult<Html<String>> {
    user.require(ADMIN_ROLES, is_ajax(&headers))?;

    let found = state.users.get_user_by_id(id).await.ok_or(WebError::NotFound)?;
    Ok(Html(views::user_details(&user.0, &found)))
}

pub async fn create_page(user: CurrentUser, headers: HeaderMap) -> WebResult<Html<String>> {
    user.require(ADMIN_ROLES, is_ajax(&headers))?;

    Ok(Html(views::user_create(&user.0, &CreateUserForm::default(), &[])))
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<CreateUserForm>,
) -> WebResult<Response> {
    user.require(ADMIN_ROLES, is_ajax(&headers))?;

    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(Html(views::user_create(&user.0, &form, &errors)).into_response());
    }

    match state.users.create_user(&form.to_user(), &form.password).await {
        Some(created) => {
            info!("User {} created user {} with role {}", user.0.name, created.username, created.role);
            let jar = flash::success(jar, "User created successfully!");
            Ok((jar, Redirect::to("/Users")).into_response())
        }
        None => {
            let errors = vec!["Failed to create user. Please try again.".to_string()];
            Ok(Html(views::user_create(&user.0, &form, &errors)).into_response())
        }
    }
}

pub async fn edit_role_page(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> WebResult<Html<String>> {
    user.require(ADMIN_ROLES, is_ajax(&headers))?;

    let found = state.users.get_user_by_id(id).await.ok_or(WebError::NotFound)?;
    Ok(Html(views::user_edit_role(&user.0, &found, &[])))
}

pub async fn edit_role(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    jar: CookieJar,
    Path(id): Path<i32>,
    Form(form): Form<RoleForm>,
) -> WebResult<Response> {
    user.require(ADMIN_ROLES, is_ajax(&headers))?;

    if state.users.update_user_role(id, &form.role).await.is_some() {
        let jar = flash::success(jar, "User role updated successfully!");
        return Ok((jar, Redirect::to("/Users")).into_response());
    }

    let found = state.users.get_user_by_id(id).await.ok_or(WebError::NotFound)?;
    let errors = vec!["Failed to update user role. Please try again.".to_string()];
    Ok(Html(views::user_edit_role(&user.0, &found, &errors)).into_response())
}

/// Role change from the edit page's script; always answers JSON
pub async fn edit_role_ajax(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Form(form): Form<RoleForm>,
) -> WebResult<Response> {
    user.require(ADMIN_ROLES, true)?;

    Ok(match state.users.update_user_role(id, &form.role).await {
        Some(_) => ajax_result(true, "User role updated successfully!"),
        None => ajax_result(false, "Failed to update user role. Please try again."),
    })
}
