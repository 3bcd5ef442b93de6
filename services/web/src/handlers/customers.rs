//! Customer pages
//!
//! Each handler checks the caller's role against its own allow-list.

use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use common::Role;
use tracing::{error, info, warn};

use crate::{
    error::{WebError, WebResult},
    flash,
    handlers::{ajax_result, is_ajax},
    models::CustomerForm,
    session::CurrentUser,
    state::AppState,
    views,
};

const VIEW_ROLES: &[Role] = &Role::ALL;
const CREATE_ROLES: &[Role] = &[Role::Admin, Role::Manager, Role::User];
const EDIT_ROLES: &[Role] = &[Role::Admin, Role::Manager];
const DELETE_ROLES: &[Role] = &[Role::Admin];

pub async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    jar: CookieJar,
) -> WebResult<Response> {
    user.require(VIEW_ROLES, is_ajax(&headers))?;
    let (jar, flash) = flash::take(jar);

    let page = match state.customers.get_customers().await {
        Ok(customers) => views::customers_index(&user.0, flash.as_ref(), &customers, None),
        Err(e) => {
            error!("Error fetching customers: {}", e);
            views::customers_index(
                &user.0,
                flash.as_ref(),
                &[],
                Some("Unable to fetch customers. Please try again later."),
            )
        }
    };

    Ok((jar, Html(page)).into_response())
}

pub async fn details(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> WebResult<Html<String>> {
    user.require(VIEW_ROLES, is_ajax(&headers))?;

    let customer = state
        .customers
        .get_customer_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;

    Ok(Html(views::customer_details(&user.0, &customer)))
}

pub async fn create_page(user: CurrentUser, headers: HeaderMap) -> WebResult<Html<String>> {
    user.require(CREATE_ROLES, is_ajax(&headers))?;

    Ok(Html(views::customer_form(&user.0, &CustomerForm::default(), &[])))
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<CustomerForm>,
) -> WebResult<Response> {
    user.require(CREATE_ROLES, is_ajax(&headers))?;

    let customer = match form.to_customer(0) {
        Ok(customer) => customer,
        Err(errors) => return Ok(Html(views::customer_form(&user.0, &form, &errors)).into_response()),
    };

    let message = match state.customers.create_customer(&customer).await {
        Ok(Some(created)) => {
            info!("User {} created customer {}", user.0.name, created.id);
            let jar = flash::success(jar, "Customer created successfully!");
            return Ok((jar, Redirect::to("/Customers")).into_response());
        }
        Ok(None) => "Failed to create customer. Please try again.",
        Err(e) => {
            error!("Error creating customer: {}", e);
            "An error occurred while creating the customer. Please try again."
        }
    };

    Ok(Html(views::customer_form(&user.0, &form, &[message.to_string()])).into_response())
}

pub async fn edit_page(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> WebResult<Response> {
    user.require(EDIT_ROLES, is_ajax(&headers))?;

    match state.customers.get_customer_by_id(id).await {
        Ok(Some(customer)) => {
            let form = CustomerForm::from(&customer);
            Ok(Html(views::customer_form(&user.0, &form, &[])).into_response())
        }
        Ok(None) => Err(WebError::NotFound),
        Err(e) => {
            error!("Error fetching customer with id {} for editing: {}", id, e);
            let jar = flash::error(jar, "Unable to fetch customer for editing. Please try again later.");
            Ok((jar, Redirect::to("/Customers")).into_response())
        }
    }
}

/// Replace a customer; answers JSON to AJAX callers
pub async fn edit(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    jar: CookieJar,
    Path(id): Path<i32>,
    Form(form): Form<CustomerForm>,
) -> WebResult<Response> {
    let ajax = is_ajax(&headers);
    user.require(EDIT_ROLES, ajax)?;

    info!("Edit request received for customer ID: {}", id);

    if form.id != Some(id) {
        warn!("ID mismatch: URL ID {} != customer ID {:?}", id, form.id);
        return if ajax {
            Ok(ajax_result(false, "Invalid customer ID."))
        } else {
            Err(WebError::NotFound)
        };
    }

    let customer = match form.to_customer(id) {
        Ok(customer) => customer,
        Err(errors) => {
            warn!("Validation failed: {}", errors.join(", "));
            return Ok(if ajax {
                ajax_result(false, format!("Validation errors: {}", errors.join(", ")))
            } else {
                Html(views::customer_form(&user.0, &form, &errors)).into_response()
            });
        }
    };

    let (ajax_message, page_message) = match state.customers.update_customer(&customer).await {
        Ok(Some(_)) => {
            info!("Customer {} updated successfully", id);
            return Ok(if ajax {
                ajax_result(true, "Customer updated successfully!")
            } else {
                let jar = flash::success(jar, "Customer updated successfully!");
                (jar, Redirect::to("/Customers")).into_response()
            });
        }
        Ok(None) => (
            "Failed to update customer. The GraphQL service returned null.".to_string(),
            "Failed to update customer. Please try again.",
        ),
        Err(e) => {
            error!("Error updating customer with id {}: {}", id, e);
            (
                format!("An error occurred while updating the customer: {}", e),
                "An error occurred while updating the customer. Please try again.",
            )
        }
    };

    Ok(if ajax {
        ajax_result(false, ajax_message)
    } else {
        Html(views::customer_form(&user.0, &form, &[page_message.to_string()])).into_response()
    })
}

/// Hard delete; answers JSON to AJAX callers
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> WebResult<Response> {
    let ajax = is_ajax(&headers);
    user.require(DELETE_ROLES, ajax)?;

    info!("Delete request received for customer ID: {}", id);

    let (success, ajax_message, page_message) = match state.customers.delete_customer(id).await {
        Ok(true) => (
            true,
            "Customer deleted successfully!".to_string(),
            "Customer deleted successfully!",
        ),
        Ok(false) => (
            false,
            "Failed to delete customer. Please try again.".to_string(),
            "Failed to delete customer. Please try again.",
        ),
        Err(e) => {
            error!("Error deleting customer with id {}: {}", id, e);
            (
                false,
                format!("An error occurred while deleting the customer: {}", e),
                "An error occurred while deleting the customer. Please try again.",
            )
        }
    };

    if ajax {
        return Ok(ajax_result(success, ajax_message));
    }

    let jar = if success {
        flash::success(jar, page_message)
    } else {
        flash::error(jar, page_message)
    };
    Ok((jar, Redirect::to("/Customers")).into_response())
}
