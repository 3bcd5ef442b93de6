//! Mutation root
//!
//! Each resolver forwards to a repository and turns any failure into a
//! GraphQL error whose message starts with `Error <operation>:`.

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use common::{Role, password::hash_password};
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{Customer, CustomerInput, NewUser, User},
    state::AppState,
};

fn default_role() -> String {
    Role::User.to_string()
}

async fn replace_customer(state: &AppState, id: i32, input: CustomerInput) -> ApiResult<Customer> {
    state
        .customers
        .update(id, input)
        .await?
        .ok_or(ApiError::CustomerNotFound(id))
}

async fn remove_customer(state: &AppState, id: i32) -> ApiResult<()> {
    if state.customers.delete(id).await? {
        Ok(())
    } else {
        Err(ApiError::CustomerNotFound(id))
    }
}

async fn register_user(state: &AppState, new_user: NewUser) -> ApiResult<User> {
    // Opportunistic check; nothing at the storage layer enforces it
    if state.users.exists(&new_user.username, &new_user.email).await? {
        return Err(ApiError::DuplicateUser(new_user.username));
    }

    Ok(state.users.create(new_user).await?)
}

async fn change_role(state: &AppState, id: i32, role: &str) -> ApiResult<User> {
    let role: Role = role.parse()?;
    state
        .users
        .update_role(id, role)
        .await?
        .ok_or(ApiError::UserNotFound(id))
}

async fn touch_last_login(state: &AppState, id: i32) -> ApiResult<User> {
    state
        .users
        .update_last_login(id, Utc::now())
        .await?
        .ok_or(ApiError::UserNotFound(id))
}

#[derive(Default)]
pub struct Mutation;

#[Object]
impl Mutation {
    async fn add_customer(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        last_name: String,
        contact: String,
        email: String,
        date_of_birth: DateTime<Utc>,
    ) -> Result<Customer> {
        let state = ctx.data::<AppState>()?;
        let input = CustomerInput {
            first_name,
            last_name,
            contact,
            email,
            date_of_birth,
        };

        let customer = state.customers.create(input).await.map_err(|e| {
            warn!("Failed to add customer: {}", e);
            ApiError::from(e).during("adding customer")
        })?;

        info!("Added customer with ID: {}", customer.id);
        Ok(customer)
    }

    #[allow(clippy::too_many_arguments)]
    async fn update_customer(
        &self,
        ctx: &Context<'_>,
        id: i32,
        first_name: String,
        last_name: String,
        contact: String,
        email: String,
        date_of_birth: DateTime<Utc>,
    ) -> Result<Option<Customer>> {
        let state = ctx.data::<AppState>()?;
        let input = CustomerInput {
            first_name,
            last_name,
            contact,
            email,
            date_of_birth,
        };

        match replace_customer(state, id, input).await {
            Ok(customer) => {
                info!("Updated customer with ID: {}", id);
                Ok(Some(customer))
            }
            Err(e) => {
                warn!("Failed to update customer {}: {}", id, e);
                Err(e.during("updating customer"))
            }
        }
    }

    async fn delete_customer(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let state = ctx.data::<AppState>()?;

        match remove_customer(state, id).await {
            Ok(()) => {
                info!("Deleted customer with ID: {}", id);
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to delete customer {}: {}", id, e);
                Err(e.during("deleting customer"))
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
        first_name: String,
        last_name: String,
        #[graphql(default_with = "default_role()")] role: String,
    ) -> Result<User> {
        let state = ctx.data::<AppState>()?;

        let role = role.parse::<Role>().map_err(|e| {
            warn!("Rejected user {}: {}", username, e);
            ApiError::from(e).during("adding user")
        })?;

        let new_user = NewUser {
            username: username.clone(),
            email,
            password_hash: hash_password(&password),
            first_name,
            last_name,
            role,
            is_active: true,
        };

        match register_user(state, new_user).await {
            Ok(user) => {
                info!("Added user {} with ID: {}", user.username, user.id);
                Ok(user)
            }
            Err(e) => {
                warn!("Failed to add user {}: {}", username, e);
                Err(e.during("adding user"))
            }
        }
    }

    async fn update_user_role(
        &self,
        ctx: &Context<'_>,
        id: i32,
        role: String,
    ) -> Result<Option<User>> {
        let state = ctx.data::<AppState>()?;

        match change_role(state, id, &role).await {
            Ok(user) => {
                info!("Updated role of user {} to {}", id, user.role);
                Ok(Some(user))
            }
            Err(e) => {
                warn!("Failed to update role of user {}: {}", id, e);
                Err(e.during("updating user role"))
            }
        }
    }

    async fn update_user_last_login(&self, ctx: &Context<'_>, id: i32) -> Result<Option<User>> {
        let state = ctx.data::<AppState>()?;

        touch_last_login(state, id).await.map(Some).map_err(|e| {
            warn!("Failed to update last login of user {}: {}", id, e);
            e.during("updating user last login")
        })
    }
}
