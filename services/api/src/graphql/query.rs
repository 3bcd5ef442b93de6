//! Query root

use async_graphql::{Context, Object, Result};
use tracing::{error, info};

use crate::{
    error::ApiError,
    models::{Customer, User},
    state::AppState,
};

#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    /// All customers ordered by id
    async fn customers(&self, ctx: &Context<'_>) -> Result<Vec<Customer>> {
        let state = ctx.data::<AppState>()?;
        let customers = state.customers.list().await.map_err(|e| {
            error!("Failed to list customers: {}", e);
            ApiError::from(e).during("fetching customers")
        })?;

        info!("Fetched {} customers", customers.len());
        Ok(customers)
    }

    /// A single customer, null when absent
    async fn customer(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Customer>> {
        let state = ctx.data::<AppState>()?;
        state.customers.find_by_id(id).await.map_err(|e| {
            error!("Failed to fetch customer {}: {}", id, e);
            ApiError::from(e).during("fetching customer")
        })
    }

    /// All users ordered by id
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let state = ctx.data::<AppState>()?;
        state.users.list().await.map_err(|e| {
            error!("Failed to list users: {}", e);
            ApiError::from(e).during("fetching users")
        })
    }

    /// A single user looked up by username, null when absent
    async fn user(&self, ctx: &Context<'_>, username: String) -> Result<Option<User>> {
        let state = ctx.data::<AppState>()?;
        state.users.find_by_username(&username).await.map_err(|e| {
            error!("Failed to fetch user {}: {}", username, e);
            ApiError::from(e).during("fetching user")
        })
    }

    /// A single user looked up by id, null when absent
    async fn user_by_id(&self, ctx: &Context<'_>, id: i32) -> Result<Option<User>> {
        let state = ctx.data::<AppState>()?;
        state.users.find_by_id(id).await.map_err(|e| {
            error!("Failed to fetch user {}: {}", id, e);
            ApiError::from(e).during("fetching user")
        })
    }
}
