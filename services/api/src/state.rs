//! Application state shared across resolvers

use std::sync::Arc;

use sqlx::PgPool;

use crate::repositories::{
    CustomerRepository, InMemoryCustomerRepository, InMemoryUserRepository,
    PgCustomerRepository, PgUserRepository, UserRepository,
};

/// Application state shared across resolvers
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            customers: Arc::new(PgCustomerRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }

    /// State backed by empty in-memory stores
    pub fn in_memory() -> Self {
        Self {
            customers: Arc::new(InMemoryCustomerRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }
}
