//! Repositories for customer and user persistence
//!
//! Resolvers only see the traits. The PostgreSQL implementations back the
//! running service; the in-memory ones back the `Test` environment.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::Role;

use crate::models::{Customer, CustomerInput, NewUser, User};

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryCustomerRepository, InMemoryUserRepository};
pub use postgres::{PgCustomerRepository, PgUserRepository};

/// Customer persistence
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers ordered by id
    async fn list(&self) -> Result<Vec<Customer>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>>;

    async fn create(&self, input: CustomerInput) -> Result<Customer>;

    /// Replace every field of an existing customer; `None` when absent
    async fn update(&self, id: i32, input: CustomerInput) -> Result<Option<Customer>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i32) -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}

/// User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id
    async fn list(&self) -> Result<Vec<User>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Whether any user already has this username or this email
    async fn exists(&self, username: &str, email: &str) -> Result<bool>;

    async fn create(&self, new_user: NewUser) -> Result<User>;

    async fn update_role(&self, id: i32, role: Role) -> Result<Option<User>>;

    async fn update_last_login(&self, id: i32, at: DateTime<Utc>) -> Result<Option<User>>;

    async fn count(&self) -> Result<i64>;
}
