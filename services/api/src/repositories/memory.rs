//! In-memory repositories for the `Test` environment and for tests

use std::sync::atomic::{AtomicI32, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::Role;
use dashmap::DashMap;

use super::{CustomerRepository, UserRepository};
use crate::models::{Customer, CustomerInput, NewUser, User};

/// In-memory customer store; identities start at 1
pub struct InMemoryCustomerRepository {
    customers: DashMap<i32, Customer>,
    next_id: AtomicI32,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>> {
        let mut customers: Vec<Customer> = self
            .customers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        customers.sort_by_key(|c| c.id);
        Ok(customers)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>> {
        Ok(self.customers.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, input: CustomerInput) -> Result<Customer> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let customer = input.into_customer(id);
        self.customers.insert(id, customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: i32, input: CustomerInput) -> Result<Option<Customer>> {
        Ok(self.customers.get_mut(&id).map(|mut entry| {
            *entry = input.into_customer(id);
            entry.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        Ok(self.customers.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.customers.len() as i64)
    }
}

/// In-memory user store; identities start at 1
pub struct InMemoryUserRepository {
    users: DashMap<i32, User>,
    next_id: AtomicI32,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    fn modify(&self, id: i32, change: impl FnOnce(&mut User)) -> Option<User> {
        self.users.get_mut(&id).map(|mut entry| {
            change(entry.value_mut());
            entry.clone()
        })
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .iter()
            .filter(|entry| entry.username == username)
            .map(|entry| entry.value().clone())
            .min_by_key(|u| u.id))
    }

    async fn exists(&self, username: &str, email: &str) -> Result<bool> {
        Ok(self
            .users
            .iter()
            .any(|entry| entry.username == username || entry.email == email))
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = new_user.into_user(id, Utc::now());
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_role(&self, id: i32, role: Role) -> Result<Option<User>> {
        Ok(self.modify(id, |user| user.role = role.to_string()))
    }

    async fn update_last_login(&self, id: i32, at: DateTime<Utc>) -> Result<Option<User>> {
        Ok(self.modify(id, |user| user.last_login_at = Some(at)))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.users.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input(first_name: &str) -> CustomerInput {
        CustomerInput {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            contact: "1234567890".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            date_of_birth: Utc.with_ymd_and_hms(1980, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_customer_identities_are_sequential() {
        let repo = InMemoryCustomerRepository::new();
        let first = repo.create(input("John")).await.unwrap();
        let second = repo.create(input("Jane")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_deleted_identity_is_not_reused() {
        let repo = InMemoryCustomerRepository::new();
        let first = repo.create(input("John")).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap());

        let next = repo.create(input("Jane")).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_update_missing_customer_returns_none() {
        let repo = InMemoryCustomerRepository::new();
        assert!(repo.update(42, input("Ghost")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_exists_matches_username_or_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(NewUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            role: Role::User,
            is_active: true,
        })
        .await
        .unwrap();

        assert!(repo.exists("alice", "other@example.com").await.unwrap());
        assert!(repo.exists("bob", "alice@example.com").await.unwrap());
        assert!(!repo.exists("bob", "bob@example.com").await.unwrap());
    }
}
