//! User model

use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use common::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity
///
/// `password_hash` is part of the schema: the web front-end verifies
/// credentials itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, SimpleObject)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// New user creation payload, password already hashed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
}

impl NewUser {
    pub fn into_user(self, id: i32, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role.to_string(),
            is_active: self.is_active,
            created_at,
            last_login_at: None,
        }
    }
}
