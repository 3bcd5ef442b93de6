//! Customer model

use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Customer entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, SimpleObject)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub contact: String,
    pub email: String,
    pub date_of_birth: DateTime<Utc>,
}

/// Field values used when creating or replacing a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub contact: String,
    pub email: String,
    pub date_of_birth: DateTime<Utc>,
}

impl CustomerInput {
    /// Build the stored entity once an identity has been assigned
    pub fn into_customer(self, id: i32) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            contact: self.contact,
            email: self.email,
            date_of_birth: self.date_of_birth,
        }
    }
}
