//! Sample data for a fresh store
//!
//! Users and customers are seeded independently, each only when its table
//! is empty. Not run in the `Test` environment.

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use common::{Role, password::hash_password};
use tracing::info;

use crate::{
    models::{CustomerInput, NewUser},
    state::AppState,
};

/// (username, password, first name, role)
const SEED_USERS: &[(&str, &str, &str, Role)] = &[
    ("admin", "admin123", "Admin", Role::Admin),
    ("manager", "manager123", "Manager", Role::Manager),
    ("user", "user123", "Regular", Role::User),
    ("guest", "guest123", "Guest", Role::Guest),
];

/// (first name, last name, contact, year, month, day)
const SEED_CUSTOMERS: &[(&str, &str, &str, i32, u32, u32)] = &[
    ("John", "Doe", "+1-555-0101", 1985, 3, 15),
    ("Jane", "Smith", "+1-555-0102", 1990, 7, 22),
    ("Michael", "Johnson", "+1-555-0103", 1982, 11, 8),
    ("Sarah", "Williams", "+1-555-0104", 1988, 4, 12),
    ("David", "Brown", "+1-555-0105", 1995, 9, 30),
    ("Emily", "Davis", "+1-555-0106", 1992, 1, 18),
    ("Robert", "Wilson", "+1-555-0107", 1987, 6, 25),
    ("Lisa", "Anderson", "+1-555-0108", 1993, 12, 3),
    ("James", "Taylor", "+1-555-0109", 1980, 8, 14),
    ("Amanda", "Martinez", "+1-555-0110", 1991, 2, 28),
];

/// Seed users and customers into empty tables
pub async fn initialize(state: &AppState) -> Result<()> {
    if state.users.count().await? == 0 {
        for (username, password, first_name, role) in SEED_USERS {
            state
                .users
                .create(NewUser {
                    username: username.to_string(),
                    email: format!("{}@example.com", username),
                    password_hash: hash_password(password),
                    first_name: first_name.to_string(),
                    last_name: "User".to_string(),
                    role: *role,
                    is_active: true,
                })
                .await?;
        }
        info!("Seeded {} users", SEED_USERS.len());
    }

    if state.customers.count().await? > 0 {
        return Ok(());
    }

    for (first_name, last_name, contact, year, month, day) in SEED_CUSTOMERS {
        let date_of_birth = Utc
            .with_ymd_and_hms(*year, *month, *day, 0, 0, 0)
            .single()
            .with_context(|| format!("Invalid seed birth date for {}", first_name))?;

        state
            .customers
            .create(CustomerInput {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                contact: contact.to_string(),
                email: format!(
                    "{}.{}@email.com",
                    first_name.to_lowercase(),
                    last_name.to_lowercase()
                ),
                date_of_birth,
            })
            .await?;
    }
    info!("Seeded {} customers", SEED_CUSTOMERS.len());

    Ok(())
}
