//! Common library for the customer hub services
//!
//! This crate provides shared functionality used by the GraphQL API service
//! and the web front-end, including database connectivity, error handling,
//! the role/permission table and password hashing.

pub mod database;
pub mod error;
pub mod password;
pub mod roles;

pub use roles::{Permission, Role};
