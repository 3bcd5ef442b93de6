//! GraphQL API over customers and users
//!
//! Exposed as a library so the web front-end's tests can run the schema
//! in-process.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod state;

pub use graphql::{ApiSchema, build_schema};
pub use state::AppState;
