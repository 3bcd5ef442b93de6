//! Cookie-authenticated web front-end over the customer GraphQL API
//!
//! Handlers check roles, call the service layer, and render HTML (or JSON
//! for AJAX requests). All data access goes through [`graphql_client`].

pub mod config;
pub mod error;
pub mod flash;
pub mod graphql_client;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod validation;
pub mod views;

pub use state::AppState;
