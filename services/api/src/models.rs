//! Domain models exposed through the GraphQL schema

pub mod customer;
pub mod user;

pub use customer::{Customer, CustomerInput};
pub use user::{NewUser, User};
