//! Service layer between the handlers and the GraphQL API

pub mod auth;
pub mod customer;
pub mod user;

pub use auth::AuthService;
pub use customer::CustomerService;
pub use user::UserService;
