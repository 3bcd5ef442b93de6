//! Custom error types for the API service
//!
//! Resolvers return `async_graphql::Result`; an `ApiError` ends up as the
//! `message` of an entry in the response's `errors` array.

use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Customer with id {0} not found")]
    CustomerNotFound(i32),

    #[error("User with id {0} not found")]
    UserNotFound(i32),

    #[error("User with username '{0}' or the same email already exists")]
    DuplicateUser(String),

    #[error(transparent)]
    InvalidRole(#[from] common::roles::UnknownRole),

    #[error("{0}")]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    /// Prefix the error with the operation that failed
    pub fn during(self, operation: &str) -> async_graphql::Error {
        async_graphql::Error::new(format!("Error {}: {}", operation, self))
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_the_operation() {
        let err = ApiError::CustomerNotFound(7).during("deleting customer");
        assert_eq!(err.message, "Error deleting customer: Customer with id 7 not found");
    }

    #[test]
    fn test_invalid_role_message() {
        let err: ApiError = "Root".parse::<common::Role>().unwrap_err().into();
        assert_eq!(err.to_string(), "Unknown role: Root");
    }
}
