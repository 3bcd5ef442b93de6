//! GraphQL schema: queries and mutations over customers and users

use async_graphql::{EmptySubscription, Schema};

use crate::state::AppState;

pub mod mutation;
pub mod query;

pub use mutation::Mutation;
pub use query::Query;

pub type ApiSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the GraphQL schema with the repositories as context data
pub fn build_schema(state: AppState) -> ApiSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(state)
        .finish()
}
