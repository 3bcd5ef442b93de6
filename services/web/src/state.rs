//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::SessionConfig,
    graphql_client::GraphQlClient,
    services::{AuthService, CustomerService, UserService},
    session::SessionKeys,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
    pub users: UserService,
    pub auth: AuthService,
    pub sessions: SessionKeys,
}

impl AppState {
    pub fn new(client: Arc<dyn GraphQlClient>, session: &SessionConfig) -> Self {
        let users = UserService::new(client.clone());

        Self {
            customers: CustomerService::new(client),
            auth: AuthService::new(users.clone()),
            users,
            sessions: SessionKeys::new(session),
        }
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
