//! User operations over GraphQL
//!
//! Every failure is logged and swallowed into `None` or an empty list.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::{
    graphql_client::{GraphQlClient, GraphQlData},
    models::User,
};

const USER_FIELDS: &str =
    "id username email passwordHash firstName lastName role isActive createdAt lastLoginAt";

#[derive(Clone)]
pub struct UserService {
    client: Arc<dyn GraphQlClient>,
}

impl UserService {
    pub fn new(client: Arc<dyn GraphQlClient>) -> Self {
        Self { client }
    }

    /// Run a query and return its data, or `None` after logging any failure
    async fn fetch(&self, query: &str, variables: Option<Value>, operation: &str) -> Option<GraphQlData> {
        match self.client.execute(query, variables).await {
            Ok(response) => {
                if let Some(message) = response.error_message() {
                    warn!("GraphQL API rejected {}: {}", operation, message);
                }
                Some(response.data())
            }
            Err(e) => {
                error!("Error {} via GraphQL API: {}", operation, e);
                None
            }
        }
    }

    pub async fn get_users(&self) -> Vec<User> {
        let query = format!("query {{ users {{ {USER_FIELDS} }} }}");
        self.fetch(&query, None, "fetching users")
            .await
            .and_then(|data| data.users)
            .unwrap_or_default()
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        let query = format!("query($username: String!) {{ user(username: $username) {{ {USER_FIELDS} }} }}");
        self.fetch(&query, Some(json!({ "username": username })), "fetching user by username")
            .await
            .and_then(|data| data.user)
    }

    pub async fn get_user_by_id(&self, id: i32) -> Option<User> {
        let query = format!("query($id: Int!) {{ userById(id: $id) {{ {USER_FIELDS} }} }}");
        self.fetch(&query, Some(json!({ "id": id })), "fetching user by id")
            .await
            .and_then(|data| data.user_by_id)
    }

    /// Create a user with the role it carries; the API hashes the password
    pub async fn create_user(&self, user: &User, password: &str) -> Option<User> {
        let mutation = format!(
            "mutation($username: String!, $email: String!, $password: String!, $firstName: String!, $lastName: String!, $role: String!) {{ \
             addUser(username: $username, email: $email, password: $password, firstName: $firstName, lastName: $lastName, role: $role) {{ {USER_FIELDS} }} }}"
        );
        let variables = json!({
            "username": user.username,
            "email": user.email,
            "password": password,
            "firstName": user.first_name,
            "lastName": user.last_name,
            "role": user.role,
        });

        let created = self
            .fetch(&mutation, Some(variables), "creating user")
            .await
            .and_then(|data| data.add_user);

        if let Some(created) = &created {
            info!("Created user {} with ID: {}", created.username, created.id);
        }
        created
    }

    pub async fn update_user_role(&self, id: i32, role: &str) -> Option<User> {
        let mutation = format!(
            "mutation($id: Int!, $role: String!) {{ updateUserRole(id: $id, role: $role) {{ {USER_FIELDS} }} }}"
        );

        let updated = self
            .fetch(&mutation, Some(json!({ "id": id, "role": role })), "updating user role")
            .await
            .and_then(|data| data.update_user_role);

        if updated.is_some() {
            info!("Updated role of user {} to {}", id, role);
        }
        updated
    }

    pub async fn update_user_last_login(&self, id: i32) -> Option<User> {
        let mutation = format!("mutation($id: Int!) {{ updateUserLastLogin(id: $id) {{ {USER_FIELDS} }} }}");
        self.fetch(&mutation, Some(json!({ "id": id })), "updating user last login")
            .await
            .and_then(|data| data.update_user_last_login)
    }
}
