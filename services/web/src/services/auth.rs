//! Credential checks and self-service registration

use tracing::{error, info, warn};

use crate::{
    models::{RegisterForm, User},
    services::UserService,
};

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
}

impl AuthService {
    pub fn new(users: UserService) -> Self {
        Self { users }
    }

    /// Check a username/password pair against the stored hash
    ///
    /// Inactive users never validate. A successful check stamps the user's
    /// last login time.
    pub async fn validate_user(&self, username: &str, password: &str) -> bool {
        let user = match self.users.get_user_by_username(username).await {
            Some(user) if user.is_active => user,
            _ => {
                warn!("User {} not found or inactive", username);
                return false;
            }
        };

        if !self.verify_password(password, &user.password_hash) {
            warn!("Invalid password for user {}", username);
            return false;
        }

        info!("User {} validated successfully", username);
        if self.users.update_user_last_login(user.id).await.is_none() {
            error!("Failed to record last login for user {}", username);
        }

        true
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        let user = self.users.get_user_by_username(username).await;

        match &user {
            Some(_) => info!("Retrieved user {}", username),
            None => warn!("User {} not found", username),
        }
        user
    }

    /// Register a new account with the `User` role
    pub async fn register_user(&self, form: &RegisterForm) -> bool {
        if self.users.get_user_by_username(&form.username).await.is_some() {
            warn!("User registration failed: username {} already exists", form.username);
            return false;
        }

        let user = User {
            username: form.username.trim().to_string(),
            email: form.email.trim().to_string(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            role: common::Role::User.to_string(),
            ..User::default()
        };

        match self.users.create_user(&user, &form.password).await {
            Some(created) => {
                info!("User {} registered successfully with role {}", created.username, created.role);
                true
            }
            None => {
                error!("Failed to create user {}", form.username);
                false
            }
        }
    }

    pub fn hash_password(&self, password: &str) -> String {
        common::password::hash_password(password)
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        common::password::verify_password(password, hash)
    }
}
