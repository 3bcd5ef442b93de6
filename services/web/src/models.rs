//! View models and form payloads
//!
//! `Customer` and `User` mirror the API's GraphQL types; any field a query
//! does not select falls back to its default.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::validation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub contact: String,
    pub email: String,
    pub date_of_birth: DateTime<Utc>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: 0,
            username: String::new(),
            email: String::new(),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role: common::Role::User.to_string(),
            is_active: true,
            created_at: None,
            last_login_at: None,
        }
    }
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// `?ReturnUrl=` on the login page
#[derive(Debug, Default, Deserialize)]
pub struct ReturnUrlQuery {
    #[serde(rename = "ReturnUrl")]
    pub return_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors: Vec<String> = [
            validation::validate_username(&self.username),
            validation::validate_email(&self.email),
            validation::validate_password(&self.password),
            validation::validate_required("First name", &self.first_name, 50),
            validation::validate_required("Last name", &self.last_name, 50),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if self.password != self.confirm_password {
            errors.push("The password and confirmation password do not match.".to_string());
        }

        errors
    }
}

/// Customer create/edit form; `date_of_birth` comes from an `<input type="date">`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerForm {
    #[serde(default)]
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub contact: String,
    pub email: String,
    pub date_of_birth: String,
}

impl CustomerForm {
    /// Validate the form and build the customer it describes
    pub fn to_customer(&self, id: i32) -> Result<Customer, Vec<String>> {
        let mut errors: Vec<String> = [
            validation::validate_required("First name", &self.first_name, 100),
            validation::validate_required("Last name", &self.last_name, 100),
            validation::validate_required("Contact", &self.contact, 100),
            validation::validate_email(&self.email),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        let date_of_birth = NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc());
        if date_of_birth.is_none() {
            errors.push("Date of birth must be a valid date.".to_string());
        }

        match date_of_birth {
            Some(date_of_birth) if errors.is_empty() => Ok(Customer {
                id,
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                contact: self.contact.trim().to_string(),
                email: self.email.trim().to_string(),
                date_of_birth,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        Self {
            id: Some(customer.id),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            contact: customer.contact.clone(),
            email: customer.email.clone(),
            date_of_birth: customer.date_of_birth.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl CreateUserForm {
    pub fn validate(&self) -> Vec<String> {
        [
            validation::validate_username(&self.username),
            validation::validate_email(&self.email),
            validation::validate_password(&self.password),
            validation::validate_required("First name", &self.first_name, 50),
            validation::validate_required("Last name", &self.last_name, 50),
            validation::validate_role(&self.role),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }

    pub fn to_user(&self) -> User {
        User {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            role: self.role.clone(),
            ..User::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleForm {
    pub role: String,
}
