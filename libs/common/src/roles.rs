//! Application roles and the static role → permission table
//!
//! The table is not persisted. Both services share it: the API validates
//! role names against [`Role`], and the web front-end uses the permissions
//! to decide which actions a page offers.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// One of the four application roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
    User,
    Guest,
}

/// A single permission string from the role table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    // Customers
    ViewCustomers,
    CreateCustomer,
    EditCustomer,
    DeleteCustomer,

    // User management
    ViewUsers,
    CreateUser,
    EditUser,
    DeleteUser,

    // Administration
    ManageRoles,
    SystemAdmin,
}

/// Returned when a role name is not one of the known roles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewCustomers,
    Permission::CreateCustomer,
    Permission::EditCustomer,
    Permission::DeleteCustomer,
    Permission::ViewUsers,
    Permission::CreateUser,
    Permission::EditUser,
    Permission::DeleteUser,
    Permission::ManageRoles,
    Permission::SystemAdmin,
];

const MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::ViewCustomers,
    Permission::CreateCustomer,
    Permission::EditCustomer,
    Permission::ViewUsers,
];

const USER_PERMISSIONS: &[Permission] = &[Permission::ViewCustomers, Permission::CreateCustomer];

const GUEST_PERMISSIONS: &[Permission] = &[Permission::ViewCustomers];

impl Role {
    /// Every role, most privileged first
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::User, Role::Guest];

    /// Canonical role name as stored and transmitted
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::User => "User",
            Role::Guest => "Guest",
        }
    }

    /// Permissions granted to this role
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Admin => ADMIN_PERMISSIONS,
            Role::Manager => MANAGER_PERMISSIONS,
            Role::User => USER_PERMISSIONS,
            Role::Guest => GUEST_PERMISSIONS,
        }
    }

    /// Check whether this role holds a permission
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewCustomers => "ViewCustomers",
            Permission::CreateCustomer => "CreateCustomer",
            Permission::EditCustomer => "EditCustomer",
            Permission::DeleteCustomer => "DeleteCustomer",
            Permission::ViewUsers => "ViewUsers",
            Permission::CreateUser => "CreateUser",
            Permission::EditUser => "EditUser",
            Permission::DeleteUser => "DeleteUser",
            Permission::ManageRoles => "ManageRoles",
            Permission::SystemAdmin => "SystemAdmin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up a permission by role name; unknown roles hold nothing
pub fn has_permission(role: &str, permission: Permission) -> bool {
    role.parse::<Role>()
        .map(|role| role.has_permission(permission))
        .unwrap_or(false)
}
