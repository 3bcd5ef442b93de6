//! HTML pages
//!
//! Plain string rendering. Every value that comes from a user or the API
//! goes through [`escape`].

use common::{Permission, Role};

use crate::{
    flash::{Flash, FlashKind},
    models::{Customer, CustomerForm, CreateUserForm, RegisterForm, User},
    session::SessionClaims,
};

/// Escape text for HTML element and attribute content
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const SCRIPT: &str = r#"
<script>
async function postAjax(form, url) {
    const response = await fetch(url || form.action, {
        method: 'POST',
        headers: { 'X-Requested-With': 'XMLHttpRequest' },
        body: new URLSearchParams(new FormData(form)),
    });
    const result = await response.json();
    alert(result.message);
    if (result.success && form.dataset.reload) { window.location.reload(); }
}
</script>"#;

fn nav(user: Option<&SessionClaims>) -> String {
    let mut links = String::from(r#"<a href="/">Home</a> <a href="/Home/Privacy">Privacy</a>"#);

    match user {
        Some(user) => {
            if user.has_permission(Permission::ViewCustomers) {
                links.push_str(r#" <a href="/Customers">Customers</a>"#);
            }
            if user.has_permission(Permission::ViewUsers) {
                links.push_str(r#" <a href="/Users">Users</a>"#);
            }
            links.push_str(&format!(
                r#" <span class="identity">Hello {} ({})</span>
<form method="post" action="/Account/Logout" class="inline"><button type="submit">Logout</button></form>"#,
                escape(&user.name),
                escape(&user.role)
            ));
        }
        None => links.push_str(
            r#" <a href="/Account/Login">Login</a> <a href="/Account/Register">Register</a>"#,
        ),
    }

    format!("<nav>{}</nav>", links)
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => {
            let class = match flash.kind {
                FlashKind::Success => "alert-success",
                FlashKind::Error => "alert-danger",
            };
            format!(r#"<div class="alert {}">{}</div>"#, class, escape(&flash.message))
        }
        None => String::new(),
    }
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!(r#"<ul class="validation-errors">{}</ul>"#, items)
}

pub fn layout(title: &str, user: Option<&SessionClaims>, flash: Option<&Flash>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} - Customer Hub</title></head>
<body>
{nav}
<main>
{flash}
<h1>{title}</h1>
{body}
</main>
{SCRIPT}
</body>
</html>"#,
        title = escape(title),
        nav = nav(user),
        flash = flash_banner(flash),
    )
}

pub fn home(user: Option<&SessionClaims>, flash: Option<&Flash>) -> String {
    let body = match user {
        Some(user) => format!(
            "<p>Welcome back, {} ({}).</p>",
            escape(&user.full_name()),
            escape(&user.name)
        ),
        None => "<p>Please log in to manage customers.</p>".to_string(),
    };
    layout("Home", user, flash, &body)
}

pub fn privacy(user: Option<&SessionClaims>) -> String {
    layout(
        "Privacy Policy",
        user,
        None,
        "<p>Session cookies are used only to keep you signed in.</p>",
    )
}

pub fn access_denied(user: Option<&SessionClaims>) -> String {
    layout(
        "Access Denied",
        user,
        None,
        "<p>You do not have permission to access this resource.</p>",
    )
}

pub fn not_found() -> String {
    layout("Not Found", None, None, "<p>The requested resource was not found.</p>")
}

pub fn error_page(message: &str) -> String {
    layout("Error", None, None, &format!("<p>{}</p>", escape(message)))
}

pub fn login(return_url: &str, username: &str, errors: &[String], flash: Option<&Flash>) -> String {
    let body = format!(
        r#"{errors}
<form method="post" action="/Account/Login?ReturnUrl={return_url}">
  <label>Username <input name="username" value="{username}" required></label>
  <label>Password <input name="password" type="password" required></label>
  <label><input name="remember_me" type="checkbox" value="true"> Remember me</label>
  <button type="submit">Log in</button>
</form>
<p><a href="/Account/Register">Register as a new user</a></p>"#,
        errors = error_list(errors),
        return_url = escape(&urlencoding::encode(return_url)),
        username = escape(username),
    );
    layout("Log in", None, flash, &body)
}

pub fn register(form: &RegisterForm, errors: &[String]) -> String {
    let body = format!(
        r#"{errors}
<form method="post" action="/Account/Register">
  <label>Username <input name="username" value="{username}" required></label>
  <label>Email <input name="email" type="email" value="{email}" required></label>
  <label>First name <input name="first_name" value="{first_name}" required></label>
  <label>Last name <input name="last_name" value="{last_name}" required></label>
  <label>Password <input name="password" type="password" required></label>
  <label>Confirm password <input name="confirm_password" type="password" required></label>
  <button type="submit">Register</button>
</form>"#,
        errors = error_list(errors),
        username = escape(&form.username),
        email = escape(&form.email),
        first_name = escape(&form.first_name),
        last_name = escape(&form.last_name),
    );
    layout("Register", None, None, &body)
}

pub fn customers_index(
    user: &SessionClaims,
    flash: Option<&Flash>,
    customers: &[Customer],
    error: Option<&str>,
) -> String {
    let mut body = String::new();

    if let Some(error) = error {
        body.push_str(&format!(r#"<div class="alert alert-danger">{}</div>"#, escape(error)));
    }
    if user.has_permission(Permission::CreateCustomer) {
        body.push_str(r#"<p><a href="/Customers/Create">Create New</a></p>"#);
    }

    body.push_str(
        "<table><thead><tr><th>Name</th><th>Contact</th><th>Email</th><th>Date of birth</th><th></th></tr></thead><tbody>",
    );
    for customer in customers {
        let mut actions = format!(r#"<a href="/Customers/Details/{}">Details</a>"#, customer.id);
        if user.has_permission(Permission::EditCustomer) {
            actions.push_str(&format!(r#" <a href="/Customers/Edit/{}">Edit</a>"#, customer.id));
        }
        if user.has_permission(Permission::DeleteCustomer) {
            actions.push_str(&format!(
                r#" <form method="post" action="/Customers/Delete/{}" class="inline" data-reload="true" onsubmit="event.preventDefault(); if (confirm('Delete this customer?')) postAjax(this);"><button type="submit">Delete</button></form>"#,
                customer.id
            ));
        }

        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&customer.full_name()),
            escape(&customer.contact),
            escape(&customer.email),
            customer.date_of_birth.format("%Y-%m-%d"),
            actions
        ));
    }
    body.push_str("</tbody></table>");

    layout("Customers", Some(user), flash, &body)
}

pub fn customer_details(user: &SessionClaims, customer: &Customer) -> String {
    let mut body = format!(
        r#"<dl>
  <dt>First name</dt><dd>{}</dd>
  <dt>Last name</dt><dd>{}</dd>
  <dt>Contact</dt><dd>{}</dd>
  <dt>Email</dt><dd>{}</dd>
  <dt>Date of birth</dt><dd>{}</dd>
</dl>"#,
        escape(&customer.first_name),
        escape(&customer.last_name),
        escape(&customer.contact),
        escape(&customer.email),
        customer.date_of_birth.format("%Y-%m-%d"),
    );

    if user.has_permission(Permission::EditCustomer) {
        body.push_str(&format!(r#"<a href="/Customers/Edit/{}">Edit</a> | "#, customer.id));
    }
    body.push_str(r#"<a href="/Customers">Back to List</a>"#);

    layout("Customer Details", Some(user), None, &body)
}

/// Shared create/edit form; edit submits over AJAX when scripts run
pub fn customer_form(user: &SessionClaims, form: &CustomerForm, errors: &[String]) -> String {
    let (title, action, id_field, submit) = match form.id {
        Some(id) => (
            "Edit Customer",
            format!("/Customers/Edit/{}", id),
            format!(r#"<input type="hidden" name="id" value="{}">"#, id),
            r#"onsubmit="event.preventDefault(); postAjax(this);""#,
        ),
        None => ("Create Customer", "/Customers/Create".to_string(), String::new(), ""),
    };

    let body = format!(
        r#"{errors}
<form method="post" action="{action}" {submit}>
  {id_field}
  <label>First name <input name="first_name" value="{first_name}" required></label>
  <label>Last name <input name="last_name" value="{last_name}" required></label>
  <label>Contact <input name="contact" value="{contact}" required></label>
  <label>Email <input name="email" type="email" value="{email}" required></label>
  <label>Date of birth <input name="date_of_birth" type="date" value="{date_of_birth}" required></label>
  <button type="submit">Save</button>
</form>
<a href="/Customers">Back to List</a>"#,
        errors = error_list(errors),
        first_name = escape(&form.first_name),
        last_name = escape(&form.last_name),
        contact = escape(&form.contact),
        email = escape(&form.email),
        date_of_birth = escape(&form.date_of_birth),
    );

    layout(title, Some(user), None, &body)
}

fn role_options(selected: &str) -> String {
    Role::ALL
        .iter()
        .map(|role| {
            let name = role.as_str();
            let marker = if name == selected { " selected" } else { "" };
            format!(r#"<option value="{name}"{marker}>{name}</option>"#)
        })
        .collect()
}

pub fn users_index(user: &SessionClaims, flash: Option<&Flash>, users: &[User]) -> String {
    let mut body = String::from(r#"<p><a href="/Users/Create">Create New</a></p>"#);

    body.push_str(
        "<table><thead><tr><th>Username</th><th>Name</th><th>Email</th><th>Role</th><th>Active</th><th>Last login</th><th></th></tr></thead><tbody>",
    );
    for u in users {
        let last_login = u
            .last_login_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "Never".to_string());

        body.push_str(&format!(
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href="/Users/Details/{id}">Details</a> <a href="/Users/EditRole/{id}">Edit role</a></td></tr>"#,
            escape(&u.username),
            escape(&u.full_name()),
            escape(&u.email),
            escape(&u.role),
            if u.is_active { "Yes" } else { "No" },
            last_login,
            id = u.id,
        ));
    }
    body.push_str("</tbody></table>");

    layout("Users", Some(user), flash, &body)
}

pub fn user_details(user: &SessionClaims, u: &User) -> String {
    let created = u
        .created_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let last_login = u
        .last_login_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "Never".to_string());

    let body = format!(
        r#"<dl>
  <dt>Username</dt><dd>{}</dd>
  <dt>Name</dt><dd>{}</dd>
  <dt>Email</dt><dd>{}</dd>
  <dt>Role</dt><dd>{}</dd>
  <dt>Active</dt><dd>{}</dd>
  <dt>Created</dt><dd>{}</dd>
  <dt>Last login</dt><dd>{}</dd>
</dl>
<a href="/Users/EditRole/{}">Edit role</a> | <a href="/Users">Back to List</a>"#,
        escape(&u.username),
        escape(&u.full_name()),
        escape(&u.email),
        escape(&u.role),
        if u.is_active { "Yes" } else { "No" },
        created,
        last_login,
        u.id,
    );

    layout("User Details", Some(user), None, &body)
}

pub fn user_create(user: &SessionClaims, form: &CreateUserForm, errors: &[String]) -> String {
    let selected = if form.role.is_empty() { Role::User.as_str() } else { form.role.as_str() };

    let body = format!(
        r#"{errors}
<form method="post" action="/Users/Create">
  <label>Username <input name="username" value="{username}" required></label>
  <label>Email <input name="email" type="email" value="{email}" required></label>
  <label>First name <input name="first_name" value="{first_name}" required></label>
  <label>Last name <input name="last_name" value="{last_name}" required></label>
  <label>Password <input name="password" type="password" required></label>
  <label>Role <select name="role">{roles}</select></label>
  <button type="submit">Create</button>
</form>
<a href="/Users">Back to List</a>"#,
        errors = error_list(errors),
        username = escape(&form.username),
        email = escape(&form.email),
        first_name = escape(&form.first_name),
        last_name = escape(&form.last_name),
        roles = role_options(selected),
    );

    layout("Create User", Some(user), None, &body)
}

pub fn user_edit_role(user: &SessionClaims, u: &User, errors: &[String]) -> String {
    let body = format!(
        r#"{errors}
<p>{username} ({name})</p>
<form method="post" action="/Users/EditRole/{id}">
  <label>Role <select name="role">{roles}</select></label>
  <button type="submit">Save</button>
  <button type="button" onclick="postAjax(this.form, '/Users/EditRoleAjax/{id}')">Save without reloading</button>
</form>
<a href="/Users">Back to List</a>"#,
        errors = error_list(errors),
        username = escape(&u.username),
        name = escape(&u.full_name()),
        id = u.id,
        roles = role_options(&u.role),
    );

    layout("Edit Role", Some(user), None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x & y")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_role_options_mark_selection() {
        let options = role_options("Manager");
        assert!(options.contains(r#"<option value="Manager" selected>Manager</option>"#));
        assert!(options.contains(r#"<option value="Guest">Guest</option>"#));
    }

    #[test]
    fn test_login_page_keeps_return_url() {
        let page = login("/Customers/Edit/3", "", &[], None);
        assert!(page.contains("ReturnUrl=%2FCustomers%2FEdit%2F3"));
    }

    #[test]
    fn test_edit_role_ajax_button_keeps_form_action() {
        let admin = SessionClaims {
            name: "admin".to_string(),
            name_identifier: 1,
            email: "admin@example.com".to_string(),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            role: "Admin".to_string(),
            persistent: false,
            iat: 0,
            exp: 0,
        };
        let target = User {
            id: 3,
            username: "user".to_string(),
            ..User::default()
        };

        let page = user_edit_role(&admin, &target, &[]);
        assert!(page.contains(r#"<form method="post" action="/Users/EditRole/3">"#));
        assert!(page.contains("postAjax(this.form, '/Users/EditRoleAjax/3')"));
        assert!(!page.contains("Object.assign"));
    }
}
