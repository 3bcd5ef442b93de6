mod support;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use support::{first_error, post_graphql, read_json, test_app};

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "api-service");
}

#[tokio::test]
async fn test_query_customers_over_get_without_credentials() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/graphql?query=%7Bcustomers%7Bid%20firstName%7D%7D")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response.into_body()).await;
    let customers = body["data"]["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 3);
    assert_eq!(customers[0]["id"], 1);
    assert_eq!(customers[0]["firstName"], "Alice");
}

#[tokio::test]
async fn test_add_customer_then_query_it() {
    let app = test_app().await;

    let added = post_graphql(
        &app,
        r#"mutation {
            addCustomer(firstName: "Dana", lastName: "Scott", contact: "+1-555-0199",
                        email: "dana@test.com", dateOfBirth: "1999-05-04T00:00:00Z") { id }
        }"#,
    )
    .await;
    assert!(first_error(&added).is_none());
    let id = added["data"]["addCustomer"]["id"].as_i64().unwrap();
    assert_eq!(id, 4);

    let fetched = post_graphql(&app, &format!("{{ customer(id: {}) {{ firstName email }} }}", id)).await;
    assert_eq!(fetched["data"]["customer"]["firstName"], "Dana");
    assert_eq!(fetched["data"]["customer"]["email"], "dana@test.com");
}

#[tokio::test]
async fn test_missing_customer_is_null() {
    let app = test_app().await;
    let body = post_graphql(&app, "{ customer(id: 999) { id } }").await;

    assert!(first_error(&body).is_none());
    assert!(body["data"]["customer"].is_null());
}

#[tokio::test]
async fn test_update_customer_replaces_every_field() {
    let app = test_app().await;
    let body = post_graphql(
        &app,
        r#"mutation {
            updateCustomer(id: 2, firstName: "Robert", lastName: "Miller", contact: "n/a",
                           email: "robert@test.com", dateOfBirth: "1975-01-01T00:00:00Z") {
                id firstName contact
            }
        }"#,
    )
    .await;

    assert!(first_error(&body).is_none());
    assert_eq!(body["data"]["updateCustomer"]["id"], 2);
    assert_eq!(body["data"]["updateCustomer"]["firstName"], "Robert");
    assert_eq!(body["data"]["updateCustomer"]["contact"], "n/a");
}

#[tokio::test]
async fn test_update_missing_customer_fails() {
    let app = test_app().await;
    let body = post_graphql(
        &app,
        r#"mutation {
            updateCustomer(id: 42, firstName: "X", lastName: "Y", contact: "Z",
                           email: "x@test.com", dateOfBirth: "2000-01-01T00:00:00Z") { id }
        }"#,
    )
    .await;

    let message = first_error(&body).unwrap();
    assert!(message.starts_with("Error updating customer"), "{}", message);
}

#[tokio::test]
async fn test_delete_customer() {
    let app = test_app().await;

    let deleted = post_graphql(&app, "mutation { deleteCustomer(id: 1) }").await;
    assert_eq!(deleted["data"]["deleteCustomer"], true);

    let remaining = post_graphql(&app, "{ customers { id } }").await;
    assert_eq!(remaining["data"]["customers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_invalid_customer_ids_fail() {
    let app = test_app().await;

    for id in [999, 0, -1] {
        let body = post_graphql(&app, &format!("mutation {{ deleteCustomer(id: {}) }}", id)).await;
        let message = first_error(&body).unwrap();
        assert!(message.starts_with("Error deleting customer"), "{}", message);
    }
}

#[tokio::test]
async fn test_query_users_and_user_by_username() {
    let app = test_app().await;

    let users = post_graphql(&app, "{ users { username role isActive } }").await;
    let users = users["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 4);
    assert_eq!(users[3]["username"], "inactiveuser");
    assert_eq!(users[3]["isActive"], false);

    let user = post_graphql(&app, r#"{ user(username: "testmanager") { id role passwordHash } }"#).await;
    assert_eq!(user["data"]["user"]["role"], "Manager");
    assert_eq!(
        user["data"]["user"]["passwordHash"],
        common::password::hash_password("manager123")
    );

    let missing = post_graphql(&app, r#"{ user(username: "nobody") { id } }"#).await;
    assert!(missing["data"]["user"].is_null());
}

#[tokio::test]
async fn test_user_by_id() {
    let app = test_app().await;
    let body = post_graphql(&app, "{ userById(id: 3) { username } }").await;

    assert_eq!(body["data"]["userById"]["username"], "testuser");
}

#[tokio::test]
async fn test_add_user_defaults_to_user_role() {
    let app = test_app().await;
    let body = post_graphql(
        &app,
        r#"mutation {
            addUser(username: "newbie", email: "newbie@test.com", password: "secret1",
                    firstName: "New", lastName: "Bie") { id role isActive passwordHash lastLoginAt }
        }"#,
    )
    .await;

    assert!(first_error(&body).is_none());
    let user = &body["data"]["addUser"];
    assert_eq!(user["id"], 5);
    assert_eq!(user["role"], "User");
    assert_eq!(user["isActive"], true);
    assert!(user["lastLoginAt"].is_null());
    assert_eq!(user["passwordHash"], common::password::hash_password("secret1"));
}

#[tokio::test]
async fn test_add_user_with_explicit_role() {
    let app = test_app().await;
    let body = post_graphql(
        &app,
        r#"mutation {
            addUser(username: "boss", email: "boss@test.com", password: "secret1",
                    firstName: "Big", lastName: "Boss", role: "Manager") { role }
        }"#,
    )
    .await;

    assert_eq!(body["data"]["addUser"]["role"], "Manager");
}

#[tokio::test]
async fn test_add_duplicate_user_fails() {
    let app = test_app().await;
    let body = post_graphql(
        &app,
        r#"mutation {
            addUser(username: "testadmin", email: "other@test.com", password: "secret1",
                    firstName: "Dup", lastName: "Licate") { id }
        }"#,
    )
    .await;

    let message = first_error(&body).unwrap();
    assert!(message.starts_with("Error adding user"), "{}", message);
    assert!(message.contains("already exists"), "{}", message);
}

#[tokio::test]
async fn test_add_user_with_taken_email_fails() {
    let app = test_app().await;
    let body = post_graphql(
        &app,
        r#"mutation {
            addUser(username: "fresh", email: "testuser@test.com", password: "secret1",
                    firstName: "Fresh", lastName: "Face") { id }
        }"#,
    )
    .await;

    assert_eq!(
        first_error(&body).unwrap(),
        "Error adding user: User with username 'fresh' or the same email already exists"
    );
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_add_user_rejects_unknown_role() {
    let app = test_app().await;
    let body = post_graphql(
        &app,
        r#"mutation {
            addUser(username: "fresh", email: "fresh@test.com", password: "secret1",
                    firstName: "Fresh", lastName: "Face", role: "admin") { id }
        }"#,
    )
    .await;

    assert_eq!(first_error(&body).unwrap(), "Error adding user: Unknown role: admin");

    let lookup = post_graphql(&app, r#"{ user(username: "fresh") { id } }"#).await;
    assert!(lookup["data"]["user"].is_null());
}

#[tokio::test]
async fn test_update_user_role() {
    let app = test_app().await;
    let body = post_graphql(&app, r#"mutation { updateUserRole(id: 3, role: "Manager") { username role } }"#).await;

    assert_eq!(body["data"]["updateUserRole"]["username"], "testuser");
    assert_eq!(body["data"]["updateUserRole"]["role"], "Manager");
}

#[tokio::test]
async fn test_update_user_role_rejects_unknown_role() {
    let app = test_app().await;
    let body = post_graphql(&app, r#"mutation { updateUserRole(id: 3, role: "Root") { role } }"#).await;

    let message = first_error(&body).unwrap();
    assert_eq!(message, "Error updating user role: Unknown role: Root");
}

#[tokio::test]
async fn test_update_user_last_login() {
    let app = test_app().await;
    let body = post_graphql(&app, "mutation { updateUserLastLogin(id: 1) { lastLoginAt } }").await;

    assert!(first_error(&body).is_none());
    assert!(body["data"]["updateUserLastLogin"]["lastLoginAt"].is_string());

    let missing = post_graphql(&app, "mutation { updateUserLastLogin(id: 99) { id } }").await;
    assert!(first_error(&missing).unwrap().starts_with("Error updating user last login"));
}

#[tokio::test]
async fn test_invalid_query_reports_errors() {
    let app = test_app().await;
    let body = post_graphql(&app, "{ nonexistentField }").await;

    assert!(first_error(&body).is_some());
}

#[tokio::test]
async fn test_graphiql_is_mounted_outside_production() {
    let app = test_app().await;
    let response = app
        .oneshot(Request::builder().uri("/graphiql").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
