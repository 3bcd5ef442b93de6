//! Wires the web router to the API schema running in-process

use std::sync::Arc;

use api::{ApiSchema, build_schema, models::NewUser};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use chrono::{Duration, Utc};
use common::{Role, password::hash_password};
use serde_json::Value;
use tower::ServiceExt;
use web::{
    config::SessionConfig,
    error::ClientError,
    graphql_client::{GraphQlClient, GraphQlResponse},
    models::User,
    routes::create_router,
    session::{SESSION_COOKIE, SessionKeys},
};

/// Executes queries directly against the API schema
pub struct InProcessClient {
    schema: ApiSchema,
}

#[async_trait]
impl GraphQlClient for InProcessClient {
    async fn execute(&self, query: &str, variables: Option<Value>) -> Result<GraphQlResponse, ClientError> {
        let mut request = async_graphql::Request::new(query);
        if let Some(variables) = variables {
            request = request.variables(async_graphql::Variables::from_json(variables));
        }

        let response = self.schema.execute(request).await;
        let body = serde_json::to_value(&response)?;
        Ok(serde_json::from_value(body)?)
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: api::AppState,
}

pub fn session_config() -> SessionConfig {
    SessionConfig {
        secret: "test-secret".to_string(),
        lifetime_hours: 8,
        secure_cookie: false,
    }
}

/// `name=value` session cookie for `user`, issued `age` ago
pub fn aged_session(user: &User, persistent: bool, age: Duration) -> String {
    let keys = SessionKeys::new(&session_config());
    let claims = keys.claims_for(user, persistent, Utc::now() - age);
    let cookie = keys.issue(&claims).unwrap();
    format!("{}={}", cookie.name(), cookie.value())
}

/// All session `Set-Cookie` headers of a response
pub fn session_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter(|value| value.starts_with(&format!("{}=", SESSION_COOKIE)))
        .map(str::to_string)
        .collect()
}

/// Seeded API store plus an inactive account, behind the web router
pub async fn test_app() -> TestApp {
    let store = api::AppState::in_memory();
    api::seed::initialize(&store).await.unwrap();
    store
        .users
        .create(NewUser {
            username: "inactiveuser".to_string(),
            email: "inactiveuser@example.com".to_string(),
            password_hash: hash_password("inactive123"),
            first_name: "Inactive".to_string(),
            last_name: "User".to_string(),
            role: Role::User,
            is_active: false,
        })
        .await
        .unwrap();

    let client = InProcessClient {
        schema: build_schema(store.clone()),
    };
    TestApp {
        router: create_router(web::AppState::new(Arc::new(client), &session_config())),
        store,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>, ajax: bool) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if ajax {
            builder = builder.header("X-Requested-With", "XMLHttpRequest");
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    /// Log in and return the `name=value` session cookie
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/Account/Login",
                &format!("username={}&password={}", username, password),
                None,
                false,
            )
            .await;
        session_cookie(&response).expect("login should set the session cookie")
    }
}

/// `name=value` of the session cookie set by a response
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{}=", SESSION_COOKIE)))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
