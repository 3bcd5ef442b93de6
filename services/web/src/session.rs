//! Cookie sessions
//!
//! The session is an HS256-signed token in an HTTP-only cookie carrying the
//! user's claims. It lives for the configured lifetime and slides: a request
//! made after half the lifetime has elapsed gets a fresh cookie.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use common::{Permission, Role};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{config::SessionConfig, error::WebError, models::User};

pub const SESSION_COOKIE: &str = "customer_hub_session";
pub const LOGIN_PATH: &str = "/Account/Login";

/// Identity attributes carried by the session cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Username
    pub name: String,
    /// User id
    pub name_identifier: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    /// Survives browser restarts ("remember me")
    pub persistent: bool,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `None` when the role claim is not a known role
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    pub fn is_in_role(&self, allowed: &[Role]) -> bool {
        self.role().is_some_and(|role| allowed.contains(&role))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        common::roles::has_permission(&self.role, permission)
    }
}

/// Signs, verifies and renews session cookies
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
    secure: bool,
}

impl SessionKeys {
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            lifetime: Duration::hours(config.lifetime_hours),
            secure: config.secure_cookie,
        }
    }

    /// Claims for a freshly authenticated user
    pub fn claims_for(&self, user: &User, persistent: bool, now: DateTime<Utc>) -> SessionClaims {
        SessionClaims {
            name: user.username.clone(),
            name_identifier: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
            persistent,
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        }
    }

    /// Signed session cookie for the given claims
    pub fn issue(&self, claims: &SessionClaims) -> Result<Cookie<'static>, WebError> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?;

        let mut cookie = Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build();

        if claims.persistent {
            cookie.set_max_age(time::Duration::seconds(self.lifetime.num_seconds()));
        }

        Ok(cookie)
    }

    pub fn decode(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        Ok(decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?.claims)
    }

    /// The session from the request's cookie, if present and valid
    pub fn read(&self, jar: &CookieJar) -> Option<SessionClaims> {
        let cookie = jar.get(SESSION_COOKIE)?;
        self.decode(cookie.value())
            .inspect_err(|e| debug!("Rejected session cookie: {}", e))
            .ok()
    }

    /// More than half of the lifetime has elapsed
    pub fn needs_renewal(&self, claims: &SessionClaims, now: DateTime<Utc>) -> bool {
        now.timestamp() - claims.iat > self.lifetime.num_seconds() / 2
    }

    /// Same identity, new issue and expiry times
    pub fn renewed(&self, claims: &SessionClaims, now: DateTime<Utc>) -> SessionClaims {
        SessionClaims {
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
            ..claims.clone()
        }
    }

    /// Cookie that clears the session
    pub fn removal() -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, "")).path("/").build()
    }
}

/// Authenticated caller
///
/// Rejects anonymous requests with a redirect to the login page carrying
/// the requested path as `ReturnUrl`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionClaims);

impl CurrentUser {
    /// Require the caller's role to be one of `allowed`
    pub fn require(&self, allowed: &[Role], ajax: bool) -> Result<(), WebError> {
        if self.0.is_in_role(allowed) {
            Ok(())
        } else {
            debug!("User {} with role {} denied access", self.0.name, self.0.role);
            Err(WebError::AccessDenied { ajax })
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        match keys.read(&jar) {
            Some(claims) => Ok(CurrentUser(claims)),
            None => {
                let requested = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or("/");
                let location = format!("{}?ReturnUrl={}", LOGIN_PATH, urlencoding::encode(requested));
                Err(Redirect::to(&location).into_response())
            }
        }
    }
}

/// Re-issue the session cookie once half of its lifetime has elapsed
///
/// Responses that already set the session cookie (login, logout) are left
/// untouched.
pub async fn renew_session(
    State(keys): State<SessionKeys>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let now = Utc::now();
    let renewed = keys
        .read(&jar)
        .filter(|claims| keys.needs_renewal(claims, now))
        .map(|claims| keys.renewed(&claims, now));

    let response = next.run(request).await;

    let Some(claims) = renewed else {
        return response;
    };

    let sets_session = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with(SESSION_COOKIE));
    if sets_session {
        return response;
    }

    match keys.issue(&claims) {
        Ok(cookie) => {
            debug!("Renewed session for {}", claims.name);
            (jar.add(cookie), response).into_response()
        }
        Err(e) => {
            error!("Failed to renew session for {}: {}", claims.name, e);
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new(&SessionConfig {
            secret: "test-secret".to_string(),
            lifetime_hours: 8,
            secure_cookie: false,
        })
    }

    fn manager() -> User {
        User {
            id: 2,
            username: "manager".to_string(),
            email: "manager@example.com".to_string(),
            first_name: "Manager".to_string(),
            last_name: "User".to_string(),
            role: "Manager".to_string(),
            ..User::default()
        }
    }

    #[test]
    fn test_issue_and_decode() {
        let keys = keys();
        let claims = keys.claims_for(&manager(), false, Utc::now());
        let cookie = keys.issue(&claims).unwrap();

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert!(cookie.max_age().is_none());

        let decoded = keys.decode(cookie.value()).unwrap();
        assert_eq!(decoded, claims);
        assert_eq!(decoded.role(), Some(Role::Manager));
        assert_eq!(decoded.full_name(), "Manager User");
    }

    #[test]
    fn test_persistent_cookie_has_max_age() {
        let keys = keys();
        let claims = keys.claims_for(&manager(), true, Utc::now());
        let cookie = keys.issue(&claims).unwrap();

        assert_eq!(cookie.max_age(), Some(time::Duration::hours(8)));
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let keys = keys();
        let issued = Utc::now() - Duration::hours(9);
        let claims = keys.claims_for(&manager(), false, issued);
        let cookie = keys.issue(&claims).unwrap();

        assert!(keys.decode(cookie.value()).is_err());
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let other = SessionKeys::new(&SessionConfig {
            secret: "another-secret".to_string(),
            lifetime_hours: 8,
            secure_cookie: false,
        });
        let claims = other.claims_for(&manager(), false, Utc::now());
        let cookie = other.issue(&claims).unwrap();

        assert!(keys().decode(cookie.value()).is_err());
    }

    #[test]
    fn test_sliding_renewal_after_half_lifetime() {
        let keys = keys();
        let issued = Utc::now() - Duration::hours(5);
        let claims = keys.claims_for(&manager(), false, issued);
        let now = Utc::now();

        assert!(keys.needs_renewal(&claims, now));
        assert!(!keys.needs_renewal(&keys.claims_for(&manager(), false, now), now));

        let renewed = keys.renewed(&claims, now);
        assert_eq!(renewed.name, "manager");
        assert_eq!(renewed.exp, (now + Duration::hours(8)).timestamp());
    }

    #[test]
    fn test_role_checks() {
        let claims = keys().claims_for(&manager(), false, Utc::now());
        let user = CurrentUser(claims);

        assert!(user.require(&[Role::Admin, Role::Manager], false).is_ok());
        assert!(matches!(
            user.require(&[Role::Admin], true),
            Err(WebError::AccessDenied { ajax: true })
        ));
        assert!(user.0.has_permission(Permission::EditCustomer));
        assert!(!user.0.has_permission(Permission::DeleteCustomer));
    }
}
