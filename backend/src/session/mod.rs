//! Server-side sessions.
//!
//! A successful login stores the caller's [`Identity`] in the [`SessionStore`]
//! under a random token and hands the token to the browser in a signed,
//! HTTP-only cookie. On every request [`resolve_session`] looks the cookie up
//! and places the identity in the request extensions, where handlers pick it
//! up through the `Identity` / `Option<Identity>` extractors.

use crate::error::ApiError;
use crate::state::AppState;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use common::model::user::Role;
use std::collections::HashMap;
use std::future::{ready, Ready};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "classroom_session";

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub name: String,
    pub role: Role,
}

/// Token of the session that authenticated the current request.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// In-memory map from session token to identity.
///
/// Sessions live until logout, a new login from the same browser, or
/// process restart.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Identity>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session for `identity` and returns its token.
    pub async fn create(&self, identity: Identity) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.write().await.insert(token.clone(), identity);
        token
    }

    pub async fn get(&self, token: &str) -> Option<Identity> {
        self.sessions.read().await.get(token).cloned()
    }

    pub async fn remove(&self, token: &str) -> Option<Identity> {
        self.sessions.write().await.remove(token)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Builds the signed cookie carrying `token`.
pub fn session_cookie(key: &Key, token: &str) -> Option<Cookie<'static>> {
    let cookie = Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    let mut jar = CookieJar::new();
    jar.signed_mut(key).add(cookie);
    jar.get(SESSION_COOKIE).cloned()
}

/// A cookie instructing the browser to forget the session.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Returns the token inside `cookie` if its signature is valid.
pub fn verified_token(key: &Key, cookie: Cookie<'static>) -> Option<String> {
    let mut jar = CookieJar::new();
    jar.add_original(cookie);
    jar.signed(key)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
}

/// Middleware resolving the session cookie into an [`Identity`].
///
/// Requests without a valid session pass through untouched; it is up to the
/// handler to require an identity.
pub async fn resolve_session(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    if let Some(state) = req.app_data::<web::Data<AppState>>().cloned() {
        let token = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| verified_token(&state.cookie_key, cookie));

        if let Some(token) = token {
            if let Some(identity) = state.sessions.get(&token).await {
                req.extensions_mut().insert(identity);
                req.extensions_mut().insert(SessionToken(token));
            }
        }
    }

    next.call(req).await
}

impl FromRequest for Identity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or(ApiError::NotLoggedIn),
        )
    }
}
