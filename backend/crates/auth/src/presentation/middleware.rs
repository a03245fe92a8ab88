//! Auth Middleware
//!
//! `require_auth` (AuthGate) validates the bearer token and stores an
//! [`AuthenticatedUser`] in the request extensions. `require_admin`
//! (AdminGate) consumes that value and stores an [`AdminUser`]. Use
//! [`AuthGate::protect_admin`] rather than layering these by hand so the
//! order cannot be inverted.

use axum::Router;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::{self, Next};
use axum::response::Response;
use chrono::Utc;
use std::sync::Arc;

use crate::application::authorize::{authenticate, authorize_admin};
use crate::application::session_token::SessionTokenCodec;
use crate::error::AuthError;

pub use crate::application::authorize::{AdminUser, AuthenticatedUser};

/// Middleware state for the AuthGate
#[derive(Clone)]
pub struct AuthGate {
    codec: Arc<SessionTokenCodec>,
}

impl AuthGate {
    pub fn new(codec: Arc<SessionTokenCodec>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &Arc<SessionTokenCodec> {
        &self.codec
    }

    /// Require a valid session on every route of `router`
    pub fn protect<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(self.clone(), require_auth))
    }

    /// Require an administrator session on every route of `router`
    pub fn protect_admin<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        // Layers run outermost first: AuthGate, then AdminGate
        let router = router.layer(middleware::from_fn(require_admin));
        self.protect(router)
    }
}

/// AuthGate: reject with 401 unless a valid bearer token is present
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = authenticate(req.headers(), &gate.codec, Utc::now())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// AdminGate: reject with 403 unless the authenticated caller is an admin
pub async fn require_admin(
    user: AuthenticatedUser,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let admin = authorize_admin(user)?;
    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AuthError::Internal("AuthGate not applied to this route".into()))
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .cloned()
            .ok_or_else(|| AuthError::Internal("AdminGate not applied to this route".into()))
    }
}
