//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::AuthGate;

/// Create the Auth router for any repository implementation
///
/// `POST /login` is public; `POST /users` sits behind both gates.
pub fn auth_router<R>(repo: Arc<R>, gate: &AuthGate) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo,
        codec: gate.codec().clone(),
    };

    let public = Router::new().route("/login", post(handlers::login::<R>));

    let admin = gate.protect_admin(Router::new().route("/users", post(handlers::create_user::<R>)));

    public.merge(admin).with_state(state)
}
