//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::{
    AdminUser, CreateUserInput, CreateUserUseCase, LoginInput, LoginUseCase, SessionTokenCodec,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub codec: Arc<SessionTokenCodec>,
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            codec: self.codec.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.codec.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        user: output.user.into(),
    }))
}

// ============================================================================
// Users
// ============================================================================

/// POST /api/users (admin)
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    admin: AdminUser,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = CreateUserUseCase::new(state.repo.clone());

    let user = use_case
        .execute(
            CreateUserInput {
                email: req.email,
                password: req.password,
                username: req.username,
            },
            admin.user_id(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}
