use axum::{
    extract::State,
    http::{header, StatusCode},
    response::AppendHeaders,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{
    clear_session_cookie, create_session, delete_session, session_cookie, AuthSession,
};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub name: String,
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("All fields are required".to_string()));
    }

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Email already registered. Please log in.".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;
    // The unique index on email still backs this up against races; a
    // violation surfaces as a generic 409.
    let (user_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    info!("Created user {user_id}");
    Ok((StatusCode::CREATED, Json(SignupResponse { user_id })))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<(AppendHeaders<[(header::HeaderName, String); 1]>, Json<LoginResponse>), AppError> {
    let email = req.email.trim().to_lowercase();
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    let user = match user {
        Some(u) if verify_password(&req.password, &u.password_hash) => u,
        _ => return Err(AppError::InvalidCredentials),
    };

    sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
        .bind(user.id)
        .execute(&state.db)
        .await?;

    let session = create_session(&state.db, user.id, state.config.session_ttl_hours).await?;
    info!("User {} logged in", user.id);

    Ok((
        AppendHeaders([(
            header::SET_COOKIE,
            session_cookie(session.token, state.config.session_ttl_hours),
        )]),
        Json(LoginResponse {
            user_id: user.id,
            name: user.name,
        }),
    ))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<(AppendHeaders<[(header::HeaderName, String); 1]>, StatusCode), AppError> {
    delete_session(&state.db, session.token).await?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        StatusCode::NO_CONTENT,
    ))
}
