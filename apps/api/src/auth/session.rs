//! DB-backed login sessions. Opaque UUID tokens are stored in the `sessions`
//! table and carried by an HttpOnly cookie; handlers that require a logged-in
//! user take the `AuthSession` extractor.

use anyhow::Result;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Session, User};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "compass_session";

pub async fn create_session(pool: &PgPool, user_id: Uuid, ttl_hours: i64) -> Result<Session> {
    let token = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(ttl_hours);
    Ok(sqlx::query_as(
        r#"
        INSERT INTO sessions (token, user_id, expires_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(pool)
    .await?)
}

pub async fn delete_session(pool: &PgPool, token: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Resolves an unexpired session token to its user.
pub async fn user_for_session(pool: &PgPool, token: Uuid) -> Result<Option<User>> {
    Ok(sqlx::query_as(
        r#"
        SELECT u.*
        FROM users u
        JOIN sessions s ON s.user_id = u.id
        WHERE s.token = $1 AND s.expires_at > now()
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?)
}

/// Set-Cookie value for a fresh session.
pub fn session_cookie(token: Uuid, ttl_hours: i64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl_hours * 3600
    )
}

/// Set-Cookie value that expires the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extracts the session token from the request's Cookie header, if present.
pub fn token_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}

/// The logged-in user for the current request. Rejects with 401 when the
/// cookie is missing, malformed, expired, or orphaned.
pub struct AuthSession {
    pub user: User,
    pub token: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = token_from_headers(&parts.headers).ok_or(AppError::Unauthorized)?;
        let user = user_for_session(&state.db, token)
            .await
            .map_err(AppError::Internal)?
            .ok_or(AppError::Unauthorized)?;
        Ok(AuthSession { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_token_parsed_from_cookie_header() {
        let token = Uuid::new_v4();
        let headers = headers_with_cookie(&format!("{SESSION_COOKIE}={token}"));
        assert_eq!(token_from_headers(&headers), Some(token));
    }

    #[test]
    fn test_token_found_among_other_cookies() {
        let token = Uuid::new_v4();
        let headers =
            headers_with_cookie(&format!("theme=dark; {SESSION_COOKIE}={token}; lang=en"));
        assert_eq!(token_from_headers(&headers), Some(token));
    }

    #[test]
    fn test_missing_cookie_header_yields_none() {
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_malformed_token_yields_none() {
        let headers = headers_with_cookie(&format!("{SESSION_COOKIE}=not-a-uuid"));
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn test_clear_cookie_zeroes_max_age() {
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn test_session_cookie_carries_ttl_seconds() {
        let cookie = session_cookie(Uuid::new_v4(), 2);
        assert!(cookie.contains("Max-Age=7200"));
        assert!(cookie.contains("HttpOnly"));
    }
}
