//! Profile handlers plus the skill-set normalization helpers shared by the
//! recommendation and plan endpoints.

use std::collections::HashSet;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::session::AuthSession;
use crate::errors::AppError;
use crate::models::user::{User, UserSkill};
use crate::state::AppState;

/// Splits a comma-separated form value, trimming entries and dropping blanks.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// A user's effective skill set, lowercased: the normalized user_skills rows,
/// or a parse of the free-text skills field when no rows exist.
pub fn effective_skill_set(skill_rows: &[String], skills_text: &str) -> HashSet<String> {
    if skill_rows.is_empty() {
        split_csv(skills_text)
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect()
    } else {
        skill_rows.iter().map(|s| s.to_lowercase()).collect()
    }
}

/// The user's normalized skill rows, ordered by name.
pub async fn user_skill_rows(
    pool: &sqlx::PgPool,
    user_id: Uuid,
) -> Result<Vec<UserSkill>, anyhow::Error> {
    Ok(
        sqlx::query_as("SELECT * FROM user_skills WHERE user_id = $1 ORDER BY name")
            .bind(user_id)
            .fetch_all(pool)
            .await?,
    )
}

/// Loads the effective skill set for a user from the database.
pub async fn effective_skills(
    pool: &sqlx::PgPool,
    user: &User,
) -> Result<HashSet<String>, anyhow::Error> {
    let names: Vec<String> = user_skill_rows(pool, user.id)
        .await?
        .into_iter()
        .map(|row| row.name)
        .collect();
    Ok(effective_skill_set(&names, &user.skills_text))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub interests: String,
    pub skills_text: String,
    /// Normalized user_skills rows, as stored.
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub skills: String,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = session.user;
    let rows = user_skill_rows(&state.db, user.id)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(ProfileResponse {
        user_id: user.id,
        name: user.name,
        email: user.email,
        interests: user.interests,
        skills_text: user.skills_text,
        skills: rows.into_iter().map(|row| row.name).collect(),
    }))
}

/// PUT /api/v1/profile
///
/// Updates the user row and replaces the normalized user_skills rows in one
/// transaction, linking each entry to the catalog skill with the same
/// lowercased name when one exists.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    session: AuthSession,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name required".to_string()));
    }
    let user_id = session.user.id;

    let mut tx = state.db.begin().await?;

    sqlx::query("UPDATE users SET name = $1, interests = $2, skills_text = $3 WHERE id = $4")
        .bind(name)
        .bind(req.interests.trim())
        .bind(req.skills.trim())
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    // Clear old rows first so the replacement cannot accumulate duplicates.
    sqlx::query("DELETE FROM user_skills WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    for skill_name in split_csv(&req.skills) {
        let lowered = skill_name.to_lowercase();
        let skill_id: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM skills WHERE LOWER(name) = $1")
                .bind(&lowered)
                .fetch_optional(&mut *tx)
                .await?;
        sqlx::query(
            r#"
            INSERT INTO user_skills (user_id, skill_id, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, name) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(skill_id.map(|(id,)| id))
        .bind(&skill_name)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!("Updated profile for user {user_id}");

    let user: User = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&state.db)
        .await?;
    let rows = user_skill_rows(&state.db, user_id)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(ProfileResponse {
        user_id: user.id,
        name: user.name,
        email: user.email,
        interests: user.interests,
        skills_text: user.skills_text,
        skills: rows.into_iter().map(|row| row.name).collect(),
    }))
}

/// DELETE /api/v1/profile
///
/// Application-level cascade delete of the user's skills, plans, steps,
/// sessions, and the user row, executed in one transaction.
pub async fn handle_delete_profile(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<StatusCode, AppError> {
    let user_id = session.user.id;
    let mut tx = state.db.begin().await?;

    sqlx::query(
        "DELETE FROM plan_steps WHERE plan_id IN (SELECT id FROM plans WHERE user_id = $1)",
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    sqlx::query("DELETE FROM plans WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM user_skills WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM sessions WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!("Deleted user {user_id} and dependent rows");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_csv_trims_and_drops_blanks() {
        assert_eq!(
            split_csv(" python , sql ,, data-structures ,"),
            vec!["python", "sql", "data-structures"]
        );
    }

    #[test]
    fn test_split_csv_empty_input() {
        assert!(split_csv("").is_empty());
        assert!(split_csv("  , ,").is_empty());
    }

    #[test]
    fn test_effective_set_prefers_normalized_rows() {
        let rows = vec!["Python".to_string(), "SQL".to_string()];
        let set = effective_skill_set(&rows, "figma, design");
        assert!(set.contains("python"));
        assert!(set.contains("sql"));
        assert!(!set.contains("figma"));
    }

    #[test]
    fn test_effective_set_falls_back_to_free_text() {
        let set = effective_skill_set(&[], "Figma, Design-Principles");
        assert!(set.contains("figma"));
        assert!(set.contains("design-principles"));
    }

    #[test]
    fn test_effective_set_empty_everywhere() {
        assert!(effective_skill_set(&[], "").is_empty());
    }
}
