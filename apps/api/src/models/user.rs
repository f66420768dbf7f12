use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2id hash. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Free-text comma-separated interests, as entered on the profile form.
    pub interests: String,
    /// Free-text skills; fallback source when no normalized user_skills rows exist.
    pub skills_text: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSkill {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Link to the catalog skill with the same lowercased name, when one exists.
    pub skill_id: Option<Uuid>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub token: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
