//! Career/skill catalog queries. Skills are get-or-create on first reference
//! and stored lowercased so the case-insensitive uniqueness invariant holds.

use std::collections::HashMap;

use anyhow::Result;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::catalog::{Career, Skill};

/// A catalog career joined with its required skill names, in requirement
/// order (importance descending, then name).
#[derive(Debug, Clone)]
pub struct CareerWithSkills {
    pub career: Career,
    pub required_skills: Vec<String>,
}

/// Loads the full catalog with requirement lists. Careers come back in
/// seeding order (created_at, then title) so ranking ties are deterministic.
pub async fn load_catalog(pool: &PgPool) -> Result<Vec<CareerWithSkills>> {
    let careers: Vec<Career> =
        sqlx::query_as("SELECT * FROM careers ORDER BY created_at, title")
            .fetch_all(pool)
            .await?;

    let links: Vec<(Uuid, String)> = sqlx::query_as(
        r#"
        SELECT cs.career_id, s.name
        FROM career_skills cs
        JOIN skills s ON s.id = cs.skill_id
        ORDER BY cs.career_id, cs.importance DESC, s.name
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut by_career: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (career_id, name) in links {
        by_career.entry(career_id).or_default().push(name);
    }

    Ok(careers
        .into_iter()
        .map(|career| {
            let required_skills = by_career.remove(&career.id).unwrap_or_default();
            CareerWithSkills {
                career,
                required_skills,
            }
        })
        .collect())
}

/// Required skill names for one career, in requirement order.
pub async fn required_skill_names(pool: &PgPool, career_id: Uuid) -> Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT s.name
        FROM career_skills cs
        JOIN skills s ON s.id = cs.skill_id
        WHERE cs.career_id = $1
        ORDER BY cs.importance DESC, s.name
        "#,
    )
    .bind(career_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}

/// Fuzzy title lookup used by the resources endpoint.
pub async fn fuzzy_find_career(pool: &PgPool, query: &str) -> Result<Option<Career>> {
    Ok(
        sqlx::query_as("SELECT * FROM careers WHERE title ILIKE $1 ORDER BY title LIMIT 1")
            .bind(format!("%{query}%"))
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn get_or_create_career(conn: &mut PgConnection, title: &str) -> Result<Career> {
    let existing: Option<Career> = sqlx::query_as("SELECT * FROM careers WHERE title = $1")
        .bind(title)
        .fetch_optional(&mut *conn)
        .await?;
    if let Some(career) = existing {
        return Ok(career);
    }
    Ok(sqlx::query_as(
        r#"
        INSERT INTO careers (title) VALUES ($1)
        ON CONFLICT (title) DO UPDATE SET title = EXCLUDED.title
        RETURNING *
        "#,
    )
    .bind(title)
    .fetch_one(conn)
    .await?)
}

pub async fn get_or_create_skill(conn: &mut PgConnection, name: &str) -> Result<Skill> {
    let name = name.trim().to_lowercase();
    let existing: Option<Skill> = sqlx::query_as("SELECT * FROM skills WHERE LOWER(name) = $1")
        .bind(&name)
        .fetch_optional(&mut *conn)
        .await?;
    if let Some(skill) = existing {
        return Ok(skill);
    }
    Ok(
        sqlx::query_as("INSERT INTO skills (name) VALUES ($1) RETURNING *")
            .bind(&name)
            .fetch_one(conn)
            .await?,
    )
}

/// Links a skill to a career if not already required.
pub async fn ensure_requirement(
    conn: &mut PgConnection,
    career_id: Uuid,
    skill_id: Uuid,
    importance: f64,
    level: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO career_skills (career_id, skill_id, importance, level)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (career_id, skill_id) DO NOTHING
        "#,
    )
    .bind(career_id)
    .bind(skill_id)
    .bind(importance)
    .bind(level)
    .execute(conn)
    .await?;
    Ok(())
}
