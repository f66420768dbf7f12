//! Plan persistence. Saving a roadmap is atomic: the plan row and every
//! flattened step commit in a single transaction, so a plan can never be left
//! with a partial step sequence.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::session::AuthSession;
use crate::catalog::get_or_create_career;
use crate::errors::AppError;
use crate::models::plan::{Plan, PlanStep};
use crate::profile::effective_skills;
use crate::recommend::roadmap::{build_roadmap, flatten_plan_steps};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SavePlanRequest {
    pub career: String,
    /// Missing skills as shown to the user. Recomputed from the requirement
    /// links when absent.
    #[serde(default)]
    pub missing: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SavePlanResponse {
    pub plan_id: Uuid,
    pub career: String,
    pub step_count: usize,
}

/// POST /api/v1/plans
pub async fn handle_save_plan(
    State(state): State<AppState>,
    session: AuthSession,
    Json(req): Json<SavePlanRequest>,
) -> Result<(StatusCode, Json<SavePlanResponse>), AppError> {
    let career_title = req.career.trim();
    if career_title.is_empty() {
        return Err(AppError::Validation("Career required".to_string()));
    }
    let user = session.user;

    let user_skills = effective_skills(&state.db, &user)
        .await
        .map_err(AppError::Internal)?;

    let mut tx = state.db.begin().await?;

    let career = get_or_create_career(&mut *tx, career_title)
        .await
        .map_err(AppError::Internal)?;

    let required: Vec<String> = sqlx::query_as(
        r#"
        SELECT s.name
        FROM career_skills cs
        JOIN skills s ON s.id = cs.skill_id
        WHERE cs.career_id = $1
        ORDER BY cs.importance DESC, s.name
        "#,
    )
    .bind(career.id)
    .fetch_all(&mut *tx)
    .await?
    .into_iter()
    .map(|(name,): (String,)| name)
    .collect();

    let missing: Vec<String> = if req.missing.is_empty() {
        required
            .iter()
            .filter(|r| !user_skills.contains(&r.to_lowercase()))
            .cloned()
            .collect()
    } else {
        req.missing
    };

    let phases = build_roadmap(&career.title, &required, &missing);
    let steps = flatten_plan_steps(&phases);

    let (plan_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO plans (user_id, career_id, title) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user.id)
    .bind(career.id)
    .bind(format!("Roadmap for {}", career.title))
    .fetch_one(&mut *tx)
    .await?;

    for (idx, title) in steps.iter().enumerate() {
        sqlx::query("INSERT INTO plan_steps (plan_id, title, sort_order) VALUES ($1, $2, $3)")
            .bind(plan_id)
            .bind(title)
            .bind((idx + 1) as i32)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    info!(
        "Saved plan {plan_id} ({} steps) for user {}",
        steps.len(),
        user.id
    );

    Ok((
        StatusCode::CREATED,
        Json(SavePlanResponse {
            plan_id,
            career: career.title,
            step_count: steps.len(),
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct PlanWithSteps {
    pub id: Uuid,
    pub title: String,
    pub career: Option<String>,
    pub created_at: DateTime<Utc>,
    pub steps: Vec<PlanStep>,
}

/// GET /api/v1/plans
pub async fn handle_list_plans(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<PlanWithSteps>>, AppError> {
    let rows: Vec<Plan> =
        sqlx::query_as("SELECT * FROM plans WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(session.user.id)
            .fetch_all(&state.db)
            .await?;

    let mut plans = Vec::with_capacity(rows.len());
    for plan in rows {
        let career: Option<(String,)> = match plan.career_id {
            Some(career_id) => {
                sqlx::query_as("SELECT title FROM careers WHERE id = $1")
                    .bind(career_id)
                    .fetch_optional(&state.db)
                    .await?
            }
            None => None,
        };
        let steps: Vec<PlanStep> = sqlx::query_as(
            "SELECT * FROM plan_steps WHERE plan_id = $1 ORDER BY sort_order ASC",
        )
        .bind(plan.id)
        .fetch_all(&state.db)
        .await?;
        plans.push(PlanWithSteps {
            id: plan.id,
            title: plan.title,
            career: career.map(|(title,)| title),
            created_at: plan.created_at,
            steps,
        });
    }

    Ok(Json(plans))
}
