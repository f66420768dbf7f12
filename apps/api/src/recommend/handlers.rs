use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::session::AuthSession;
use crate::catalog::load_catalog;
use crate::errors::AppError;
use crate::profile::{effective_skills, split_csv};
use crate::recommend::roadmap::{build_roadmap, Phase};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RankedCareer {
    pub career: String,
    pub score: f64,
    pub required_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub roadmap: Vec<Phase>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub user_id: Uuid,
    pub recommendations: Vec<RankedCareer>,
}

/// GET /api/v1/recommendations
///
/// Ranks the career catalog against the logged-in user's interests and
/// effective skill set, attaching the skill gap and generated roadmap per
/// career.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let user = session.user;
    let interests = split_csv(&user.interests);
    let user_skills = effective_skills(&state.db, &user)
        .await
        .map_err(AppError::Internal)?;
    let catalog = load_catalog(&state.db).await.map_err(AppError::Internal)?;

    let ranked = state.scorer.rank(&interests, &user_skills, &catalog).await?;

    let recommendations = ranked
        .into_iter()
        .map(|rec| {
            let roadmap =
                build_roadmap(&rec.career.title, &rec.required_skills, &rec.missing_skills);
            RankedCareer {
                career: rec.career.title,
                score: rec.score,
                required_skills: rec.required_skills,
                missing_skills: rec.missing_skills,
                roadmap,
            }
        })
        .collect();

    Ok(Json(RecommendationsResponse {
        user_id: user.id,
        recommendations,
    }))
}
