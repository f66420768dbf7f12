//! Resource lookup. A career query is fuzzy-matched; a miss echoes the query
//! back with an empty list rather than a 404.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::fuzzy_find_career;
use crate::errors::AppError;
use crate::models::catalog::Resource;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct ResourceQuery {
    pub career: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResourceLink {
    pub title: String,
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career: Option<String>,
    pub resources: Vec<ResourceLink>,
}

/// GET /api/v1/resources?career=<name>
pub async fn handle_resources(
    State(state): State<AppState>,
    Query(params): Query<ResourceQuery>,
) -> Result<Json<ResourcesResponse>, AppError> {
    let query = params.career.unwrap_or_default().trim().to_string();

    if query.is_empty() {
        let rows: Vec<Resource> =
            sqlx::query_as("SELECT * FROM resources ORDER BY title LIMIT $1")
                .bind(DEFAULT_PAGE_SIZE)
                .fetch_all(&state.db)
                .await?;
        return Ok(Json(ResourcesResponse {
            career: None,
            resources: rows
                .into_iter()
                .map(|r| ResourceLink {
                    title: r.title,
                    url: r.url,
                })
                .collect(),
        }));
    }

    let Some(career) = fuzzy_find_career(&state.db, &query)
        .await
        .map_err(AppError::Internal)?
    else {
        // Unmatched query: echo the title back with an empty list, not a 404.
        return Ok(Json(ResourcesResponse {
            career: Some(query),
            resources: vec![],
        }));
    };

    // Union of the career's own resources and the resources linked to its
    // required skills, deduped by title.
    let rows: Vec<(String, Option<String>)> = sqlx::query_as(
        r#"
        SELECT DISTINCT r.title, r.url
        FROM resources r
        LEFT JOIN resource_skills rs ON rs.resource_id = r.id
        LEFT JOIN career_skills cs ON cs.skill_id = rs.skill_id
        WHERE r.career_id = $1 OR cs.career_id = $1
        ORDER BY r.title
        "#,
    )
    .bind(career.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ResourcesResponse {
        career: Some(career.title),
        resources: rows
            .into_iter()
            .map(|(title, url)| ResourceLink { title, url })
            .collect(),
    }))
}
