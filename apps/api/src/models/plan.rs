use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub career_id: Option<Uuid>,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// One flattened roadmap step. `sort_order` is 1-based and strictly
/// increasing within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanStep {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub title: String,
    pub sort_order: i32,
}
