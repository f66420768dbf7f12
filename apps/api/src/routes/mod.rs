pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::plans;
use crate::profile;
use crate::recommend::handlers as recommend;
use crate::resources;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile)
                .put(profile::handle_update_profile)
                .delete(profile::handle_delete_profile),
        )
        // Recommendations
        .route(
            "/api/v1/recommendations",
            get(recommend::handle_recommendations),
        )
        // Plans
        .route(
            "/api/v1/plans",
            post(plans::handle_save_plan).get(plans::handle_list_plans),
        )
        // Resources
        .route("/api/v1/resources", get(resources::handle_resources))
        .with_state(state)
}
