use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::{AppError, Result},
    state::AppState,
};

use super::generator;
use super::types::DailyPlan;

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/plans/daily", get(get_daily_plan))
        .route("/recipes/:meal_name/steps", get(get_recipe_steps))
}

#[derive(Debug, Serialize)]
pub struct RecipeStepsResponse {
    pub meal_name: String,
    pub steps: Vec<String>,
}

/// Generates today's plan for the authenticated user. The generation path
/// degrades to fallbacks internally, so the only client-visible error is a
/// missing profile.
#[instrument(skip(state))]
pub async fn get_daily_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DailyPlan>> {
    let profile = state
        .store
        .find_profile_by_account(user_id)
        .await?
        .ok_or(AppError::ProfileNotFound)?;

    let plan = generator::daily_plan(state.gateway.as_ref(), &profile).await;
    info!(%user_id, meals = plan.meals.len(), "daily plan generated");
    Ok(Json(plan))
}

#[instrument(skip(state))]
pub async fn get_recipe_steps(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(meal_name): Path<String>,
) -> Result<Json<RecipeStepsResponse>> {
    let steps = generator::recipe_steps(state.gateway.as_ref(), &meal_name).await;
    info!(%user_id, meal_name, steps = steps.len(), "recipe steps fetched");
    Ok(Json(RecipeStepsResponse { meal_name, steps }))
}
