use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::{AppError, Result},
    profile::dto::CreateProfileRequest,
    state::AppState,
    store::{NewProfile, Profile, ProfileChanges},
};

pub fn profile_routes() -> Router<AppState> {
    // GET addresses by owning user id, PUT by profile id (inherited API shape)
    Router::new()
        .route("/profiles", post(create_profile))
        .route("/profiles/:id", get(get_profile).put(update_profile))
}

fn validate_age(age: i32) -> Result<()> {
    if !(8..=120).contains(&age) {
        return Err(AppError::BadRequest("Age must be between 8 and 120".into()));
    }
    Ok(())
}

/// Store-level absence is a valid result; only the HTTP surface turns it
/// into a 404.
///
/// Any authenticated bearer may address any account's profile; the token
/// only gates access, it does not scope it. Inherited API shape.
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Profile>> {
    let profile = state
        .store
        .find_profile_by_account(user_id)
        .await?
        .ok_or(AppError::ProfileNotFound)?;
    Ok(Json(profile))
}

#[instrument(skip(state, payload))]
pub async fn create_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<Profile>)> {
    validate_age(payload.age)?;

    // One profile per account
    if state
        .store
        .find_profile_by_account(user_id)
        .await?
        .is_some()
    {
        warn!(%user_id, "profile already exists");
        return Err(AppError::ProfileAlreadyExists);
    }

    let profile = state
        .store
        .create_profile(NewProfile {
            user_id,
            age: payload.age,
            gender: payload.gender,
            height_cm: payload.height_cm,
            weight_kg: payload.weight_kg,
            dietary_preferences: payload.dietary_preferences,
            health_goals: payload.health_goals,
            activity_level: payload.activity_level,
        })
        .await?;

    info!(%user_id, profile_id = %profile.id, "profile created");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Addresses the profile by its own id, not the caller's account, and does
/// not check ownership. Inherited API shape, same as [`get_profile`].
#[instrument(skip(state, changes))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(profile_id): Path<Uuid>,
    Json(changes): Json<ProfileChanges>,
) -> Result<Json<Profile>> {
    if let Some(age) = changes.age {
        validate_age(age)?;
    }

    let updated = state
        .store
        .update_profile(profile_id, changes)
        .await?
        .ok_or(AppError::ProfileNotFound)?;

    info!(%user_id, %profile_id, "profile updated");
    Ok(Json(updated))
}
