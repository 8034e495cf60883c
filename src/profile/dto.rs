use serde::Deserialize;

use crate::store::{ActivityLevel, Gender};

/// Request body for profile creation. The owning account comes from the
/// bearer token, not the body.
#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub age: i32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub health_goals: Vec<String>,
    pub activity_level: ActivityLevel,
}
