//! Two-phase meal-plan generation: nutrient targeting, then meal
//! composition constrained by those targets.
//!
//! This path never fails. Each phase substitutes a deterministic fallback
//! on any gateway or parsing error, so callers always get a usable value.
//! Substitutions are logged at `warn`.

use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::warn;

use crate::error::AppError;
use crate::gateway::TextCompletion;
use crate::store::Profile;

use super::fallback::fallback_plan;
use super::normalize::extract_json;
use super::types::{DailyPlan, NutrientTargets, PlanPayload};

/// Targets used when the model gives no usable answer.
pub const DEFAULT_TARGETS: NutrientTargets = NutrientTargets {
    calories: 2000.0,
    protein: 150.0,
    carbs: 200.0,
    fat: 70.0,
};

const RECIPE_UNAVAILABLE: &str =
    "Recipe steps could not be generated. Please try again later.";

fn today_iso() -> String {
    OffsetDateTime::now_utc().date().to_string()
}

fn targets_prompt(profile: &Profile) -> String {
    format!(
        "Calculate the daily nutrient requirements for a person with the following characteristics:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Height: {height} cm\n\
         - Weight: {weight} kg\n\
         - Activity level: {activity}\n\
         - Health goals: {goals}\n\
         \n\
         Please provide only JSON output with the following structure:\n\
         {{\n\
           \"calories\": number,\n\
           \"protein\": number,\n\
           \"carbs\": number,\n\
           \"fat\": number\n\
         }}",
        age = profile.age,
        gender = profile.gender.as_str(),
        height = profile.height_cm,
        weight = profile.weight_kg,
        activity = profile.activity_level.as_str(),
        goals = profile.health_goals.join(", "),
    )
}

fn plan_prompt(profile: &Profile, targets: &NutrientTargets) -> String {
    format!(
        "Generate an Indian meal plan for one day for a person with the following details:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Height: {height} cm\n\
         - Weight: {weight} kg\n\
         - Activity level: {activity}\n\
         - Health goals: {goals}\n\
         - Dietary preferences: {prefs}\n\
         \n\
         Daily nutrient targets:\n\
         - Calories: {calories} kcal\n\
         - Protein: {protein} g\n\
         - Carbohydrates: {carbs} g\n\
         - Fat: {fat} g\n\
         \n\
         Please provide meals for breakfast, lunch, evening snack, and dinner.\n\
         Each meal should include:\n\
         1. Name of the dish\n\
         2. Nutrient content (calories, protein, carbs, fat)\n\
         3. Ingredients with quantities\n\
         4. Brief preparation steps\n\
         \n\
         Please provide only JSON output with the following structure:\n\
         {{\n\
           \"meals\": [\n\
             {{\n\
               \"name\": \"string\",\n\
               \"category\": \"breakfast/lunch/snack/dinner\",\n\
               \"nutrients\": {{\"calories\": number, \"protein\": number, \"carbs\": number, \"fat\": number}},\n\
               \"ingredients\": [\"string\"],\n\
               \"preparationSteps\": [\"string\"]\n\
             }}\n\
           ],\n\
           \"totalNutrients\": {{\"calories\": number, \"protein\": number, \"carbs\": number, \"fat\": number}}\n\
         }}",
        age = profile.age,
        gender = profile.gender.as_str(),
        height = profile.height_cm,
        weight = profile.weight_kg,
        activity = profile.activity_level.as_str(),
        goals = profile.health_goals.join(", "),
        prefs = profile.dietary_preferences.join(", "),
        calories = targets.calories,
        protein = targets.protein,
        carbs = targets.carbs,
        fat = targets.fat,
    )
}

fn recipe_prompt(meal_name: &str) -> String {
    format!(
        "Please provide detailed preparation steps for the Indian dish \"{meal_name}\".\n\
         Format as a numbered list of steps, each step should be clear and concise.\n\
         Return ONLY the numbered steps, no introduction or additional text."
    )
}

async fn try_nutrient_targets(
    gateway: &dyn TextCompletion,
    profile: &Profile,
) -> Result<NutrientTargets, AppError> {
    let raw = gateway.complete(&targets_prompt(profile)).await?;
    let value = extract_json(&raw)?;
    serde_json::from_value(value).map_err(|_| AppError::UnparseableResponse)
}

/// Phase 1: ask the model for a daily nutrient budget. Falls back to
/// [`DEFAULT_TARGETS`] on any failure.
pub async fn nutrient_targets(gateway: &dyn TextCompletion, profile: &Profile) -> NutrientTargets {
    match try_nutrient_targets(gateway, profile).await {
        Ok(targets) => targets,
        Err(e) => {
            warn!(error = %e, "nutrient targeting failed, using default targets");
            DEFAULT_TARGETS
        }
    }
}

async fn try_daily_plan(
    gateway: &dyn TextCompletion,
    profile: &Profile,
    targets: &NutrientTargets,
) -> Result<DailyPlan, AppError> {
    let raw = gateway.complete(&plan_prompt(profile, targets)).await?;
    let value = extract_json(&raw)?;
    let payload: PlanPayload =
        serde_json::from_value(value).map_err(|_| AppError::UnparseableResponse)?;
    Ok(DailyPlan {
        date: today_iso(),
        meals: payload.meals,
        total_nutrients: payload.total_nutrients,
    })
}

/// Phase 1 + 2: full generation pipeline. Never fails; on any error the
/// complete static fallback plan is returned instead.
pub async fn daily_plan(gateway: &dyn TextCompletion, profile: &Profile) -> DailyPlan {
    let targets = nutrient_targets(gateway, profile).await;
    match try_daily_plan(gateway, profile, &targets).await {
        Ok(plan) => plan,
        Err(e) => {
            warn!(error = %e, "meal composition failed, serving fallback plan");
            fallback_plan(today_iso())
        }
    }
}

/// Fetches preparation steps for one dish, stripping leading ordinal
/// markers from each line. On failure returns a single placeholder step.
pub async fn recipe_steps(gateway: &dyn TextCompletion, meal_name: &str) -> Vec<String> {
    lazy_static! {
        static ref ORDINAL_RE: Regex = Regex::new(r"^\d+\.\s*").unwrap();
    }
    match gateway.complete(&recipe_prompt(meal_name)).await {
        Ok(raw) => raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| ORDINAL_RE.replace(line, "").trim().to_string())
            .collect(),
        Err(e) => {
            warn!(error = %e, meal_name, "recipe lookup failed");
            vec![RECIPE_UNAVAILABLE.to_string()]
        }
    }
}
