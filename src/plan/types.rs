//! Generated-plan value types. All of these are transient: produced per
//! request, returned to the client, never persisted.
//!
//! Wire casing is camelCase because it is the schema the generation prompts
//! ask the model to produce.

use serde::{Deserialize, Serialize};

/// Daily nutrient budget. Also reused as the per-meal and per-plan
/// nutrient breakdown shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientTargets {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    pub category: MealCategory,
    pub nutrients: NutrientTargets,
    pub ingredients: Vec<String>,
    /// Populated lazily via the recipe endpoint when the model omits steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_steps: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub meals: Vec<Meal>,
    pub total_nutrients: NutrientTargets,
}

/// The model's answer to the meal-composition prompt; the date is added by
/// the generator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanPayload {
    pub meals: Vec<Meal>,
    pub total_nutrients: NutrientTargets,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_category_round_trips_lowercase() {
        assert_eq!(
            serde_json::to_string(&MealCategory::Breakfast).unwrap(),
            r#""breakfast""#
        );
        let parsed: MealCategory = serde_json::from_str(r#""dinner""#).unwrap();
        assert_eq!(parsed, MealCategory::Dinner);
    }

    #[test]
    fn meal_tolerates_missing_preparation_steps() {
        let raw = r#"{
            "name": "Poha",
            "category": "breakfast",
            "nutrients": {"calories": 300, "protein": 8, "carbs": 50, "fat": 7},
            "ingredients": ["2 cups flattened rice"]
        }"#;
        let meal: Meal = serde_json::from_str(raw).expect("parse");
        assert!(meal.preparation_steps.is_none());
        assert_eq!(meal.nutrients.calories, 300.0);
    }

    #[test]
    fn plan_payload_uses_camel_case_total() {
        let raw = r#"{
            "meals": [],
            "totalNutrients": {"calories": 0, "protein": 0, "carbs": 0, "fat": 0}
        }"#;
        let payload: PlanPayload = serde_json::from_str(raw).expect("parse");
        assert!(payload.meals.is_empty());
        assert_eq!(payload.total_nutrients.calories, 0.0);
    }
}
