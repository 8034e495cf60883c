//! Static substitute plan served whenever generation or parsing fails.
//! Fully populated so the client never sees a partial result.

use super::types::{DailyPlan, Meal, MealCategory, NutrientTargets};

pub(crate) fn fallback_plan(date: String) -> DailyPlan {
    DailyPlan {
        date,
        meals: vec![
            Meal {
                name: "Masala Dosa with Coconut Chutney".into(),
                category: MealCategory::Breakfast,
                nutrients: NutrientTargets {
                    calories: 350.0,
                    protein: 10.0,
                    carbs: 45.0,
                    fat: 15.0,
                },
                ingredients: vec![
                    "1 cup rice flour".into(),
                    "1/4 cup urad dal".into(),
                    "1/2 tsp fenugreek seeds".into(),
                    "Salt to taste".into(),
                    "1 boiled potato".into(),
                    "1 onion".into(),
                    "1/2 tsp mustard seeds".into(),
                    "1/2 tsp cumin seeds".into(),
                    "1 green chili".into(),
                    "1 tbsp oil".into(),
                ],
                preparation_steps: Some(vec![
                    "Ferment rice and dal batter".into(),
                    "Make potato filling".into(),
                    "Cook dosa on hot griddle".into(),
                    "Serve with coconut chutney".into(),
                ]),
            },
            Meal {
                name: "Dal Tadka with Brown Rice and Cucumber Raita".into(),
                category: MealCategory::Lunch,
                nutrients: NutrientTargets {
                    calories: 450.0,
                    protein: 20.0,
                    carbs: 60.0,
                    fat: 15.0,
                },
                ingredients: vec![
                    "1 cup yellow moong dal".into(),
                    "1/2 cup brown rice".into(),
                    "1 tomato".into(),
                    "1 onion".into(),
                    "1 tsp cumin seeds".into(),
                    "1/2 tsp turmeric".into(),
                    "1 tsp coriander powder".into(),
                    "1 cup yogurt".into(),
                    "1 cucumber".into(),
                    "1 tbsp oil".into(),
                ],
                preparation_steps: Some(vec![
                    "Cook dal with turmeric".into(),
                    "Prepare tempering with cumin and spices".into(),
                    "Cook brown rice separately".into(),
                    "Mix cucumber with yogurt for raita".into(),
                ]),
            },
            Meal {
                name: "Roasted Chana with Fruit Chaat".into(),
                category: MealCategory::Snack,
                nutrients: NutrientTargets {
                    calories: 250.0,
                    protein: 15.0,
                    carbs: 30.0,
                    fat: 8.0,
                },
                ingredients: vec![
                    "1/2 cup roasted chana".into(),
                    "1 apple".into(),
                    "1 banana".into(),
                    "1/2 cup pomegranate seeds".into(),
                    "1/2 tsp chaat masala".into(),
                    "Lemon juice".into(),
                ],
                preparation_steps: Some(vec![
                    "Mix fruits together".into(),
                    "Add roasted chana".into(),
                    "Sprinkle chaat masala and lemon juice".into(),
                ]),
            },
            Meal {
                name: "Palak Paneer with Roti".into(),
                category: MealCategory::Dinner,
                nutrients: NutrientTargets {
                    calories: 420.0,
                    protein: 25.0,
                    carbs: 35.0,
                    fat: 20.0,
                },
                ingredients: vec![
                    "2 cups spinach".into(),
                    "200g paneer".into(),
                    "1 onion".into(),
                    "2 tomatoes".into(),
                    "1 tsp ginger-garlic paste".into(),
                    "1/2 tsp garam masala".into(),
                    "1/2 tsp cumin powder".into(),
                    "1 cup whole wheat flour".into(),
                    "2 tbsp oil".into(),
                    "Salt to taste".into(),
                ],
                preparation_steps: Some(vec![
                    "Blanch and puree spinach".into(),
                    "Saute onions and spices".into(),
                    "Add tomatoes and spinach puree".into(),
                    "Add paneer cubes".into(),
                    "Make whole wheat rotis".into(),
                ]),
            },
        ],
        total_nutrients: NutrientTargets {
            calories: 1470.0,
            protein: 70.0,
            carbs: 170.0,
            fat: 58.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_a_complete_four_meal_day() {
        let plan = fallback_plan("2026-01-01".into());
        assert_eq!(plan.meals.len(), 4);
        assert_eq!(plan.total_nutrients.calories, 1470.0);
        let categories: Vec<_> = plan.meals.iter().map(|m| m.category).collect();
        assert_eq!(
            categories,
            vec![
                MealCategory::Breakfast,
                MealCategory::Lunch,
                MealCategory::Snack,
                MealCategory::Dinner
            ]
        );
        for meal in &plan.meals {
            assert!(!meal.ingredients.is_empty());
            assert!(meal.preparation_steps.as_ref().is_some_and(|s| !s.is_empty()));
        }
    }
}
