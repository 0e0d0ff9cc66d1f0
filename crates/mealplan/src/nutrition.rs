use mealbook_recipe::RecipeSnapshot;
use mealbook_shared::{Day, Nutrient, Nutrition};
use serde::Serialize;
use strum::VariantArray;

use crate::{DailyExtras, GoalBand, MealPlan, NutritionGoals, Slot, percent_of_goal};

/// Nutrients shown on the dashboard card.
pub const DASHBOARD_NUTRIENTS: [Nutrient; 4] = [
    Nutrient::Calories,
    Nutrient::Protein,
    Nutrient::Carbs,
    Nutrient::Fat,
];

/// Totals for `day`: one serving of each resolvable planned recipe plus
/// every extra logged that day.
///
/// Recipes are counted per serving regardless of their `servings` field.
/// Custom meals and dangling recipe references contribute nothing.
pub fn compute_daily_totals(
    day: Day,
    meal_plan: &MealPlan,
    extras: &DailyExtras,
    recipes: &RecipeSnapshot,
) -> Nutrition {
    let planned: Nutrition = Slot::VARIANTS
        .iter()
        .filter_map(|slot| meal_plan.get(day, *slot)?.recipe_id())
        .filter_map(|id| recipes.find_by_id(id))
        .map(|recipe| recipe.nutrition)
        .sum();

    let logged: Nutrition = extras.entries(day).iter().map(|e| e.nutrition).sum();

    planned + logged
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientRow {
    pub nutrient: Nutrient,
    pub actual: f64,
    pub goal: f64,
    pub percent: i64,
    pub band: GoalBand,
}

impl NutrientRow {
    fn new(nutrient: Nutrient, totals: &Nutrition, goals: &NutritionGoals) -> Self {
        let actual = totals.get(nutrient);
        let goal = goals.get(nutrient);
        let percent = percent_of_goal(actual, goal);

        Self {
            nutrient,
            actual,
            goal,
            percent,
            band: GoalBand::classify(percent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientReport {
    pub day: Day,
    pub totals: Nutrition,
    pub rows: Vec<NutrientRow>,
}

impl NutrientReport {
    fn build(day: Day, totals: Nutrition, goals: &NutritionGoals, nutrients: &[Nutrient]) -> Self {
        let rows = nutrients
            .iter()
            .map(|n| NutrientRow::new(*n, &totals, goals))
            .collect();

        Self { day, totals, rows }
    }

    /// All six nutrients, as shown by the nutrition view.
    pub fn full(
        day: Day,
        meal_plan: &MealPlan,
        extras: &DailyExtras,
        recipes: &RecipeSnapshot,
        goals: &NutritionGoals,
    ) -> Self {
        let totals = compute_daily_totals(day, meal_plan, extras, recipes);
        Self::build(day, totals, goals, Nutrient::VARIANTS)
    }

    /// Calories, protein, carbs and fat, as shown by the dashboard.
    pub fn dashboard(
        day: Day,
        meal_plan: &MealPlan,
        extras: &DailyExtras,
        recipes: &RecipeSnapshot,
        goals: &NutritionGoals,
    ) -> Self {
        let totals = compute_daily_totals(day, meal_plan, extras, recipes);
        Self::build(day, totals, goals, &DASHBOARD_NUTRIENTS)
    }

    pub fn row(&self, nutrient: Nutrient) -> Option<&NutrientRow> {
        self.rows.iter().find(|r| r.nutrient == nutrient)
    }
}
