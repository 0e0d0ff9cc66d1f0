use mealbook_mealplan::{DailyExtras, MealPlan, NutritionGoals};
use mealbook_shared::{Result, Storage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::App;

/// Backup document covering recipes, quick foods and all local planner state.
///
/// `recipes` and `quickFoods` are kept as raw JSON: they belong to the
/// recipe backend and are only passed through.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportPayload {
    pub recipes: Value,
    pub quick_foods: Value,
    pub meal_plan: MealPlan,
    pub daily_extras: DailyExtras,
    pub nutrition_goals: NutritionGoals,
    pub export_date: Option<String>,
}

impl ExportPayload {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<S: Storage> App<S> {
    pub fn export(&self, now: OffsetDateTime) -> Result<ExportPayload> {
        let snapshot = self.recipes().snapshot();
        let planner = self.planner();

        Ok(ExportPayload {
            recipes: serde_json::to_value(snapshot.list())?,
            quick_foods: Value::Array(Vec::new()),
            meal_plan: planner.meal_plan().clone(),
            daily_extras: planner.extras().clone(),
            nutrition_goals: *planner.goals(),
            export_date: Some(now.format(&Rfc3339)?),
        })
    }

    /// Replaces meal plan, extras and goals with the payload's. Sections
    /// missing from the payload count as empty (goals as the defaults).
    pub fn import(&mut self, payload: ExportPayload) -> Result<()> {
        let goals = NutritionGoals::new(payload.nutrition_goals.0)?;

        tracing::info!(
            export_date = payload.export_date.as_deref().unwrap_or("unknown"),
            meal_plan_days = payload.meal_plan.len(),
            "importing backup"
        );

        self.planner_mut()
            .replace(payload.meal_plan, payload.daily_extras, goals);

        Ok(())
    }
}
