use mealbook_mealplan::{
    NutrientReport, PlanDay, Planner, ResolvedSlot, Slot, SweepReport, Week, plan_days, week_of,
};
use mealbook_recipe::{RecipeSnapshot, RecipeStore};
use mealbook_shared::{Day, Result, Storage};
use mealbook_shopping::ShoppingList;
use serde::Serialize;
use std::sync::Arc;
use strum::VariantArray;

/// Local planner state plus the shared recipe store.
pub struct App<S: Storage> {
    planner: Planner<S>,
    recipes: RecipeStore,
    window_days: u16,
    startup_sweep: SweepReport,
}

/// What is planned for one slot, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSummary {
    pub slot: Slot,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub today: Day,
    pub week: Week,
    pub meals_today: Vec<SlotSummary>,
    /// Filled slots from today through the end of the plan window.
    pub upcoming_meals: usize,
    pub nutrition: NutrientReport,
}

pub fn slot_label(resolved: &ResolvedSlot<'_>) -> Option<String> {
    match resolved {
        ResolvedSlot::Empty => None,
        ResolvedSlot::Recipe(recipe) => Some(recipe.name.clone()),
        ResolvedSlot::Missing(id) => Some(format!("missing recipe {id}")),
        ResolvedSlot::Custom(text) => Some((*text).to_string()),
    }
}

impl<S: Storage> App<S> {
    /// Loads local state and runs the retention sweep for `today`.
    pub fn start(storage: S, recipes: RecipeStore, window_days: u16, today: Day) -> Self {
        let mut planner = Planner::load(storage);
        let startup_sweep = planner.sweep(today);

        Self {
            planner,
            recipes,
            window_days,
            startup_sweep,
        }
    }

    /// What the sweep in [`App::start`] removed.
    pub fn startup_sweep(&self) -> SweepReport {
        self.startup_sweep
    }

    pub fn planner(&self) -> &Planner<S> {
        &self.planner
    }

    pub fn planner_mut(&mut self) -> &mut Planner<S> {
        &mut self.planner
    }

    pub fn recipes(&self) -> &RecipeStore {
        &self.recipes
    }

    pub fn window_days(&self) -> u16 {
        self.window_days
    }

    /// Calendar rows for the plan window starting at `start`.
    pub fn plan<'a>(&'a self, snapshot: &'a RecipeSnapshot, start: Day) -> Vec<PlanDay<'a>> {
        plan_days(self.planner.meal_plan(), snapshot, start, self.window_days)
    }

    pub fn nutrition(&self, day: Day) -> NutrientReport {
        let snapshot = self.recipes.snapshot();
        NutrientReport::full(
            day,
            self.planner.meal_plan(),
            self.planner.extras(),
            &snapshot,
            self.planner.goals(),
        )
    }

    pub fn dashboard(&self, today: Day) -> DashboardSummary {
        let snapshot = self.recipes.snapshot();
        let meal_plan = self.planner.meal_plan();

        let meals_today = Slot::VARIANTS
            .iter()
            .map(|slot| SlotSummary {
                slot: *slot,
                label: slot_label(&meal_plan.resolve(today, *slot, &snapshot)),
            })
            .collect();

        let upcoming_meals = self
            .plan(&snapshot, today)
            .iter()
            .flat_map(|day| day.slots.iter())
            .filter(|(_, resolved)| !matches!(resolved, ResolvedSlot::Empty))
            .count();

        DashboardSummary {
            today,
            week: week_of(today),
            meals_today,
            upcoming_meals,
            nutrition: NutrientReport::dashboard(
                today,
                meal_plan,
                self.planner.extras(),
                &snapshot,
                self.planner.goals(),
            ),
        }
    }

    pub fn shopping_list(&self) -> Result<ShoppingList> {
        let snapshot: Arc<RecipeSnapshot> = self.recipes.snapshot();
        ShoppingList::generate(self.planner.meal_plan(), &snapshot)
    }
}
