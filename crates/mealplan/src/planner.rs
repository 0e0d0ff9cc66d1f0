use mealbook_shared::{
    Day, Result, Storage, StorageExt,
    storage::{DAILY_EXTRAS_KEY, MEAL_PLAN_KEY, NUTRITION_GOALS_KEY},
};
use serde::de::DeserializeOwned;

use crate::{Assignment, DailyExtras, ExtraEntry, MealPlan, NewExtra, NutritionGoals, Slot};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub meal_plan_days: usize,
    pub extras_days: usize,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.meal_plan_days + self.extras_days
    }
}

/// Meal plan, extras and goals backed by local storage.
///
/// Every mutation writes the affected collection right away. A failed
/// write is logged and leaves the in-memory state authoritative.
pub struct Planner<S: Storage> {
    storage: S,
    meal_plan: MealPlan,
    extras: DailyExtras,
    goals: NutritionGoals,
    last_write_ok: bool,
    // Stored documents that failed to decode. The sweep leaves them on disk
    // until the user changes that collection.
    meal_plan_unreadable: bool,
    extras_unreadable: bool,
}

/// Decoded document, or the default plus `true` when the stored one
/// could not be read.
fn load_or_default<S, T>(storage: &S, key: &str) -> (T, bool)
where
    S: Storage,
    T: DeserializeOwned + Default,
{
    match storage.try_load(key) {
        Ok(value) => (value.unwrap_or_default(), false),
        Err(err) => {
            tracing::warn!(key, error = %err, "stored document unreadable, starting empty");
            (T::default(), true)
        }
    }
}

impl<S: Storage> Planner<S> {
    pub fn load(storage: S) -> Self {
        let (mut meal_plan, meal_plan_unreadable): (MealPlan, _) =
            load_or_default(&storage, MEAL_PLAN_KEY);
        let (mut extras, extras_unreadable): (DailyExtras, _) =
            load_or_default(&storage, DAILY_EXTRAS_KEY);
        let goals = storage.load(NUTRITION_GOALS_KEY).unwrap_or_default();
        meal_plan.compact();
        extras.compact();

        Self {
            storage,
            meal_plan,
            extras,
            goals,
            last_write_ok: true,
            meal_plan_unreadable,
            extras_unreadable,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn meal_plan(&self) -> &MealPlan {
        &self.meal_plan
    }

    pub fn extras(&self) -> &DailyExtras {
        &self.extras
    }

    pub fn goals(&self) -> &NutritionGoals {
        &self.goals
    }

    /// False when the most recent write to storage failed.
    pub fn last_write_ok(&self) -> bool {
        self.last_write_ok
    }

    fn persist_meal_plan(&mut self) {
        self.last_write_ok = self.storage.persist(MEAL_PLAN_KEY, &self.meal_plan);
        self.meal_plan_unreadable &= !self.last_write_ok;
    }

    fn persist_extras(&mut self) {
        self.last_write_ok = self.storage.persist(DAILY_EXTRAS_KEY, &self.extras);
        self.extras_unreadable &= !self.last_write_ok;
    }

    fn persist_goals(&mut self) {
        self.last_write_ok = self.storage.persist(NUTRITION_GOALS_KEY, &self.goals);
    }

    /// Drops meal-plan and extras days before `today` and saves both
    /// collections. Safe to run repeatedly.
    ///
    /// A collection whose stored document could not be decoded is not
    /// written back, so the sweep never replaces it with an empty one.
    pub fn sweep(&mut self, today: Day) -> SweepReport {
        let report = SweepReport {
            meal_plan_days: self.meal_plan.purge_before(today),
            extras_days: self.extras.purge_before(today),
        };

        let mut ok = true;
        if self.meal_plan_unreadable {
            tracing::warn!(key = MEAL_PLAN_KEY, "leaving unreadable document untouched");
        } else {
            self.persist_meal_plan();
            ok &= self.last_write_ok;
        }
        if self.extras_unreadable {
            tracing::warn!(key = DAILY_EXTRAS_KEY, "leaving unreadable document untouched");
        } else {
            self.persist_extras();
            ok &= self.last_write_ok;
        }
        self.last_write_ok = ok;

        tracing::info!(
            %today,
            meal_plan_days = report.meal_plan_days,
            extras_days = report.extras_days,
            "retention sweep done"
        );

        report
    }

    pub fn assign_recipe(&mut self, day: Day, slot: Slot, recipe_id: impl Into<String>) {
        let recipe_id = recipe_id.into();
        tracing::debug!(%day, %slot, %recipe_id, "assign recipe");
        self.meal_plan.assign_recipe(day, slot, recipe_id);
        self.persist_meal_plan();
    }

    pub fn assign_custom(&mut self, day: Day, slot: Slot, text: &str) -> Result<()> {
        self.meal_plan.assign_custom(day, slot, text)?;
        tracing::debug!(%day, %slot, "assign custom meal");
        self.persist_meal_plan();

        Ok(())
    }

    pub fn clear(&mut self, day: Day, slot: Slot) -> Option<Assignment> {
        let removed = self.meal_plan.clear(day, slot);
        if removed.is_some() {
            tracing::debug!(%day, %slot, "clear slot");
            self.persist_meal_plan();
        }

        removed
    }

    pub fn get(&self, day: Day, slot: Slot) -> Option<&Assignment> {
        self.meal_plan.get(day, slot)
    }

    pub fn add_extra(&mut self, day: Day, input: NewExtra) -> Result<()> {
        let entry = self.extras.add(day, input)?;
        tracing::debug!(%day, name = %entry.name, "add extra");
        self.persist_extras();

        Ok(())
    }

    pub fn remove_extra(&mut self, day: Day, index: usize) -> Result<ExtraEntry> {
        let removed = self.extras.remove(day, index)?;
        tracing::debug!(%day, index, name = %removed.name, "remove extra");
        self.persist_extras();

        Ok(removed)
    }

    pub fn set_goals(&mut self, goals: NutritionGoals) -> Result<()> {
        let goals = NutritionGoals::new(goals.0)?;
        self.goals = goals;
        self.persist_goals();

        Ok(())
    }

    /// Replaces all three collections, e.g. from an import, and saves them.
    pub fn replace(&mut self, meal_plan: MealPlan, extras: DailyExtras, goals: NutritionGoals) {
        let mut meal_plan = meal_plan;
        let mut extras = extras;
        meal_plan.compact();
        extras.compact();

        self.meal_plan = meal_plan;
        self.extras = extras;
        self.goals = goals;

        self.persist_meal_plan();
        let mut ok = self.last_write_ok;
        self.persist_extras();
        ok &= self.last_write_ok;
        self.persist_goals();
        self.last_write_ok &= ok;
    }
}
