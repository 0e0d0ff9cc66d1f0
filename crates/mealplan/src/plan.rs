use std::collections::BTreeMap;

use mealbook_recipe::{Recipe, RecipeSnapshot};
use mealbook_shared::{Day, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Assignment, Slot};

/// A slot as seen through the current recipe snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedSlot<'a> {
    Empty,
    Recipe(&'a Recipe),
    /// The referenced recipe is not (or no longer) in the store.
    Missing(&'a str),
    Custom(&'a str),
}

/// Date → slot → assignment. Days without assignments are never stored.
///
/// Decoding skips (and logs) days, slots or assignments it cannot read
/// instead of rejecting the whole plan.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct MealPlan(BTreeMap<Day, BTreeMap<Slot, Assignment>>);

impl<'de> Deserialize<'de> for MealPlan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut plan = BTreeMap::new();

        for (key, slots) in raw {
            let Ok(day) = key.parse::<Day>() else {
                tracing::warn!(%key, "skipping meal plan day with invalid date");
                continue;
            };
            let Value::Object(slots) = slots else {
                tracing::warn!(%day, "skipping meal plan day that is not a slot map");
                continue;
            };

            let mut assignments = BTreeMap::new();
            for (name, value) in slots {
                let Ok(slot) = name.parse::<Slot>() else {
                    tracing::warn!(%day, slot = %name, "skipping unknown meal slot");
                    continue;
                };
                match serde_json::from_value::<Assignment>(value) {
                    Ok(assignment) => {
                        assignments.insert(slot, assignment);
                    }
                    Err(err) => {
                        tracing::warn!(%day, %slot, error = %err, "skipping unreadable assignment");
                    }
                }
            }

            if !assignments.is_empty() {
                plan.insert(day, assignments);
            }
        }

        Ok(Self(plan))
    }
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the slot. The recipe id is resolved only when read.
    pub fn assign_recipe(&mut self, day: Day, slot: Slot, recipe_id: impl Into<String>) {
        self.0.entry(day).or_default().insert(
            slot,
            Assignment::Recipe {
                recipe_id: recipe_id.into(),
            },
        );
    }

    pub fn assign_custom(&mut self, day: Day, slot: Slot, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            mealbook_shared::invalid!("Custom meal text is required");
        }

        self.0.entry(day).or_default().insert(
            slot,
            Assignment::Custom {
                text: text.to_owned(),
            },
        );

        Ok(())
    }

    /// Removes the slot, dropping the day once it has no slot left.
    pub fn clear(&mut self, day: Day, slot: Slot) -> Option<Assignment> {
        let slots = self.0.get_mut(&day)?;
        let removed = slots.remove(&slot);
        if slots.is_empty() {
            self.0.remove(&day);
        }

        removed
    }

    pub fn get(&self, day: Day, slot: Slot) -> Option<&Assignment> {
        self.0.get(&day).and_then(|slots| slots.get(&slot))
    }

    /// Whether `day` has at least one assignment.
    pub fn contains_day(&self, day: Day) -> bool {
        self.0.contains_key(&day)
    }

    /// Planned days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.0.keys().copied()
    }

    /// Assignments of a day in breakfast, lunch, dinner order.
    pub fn slots(&self, day: Day) -> impl Iterator<Item = (Slot, &Assignment)> {
        self.0
            .get(&day)
            .into_iter()
            .flat_map(|slots| slots.iter().map(|(slot, a)| (*slot, a)))
    }

    /// Every assignment, days ascending then slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, Slot, &Assignment)> {
        self.0
            .iter()
            .flat_map(|(day, slots)| slots.iter().map(|(slot, a)| (*day, *slot, a)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn resolve<'a>(
        &'a self,
        day: Day,
        slot: Slot,
        recipes: &'a RecipeSnapshot,
    ) -> ResolvedSlot<'a> {
        match self.get(day, slot) {
            None => ResolvedSlot::Empty,
            Some(Assignment::Custom { text }) => ResolvedSlot::Custom(text),
            Some(Assignment::Recipe { recipe_id }) => recipes
                .find_by_id(recipe_id)
                .map(ResolvedSlot::Recipe)
                .unwrap_or(ResolvedSlot::Missing(recipe_id)),
        }
    }

    /// Drops every day strictly before `today`. Returns how many were removed.
    pub fn purge_before(&mut self, today: Day) -> usize {
        let before = self.0.len();
        self.0 = self.0.split_off(&today);
        before - self.0.len()
    }

    /// Removes empty day entries that may come from hand-edited or
    /// imported documents.
    pub(crate) fn compact(&mut self) {
        self.0.retain(|_, slots| !slots.is_empty());
    }
}
