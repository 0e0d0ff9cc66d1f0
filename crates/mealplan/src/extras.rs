use std::collections::BTreeMap;

use mealbook_shared::{Day, Nutrition, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

/// An ad-hoc food logged for a day, not tied to any recipe.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtraEntry {
    pub name: String,
    #[serde(flatten)]
    pub nutrition: Nutrition,
}

fn non_negative(nutrition: &Nutrition) -> std::result::Result<(), ValidationError> {
    if nutrition.is_non_negative() {
        return Ok(());
    }

    let mut error = ValidationError::new("negative_nutrition");
    error.message = Some("Nutrition values must not be negative".into());
    Err(error)
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct NewExtra {
    #[validate(length(min = 1, message = "Food name is required"))]
    pub name: String,
    #[validate(custom(function = "non_negative"))]
    #[serde(flatten)]
    pub nutrition: Nutrition,
}

impl NewExtra {
    pub fn new(name: impl Into<String>, nutrition: Nutrition) -> Self {
        Self {
            name: name.into(),
            nutrition,
        }
    }

    fn into_entry(self) -> Result<ExtraEntry> {
        let input = NewExtra {
            name: self.name.trim().to_owned(),
            nutrition: self.nutrition.sanitized(),
        };
        input.validate()?;

        Ok(ExtraEntry {
            name: input.name,
            nutrition: input.nutrition,
        })
    }
}

/// Date → extras, in insertion order.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct DailyExtras(BTreeMap<Day, Vec<ExtraEntry>>);

impl<'de> Deserialize<'de> for DailyExtras {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut extras = BTreeMap::new();

        for (key, entries) in raw {
            let Ok(day) = key.parse::<Day>() else {
                tracing::warn!(%key, "skipping extras day with invalid date");
                continue;
            };
            let Value::Array(entries) = entries else {
                tracing::warn!(%day, "skipping extras day that is not a list");
                continue;
            };

            let entries: Vec<ExtraEntry> = entries
                .into_iter()
                .filter_map(|entry| {
                    serde_json::from_value(entry)
                        .inspect_err(|err| {
                            tracing::warn!(%day, error = %err, "skipping unreadable extra");
                        })
                        .ok()
                })
                .collect();

            if !entries.is_empty() {
                extras.insert(day, entries);
            }
        }

        Ok(Self(extras))
    }
}

impl DailyExtras {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, day: Day, input: NewExtra) -> Result<&ExtraEntry> {
        let entry = input.into_entry()?;
        let entries = self.0.entry(day).or_default();
        entries.push(entry);

        Ok(&entries[entries.len() - 1])
    }

    /// Removes by position within the day's list.
    pub fn remove(&mut self, day: Day, index: usize) -> Result<ExtraEntry> {
        let Some(entries) = self.0.get_mut(&day).filter(|e| index < e.len()) else {
            mealbook_shared::invalid!("No extra #{index} on {day}");
        };

        let removed = entries.remove(index);
        if entries.is_empty() {
            self.0.remove(&day);
        }

        Ok(removed)
    }

    pub fn entries(&self, day: Day) -> &[ExtraEntry] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn purge_before(&mut self, today: Day) -> usize {
        let before = self.0.len();
        self.0 = self.0.split_off(&today);
        before - self.0.len()
    }

    pub(crate) fn compact(&mut self) {
        self.0.retain(|_, entries| !entries.is_empty());
    }
}
