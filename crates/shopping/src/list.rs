use std::collections::HashMap;

use mealbook_mealplan::MealPlan;
use mealbook_recipe::RecipeSnapshot;
use mealbook_shared::{Error, Result};
use serde::Serialize;
use strum::VariantArray;

use crate::{CategorizationService, Category};

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub ingredient_text: String,
    pub count: u32,
    pub checked: bool,
}

impl ShoppingListItem {
    pub fn category(&self) -> Category {
        CategorizationService::categorize(&self.ingredient_text)
    }

    /// `"egg (x3)"`, or the plain text for a single occurrence.
    pub fn label(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.ingredient_text, self.count)
        } else {
            self.ingredient_text.to_owned()
        }
    }
}

/// Ingredients needed for every planned recipe.
///
/// Lines are tallied by exact text: `"2 cups flour"` and
/// `"flour, 2 cups"` are two distinct items.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Walks every planned day (ascending) and slot, counting each
    /// ingredient line of each resolvable recipe. Custom meals and
    /// dangling references are skipped.
    ///
    /// Returns [`Error::NoMealsPlanned`] when nothing was collected.
    pub fn generate(meal_plan: &MealPlan, recipes: &RecipeSnapshot) -> Result<Self> {
        let mut items: Vec<ShoppingListItem> = vec![];
        let mut positions: HashMap<&str, usize> = HashMap::new();

        let planned = meal_plan
            .iter()
            .filter_map(|(_, _, assignment)| assignment.recipe_id())
            .filter_map(|id| recipes.find_by_id(id));

        for recipe in planned {
            for ingredient in &recipe.ingredients {
                match positions.get(ingredient.as_str()) {
                    Some(pos) => items[*pos].count += 1,
                    None => {
                        positions.insert(ingredient, items.len());
                        items.push(ShoppingListItem {
                            ingredient_text: ingredient.to_owned(),
                            count: 1,
                            checked: false,
                        });
                    }
                }
            }
        }

        if items.is_empty() {
            tracing::info!(days = meal_plan.len(), "no ingredients to shop for");
            return Err(Error::NoMealsPlanned);
        }

        tracing::debug!(items = items.len(), "shopping list generated");

        Ok(Self { items })
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_of(&self, ingredient: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|i| i.ingredient_text == ingredient)
            .map(|i| i.count)
    }

    /// Flips the checked flag, returning the new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let Some(item) = self.items.get_mut(index) else {
            mealbook_shared::invalid!("No shopping list item #{index}");
        };
        item.checked = !item.checked;

        Ok(item.checked)
    }

    pub fn remove(&mut self, index: usize) -> Result<ShoppingListItem> {
        if index >= self.items.len() {
            mealbook_shared::invalid!("No shopping list item #{index}");
        }

        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|i| !i.checked).count()
    }

    /// Non-empty sections in display order, items in list order.
    pub fn grouped(&self) -> Vec<(Category, Vec<&ShoppingListItem>)> {
        Category::VARIANTS
            .iter()
            .map(|category| {
                (
                    *category,
                    self.items
                        .iter()
                        .filter(|i| i.category() == *category)
                        .collect::<Vec<_>>(),
                )
            })
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }
}
