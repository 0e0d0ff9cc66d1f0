use mealbook_shared::Nutrition;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

fn default_servings() -> u32 {
    4
}

fn servings_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?
        .filter(|servings| *servings > 0)
        .unwrap_or_else(default_servings))
}

/// A recipe as held by the recipe store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default = "default_servings", deserialize_with = "servings_or_default")]
    pub servings: u32,
    #[serde(default, alias = "prepTime")]
    pub prep_time_minutes: u32,
    #[serde(default, alias = "cookTime")]
    pub cook_time_minutes: u32,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, deserialize_with = "Nutrition::deserialize_lenient")]
    pub nutrition: Nutrition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Recipe {
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes.saturating_add(self.cook_time_minutes)
    }

    pub fn in_collection(&self, collection: &str) -> bool {
        self.collections.iter().any(|c| c == collection)
    }

    /// Case-insensitive match against name, ingredients and keywords.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&term)
            || self
                .ingredients
                .iter()
                .any(|i| i.to_lowercase().contains(&term))
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(&term))
    }
}

/// Input for creating a recipe. List entries are trimmed and blank entries
/// dropped before validation.
#[derive(Deserialize, Validate, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    #[validate(length(min = 1, message = "Recipe name is required"))]
    pub name: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub cook_time_minutes: u32,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[validate(length(min = 1, message = "At least 1 ingredient is required"))]
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[validate(length(min = 1, message = "At least 1 step is required"))]
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub nutrition: Nutrition,
}

fn clean(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .collect()
}

impl NewRecipe {
    pub fn into_recipe(self, id: impl Into<String>) -> mealbook_shared::Result<Recipe> {
        let input = NewRecipe {
            name: self.name.trim().to_owned(),
            collections: clean(self.collections),
            keywords: clean(self.keywords),
            ingredients: clean(self.ingredients),
            steps: clean(self.steps),
            nutrition: self.nutrition.sanitized(),
            ..self
        };

        input.validate()?;

        if !input.nutrition.is_non_negative() {
            mealbook_shared::invalid!("Nutrition values must not be negative");
        }

        Ok(Recipe {
            id: id.into(),
            name: input.name,
            servings: input.servings,
            prep_time_minutes: input.prep_time_minutes,
            cook_time_minutes: input.cook_time_minutes,
            collections: input.collections,
            keywords: input.keywords,
            ingredients: input.ingredients,
            steps: input.steps,
            nutrition: input.nutrition,
            source: None,
            image: None,
            notes: None,
        })
    }
}
