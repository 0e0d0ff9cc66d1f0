use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Breakfast,
    Lunch,
    Dinner,
}

/// What occupies a meal slot.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Assignment {
    /// Weak reference: the recipe may no longer exist in the store.
    Recipe {
        #[serde(rename = "recipeId")]
        recipe_id: String,
    },
    Custom { text: String },
}

impl Assignment {
    pub fn recipe_id(&self) -> Option<&str> {
        match self {
            Assignment::Recipe { recipe_id } => Some(recipe_id),
            Assignment::Custom { .. } => None,
        }
    }
}
