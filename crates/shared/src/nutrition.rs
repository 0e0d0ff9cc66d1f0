use std::ops::{Add, AddAssign};

use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};
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
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    Sugar,
}

impl Nutrient {
    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            _ => "g",
        }
    }
}

/// Per-serving nutrition facts. Every field defaults to 0 and tolerates
/// `null`, missing or numeric-string values on input.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Nutrition {
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub protein: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fat: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fiber: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sugar: f64,
}

impl Nutrition {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
            Nutrient::Fiber => self.fiber,
            Nutrient::Sugar => self.sugar,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        let field = match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Fiber => &mut self.fiber,
            Nutrient::Sugar => &mut self.sugar,
        };
        *field = value;
    }

    /// Replaces non-finite values with 0 so sums never turn into NaN.
    pub fn sanitized(self) -> Self {
        let clean = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            calories: clean(self.calories),
            protein: clean(self.protein),
            carbs: clean(self.carbs),
            fat: clean(self.fat),
            fiber: clean(self.fiber),
            sugar: clean(self.sugar),
        }
    }

    pub fn is_non_negative(&self) -> bool {
        Nutrient::VARIANTS
            .iter()
            .all(|n| self.get(*n).is_finite() && self.get(*n) >= 0.0)
    }
}

impl Add for Nutrition {
    type Output = Nutrition;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for Nutrition {
    fn add_assign(&mut self, rhs: Self) {
        let rhs = rhs.sanitized();
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fat += rhs.fat;
        self.fiber += rhs.fiber;
        self.sugar += rhs.sugar;
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::default(), |acc, n| acc + n)
    }
}

impl Nutrition {
    /// For `deserialize_with`: anything that is not a nutrition object
    /// (`null`, free text, a number) reads as all zeros.
    pub fn deserialize_lenient<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Facts(Nutrition),
            Other(IgnoredAny),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Facts(nutrition)) => nutrition,
            _ => Nutrition::default(),
        })
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(v)) if v.is_finite() => v,
        Some(Raw::Text(v)) => v
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_fields_default_to_zero() {
        let n: Nutrition = serde_json::from_str(r#"{"calories": 250, "protein": null}"#).unwrap();
        assert_eq!(n.calories, 250.0);
        assert_eq!(n.protein, 0.0);
        assert_eq!(n.sugar, 0.0);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let n: Nutrition = serde_json::from_str(r#"{"fat": "12.5", "fiber": "abc"}"#).unwrap();
        assert_eq!(n.fat, 12.5);
        assert_eq!(n.fiber, 0.0);
    }

    #[test]
    fn test_unexpected_field_types_default_to_zero() {
        let n: Nutrition = serde_json::from_str(r#"{"calories": true, "fat": [1], "sugar": 3}"#).unwrap();
        assert_eq!(n.calories, 0.0);
        assert_eq!(n.fat, 0.0);
        assert_eq!(n.sugar, 3.0);
    }

    #[test]
    fn test_lenient_document() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "Nutrition::deserialize_lenient")]
            nutrition: Nutrition,
        }

        for input in [
            r#"{"nutrition": "350 kcal, 12g protein"}"#,
            r#"{"nutrition": null}"#,
            r#"{"nutrition": 42}"#,
            r#"{}"#,
        ] {
            let holder: Holder = serde_json::from_str(input).unwrap();
            assert_eq!(holder.nutrition, Nutrition::default(), "{input}");
        }

        let holder: Holder = serde_json::from_str(r#"{"nutrition": {"calories": "100"}}"#).unwrap();
        assert_eq!(holder.nutrition.calories, 100.0);
    }

    #[test]
    fn test_sum() {
        let a = Nutrition {
            calories: 100.0,
            protein: 5.0,
            ..Default::default()
        };
        let b = Nutrition {
            calories: 50.0,
            sugar: 3.0,
            ..Default::default()
        };
        let total: Nutrition = [a, b].into_iter().sum();
        assert_eq!(total.calories, 150.0);
        assert_eq!(total.protein, 5.0);
        assert_eq!(total.sugar, 3.0);
    }

    #[test]
    fn test_nutrient_names() {
        assert_eq!(Nutrient::Carbs.to_string(), "carbs");
        assert_eq!("fiber".parse::<Nutrient>().unwrap(), Nutrient::Fiber);
        assert_eq!(Nutrient::Calories.unit(), "kcal");
    }
}
