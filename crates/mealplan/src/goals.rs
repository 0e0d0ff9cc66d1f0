use mealbook_shared::{Nutrient, Nutrition, Result};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Daily per-nutrient targets.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(transparent)]
pub struct NutritionGoals(pub Nutrition);

impl Default for NutritionGoals {
    fn default() -> Self {
        Self(Nutrition {
            calories: 2000.0,
            protein: 150.0,
            carbs: 225.0,
            fat: 65.0,
            fiber: 25.0,
            sugar: 50.0,
        })
    }
}

impl NutritionGoals {
    pub fn new(goals: Nutrition) -> Result<Self> {
        if !goals.is_non_negative() {
            mealbook_shared::invalid!("Nutrition goals must be non-negative numbers");
        }

        Ok(Self(goals))
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.0.get(nutrient)
    }
}

/// Whole percent of `goal` reached by `actual`, 0 when there is no goal.
/// Not clamped.
pub fn percent_of_goal(actual: f64, goal: f64) -> i64 {
    if !goal.is_finite() || goal <= 0.0 || !actual.is_finite() {
        return 0;
    }

    (actual / goal * 100.0).round() as i64
}

#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum GoalBand {
    Under,
    Near,
    OnTarget,
    Over,
}

impl GoalBand {
    pub fn classify(percent: i64) -> Self {
        match percent {
            p if p < 80 => GoalBand::Under,
            80..=94 => GoalBand::Near,
            95..=110 => GoalBand::OnTarget,
            _ => GoalBand::Over,
        }
    }
}

/// Progress bar width, capped at 100.
pub fn display_width(percent: i64) -> u8 {
    percent.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_goals() {
        let goals = NutritionGoals::default();
        assert_eq!(goals.get(Nutrient::Calories), 2000.0);
        assert_eq!(goals.get(Nutrient::Protein), 150.0);
        assert_eq!(goals.get(Nutrient::Carbs), 225.0);
        assert_eq!(goals.get(Nutrient::Fat), 65.0);
        assert_eq!(goals.get(Nutrient::Fiber), 25.0);
        assert_eq!(goals.get(Nutrient::Sugar), 50.0);
    }

    #[test]
    fn test_percent_of_goal() {
        for x in [0.0, 1.0, 250.5, 99999.0] {
            assert_eq!(percent_of_goal(x, 0.0), 0);
        }
        for g in [1.0, 65.0, 2000.0] {
            assert_eq!(percent_of_goal(0.0, g), 0);
            assert_eq!(percent_of_goal(g, g), 100);
        }
        assert_eq!(percent_of_goal(3000.0, 2000.0), 150);
        assert_eq!(percent_of_goal(1.0, 3.0), 33);
        assert_eq!(percent_of_goal(10.0, f64::NAN), 0);
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(GoalBand::classify(0), GoalBand::Under);
        assert_eq!(GoalBand::classify(79), GoalBand::Under);
        assert_eq!(GoalBand::classify(80), GoalBand::Near);
        assert_eq!(GoalBand::classify(94), GoalBand::Near);
        assert_eq!(GoalBand::classify(95), GoalBand::OnTarget);
        assert_eq!(GoalBand::classify(110), GoalBand::OnTarget);
        assert_eq!(GoalBand::classify(111), GoalBand::Over);
        assert_eq!(GoalBand::OnTarget.to_string(), "on-target");
    }

    #[test]
    fn test_display_width_is_capped() {
        assert_eq!(display_width(150), 100);
        assert_eq!(display_width(42), 42);
        assert_eq!(display_width(-3), 0);
    }

    #[test]
    fn test_negative_goal_is_rejected() {
        let goals = Nutrition {
            fat: -1.0,
            ..Default::default()
        };
        assert!(NutritionGoals::new(goals).unwrap_err().is_validation());
    }

    #[test]
    fn test_partial_document_fills_zero() {
        let goals: NutritionGoals = serde_json::from_str(r#"{"calories": 1800}"#).unwrap();
        assert_eq!(goals.get(Nutrient::Calories), 1800.0);
        assert_eq!(goals.get(Nutrient::Protein), 0.0);
    }
}
