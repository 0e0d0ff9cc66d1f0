use mealbook_recipe::RecipeSnapshot;
use mealbook_shared::Day;
use serde::Serialize;
use strum::VariantArray;
use time::Weekday;

use crate::{MealPlan, ResolvedSlot, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Week {
    pub start: Day,
    pub end: Day,
}

/// `days` consecutive days starting at `start`.
pub fn plan_window(start: Day, days: u16) -> Vec<Day> {
    std::iter::successors(Some(start), Day::next)
        .take(days as usize)
        .collect()
}

/// One row of the meal-plan calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDay<'a> {
    pub day: Day,
    pub slots: Vec<(Slot, ResolvedSlot<'a>)>,
}

/// Calendar rows for `days` days from `start`, every slot resolved against
/// `recipes`.
pub fn plan_days<'a>(
    meal_plan: &'a MealPlan,
    recipes: &'a RecipeSnapshot,
    start: Day,
    days: u16,
) -> Vec<PlanDay<'a>> {
    plan_window(start, days)
        .into_iter()
        .map(|day| PlanDay {
            day,
            slots: Slot::VARIANTS
                .iter()
                .map(|slot| (*slot, meal_plan.resolve(day, *slot, recipes)))
                .collect(),
        })
        .collect()
}

/// The Monday-to-Sunday week containing `day`.
pub fn week_of(day: Day) -> Week {
    let days_since_monday = match day.date().weekday() {
        Weekday::Monday => 0,
        Weekday::Tuesday => 1,
        Weekday::Wednesday => 2,
        Weekday::Thursday => 3,
        Weekday::Friday => 4,
        Weekday::Saturday => 5,
        Weekday::Sunday => 6,
    };

    let start = day.add_days(-days_since_monday).unwrap_or(day);
    let end = start.add_days(6).unwrap_or(start);

    Week { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_plan_window_crosses_month() {
        let days = plan_window(Day::new(date!(2025 - 01 - 30)), 4);
        let days: Vec<_> = days.iter().map(|d| d.to_string()).collect();
        assert_eq!(days, vec!["2025-01-30", "2025-01-31", "2025-02-01", "2025-02-02"]);
    }

    #[test]
    fn test_plan_window_zero_days() {
        assert!(plan_window(Day::new(date!(2025 - 01 - 30)), 0).is_empty());
    }

    #[test]
    fn test_plan_days_resolves_every_slot() {
        let start = Day::new(date!(2025 - 01 - 30));
        let mut plan = MealPlan::new();
        plan.assign_recipe(start, Slot::Dinner, "missing");
        plan.assign_custom(start.next().unwrap(), Slot::Lunch, "Soup")
            .unwrap();
        let recipes = RecipeSnapshot::default();

        let rows = plan_days(&plan, &recipes, start, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].slots[0], (Slot::Breakfast, ResolvedSlot::Empty));
        assert_eq!(rows[0].slots[2], (Slot::Dinner, ResolvedSlot::Missing("missing")));
        assert_eq!(rows[1].slots[1], (Slot::Lunch, ResolvedSlot::Custom("Soup")));
    }

    #[test]
    fn test_week_of_monday() {
        let week = week_of(Day::new(date!(2025 - 01 - 20)));
        assert_eq!(
            week,
            Week {
                start: Day::new(date!(2025 - 01 - 20)),
                end: Day::new(date!(2025 - 01 - 26)),
            }
        );
    }

    #[test]
    fn test_week_of_wednesday() {
        let week = week_of(Day::new(date!(2025 - 01 - 22)));
        assert_eq!(week.start, Day::new(date!(2025 - 01 - 20)));
        assert_eq!(week.end, Day::new(date!(2025 - 01 - 26)));
    }

    #[test]
    fn test_week_of_sunday() {
        let week = week_of(Day::new(date!(2025 - 01 - 26)));
        assert_eq!(week.start, Day::new(date!(2025 - 01 - 20)));
        assert_eq!(week.end, Day::new(date!(2025 - 01 - 26)));
    }
}
