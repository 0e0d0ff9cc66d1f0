use anyhow::Result;
use mealbook::App;
use mealbook_mealplan::{NutrientReport, display_width};
use mealbook_shared::{Day, Error, Storage};
use mealbook_shopping::ShoppingList;

const BAR_WIDTH: usize = 20;

fn bar(percent: i64) -> String {
    let filled = usize::from(display_width(percent)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn print_report(report: &NutrientReport) {
    for row in &report.rows {
        println!(
            "  {:<9} {:>7.1} / {:<7.0}{:<5} {} {:>4}% {}",
            row.nutrient.as_ref(),
            row.actual,
            row.goal,
            row.nutrient.unit(),
            bar(row.percent),
            row.percent,
            row.band
        );
    }
}

pub fn sweep<S: Storage>(app: &App<S>, today: Day) {
    let report = app.startup_sweep();
    if report.total() == 0 {
        println!("nothing dated before {today}");
        return;
    }

    println!(
        "removed {} meal plan days and {} extras days before {today}",
        report.meal_plan_days, report.extras_days
    );
}

pub fn nutrition<S: Storage>(app: &App<S>, day: Day) {
    println!("{day}");
    print_report(&app.nutrition(day));
}

pub fn dashboard<S: Storage>(app: &App<S>, today: Day) {
    let summary = app.dashboard(today);

    println!("{today} (week {} to {})", summary.week.start, summary.week.end);
    for meal in &summary.meals_today {
        println!(
            "  {:<10} {}",
            meal.slot.as_ref(),
            meal.label.as_deref().unwrap_or("-")
        );
    }
    println!(
        "{} meals planned in the next {} days",
        summary.upcoming_meals,
        app.window_days()
    );
    print_report(&summary.nutrition);
}

const NO_MEALS_PLANNED: &str = "No meals planned. Assign recipes with `mealbook plan assign` first.";

/// Lines to print for a generated list. An empty plan is a message, not a
/// failure.
fn shopping_lines(generated: mealbook_shared::Result<ShoppingList>) -> Result<Vec<String>> {
    let list = match generated {
        Ok(list) => list,
        Err(Error::NoMealsPlanned) => return Ok(vec![NO_MEALS_PLANNED.to_owned()]),
        Err(err) => return Err(err.into()),
    };

    let mut lines = Vec::new();
    for (category, items) in list.grouped() {
        lines.push(category.to_string());
        lines.extend(items.iter().map(|item| format!("  [ ] {}", item.label())));
    }
    lines.push(format!("{} items", list.len()));

    Ok(lines)
}

pub fn shopping<S: Storage>(app: &App<S>) -> Result<()> {
    for line in shopping_lines(app.shopping_list())? {
        println!("{line}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_is_clamped() {
        assert_eq!(bar(0), format!("[{}]", ".".repeat(20)));
        assert_eq!(bar(50), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(bar(250), format!("[{}]", "#".repeat(20)));
        assert_eq!(bar(-10), format!("[{}]", ".".repeat(20)));
    }

    #[test]
    fn test_empty_plan_is_a_message() {
        let lines = shopping_lines(Err(Error::NoMealsPlanned)).unwrap();
        assert_eq!(lines, vec![NO_MEALS_PLANNED.to_owned()]);
    }

    #[test]
    fn test_other_errors_still_fail() {
        assert!(shopping_lines(Err(Error::Server("boom".to_owned()))).is_err());
    }
}
