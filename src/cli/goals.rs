use anyhow::Result;
use clap::Subcommand;
use mealbook::App;
use mealbook_mealplan::NutritionGoals;
use mealbook_shared::{Nutrient, Storage};
use strum::VariantArray;

#[derive(Subcommand)]
pub enum GoalsCommand {
    Show,
    /// Change some goals, leaving the others as they are
    Set {
        #[arg(long)]
        calories: Option<f64>,
        #[arg(long)]
        protein: Option<f64>,
        #[arg(long)]
        carbs: Option<f64>,
        #[arg(long)]
        fat: Option<f64>,
        #[arg(long)]
        fiber: Option<f64>,
        #[arg(long)]
        sugar: Option<f64>,
    },
}

pub fn run<S: Storage>(app: &mut App<S>, command: GoalsCommand) -> Result<()> {
    if let GoalsCommand::Set {
        calories,
        protein,
        carbs,
        fat,
        fiber,
        sugar,
    } = command
    {
        let mut goals = app.planner().goals().0;
        let updates = [
            (Nutrient::Calories, calories),
            (Nutrient::Protein, protein),
            (Nutrient::Carbs, carbs),
            (Nutrient::Fat, fat),
            (Nutrient::Fiber, fiber),
            (Nutrient::Sugar, sugar),
        ];
        for (nutrient, value) in updates {
            if let Some(value) = value {
                goals.set(nutrient, value);
            }
        }
        app.planner_mut().set_goals(NutritionGoals(goals))?;
    }

    let goals = app.planner().goals();
    for nutrient in Nutrient::VARIANTS {
        println!("{:<10} {:>7.0} {}", nutrient.as_ref(), goals.get(*nutrient), nutrient.unit());
    }

    Ok(())
}
