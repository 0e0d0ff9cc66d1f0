use anyhow::Result;
use clap::{Args, Subcommand};
use mealbook::App;
use mealbook_mealplan::NewExtra;
use mealbook_shared::{Day, Nutrition, Storage};

#[derive(Args, Debug, Clone, Copy)]
pub struct NutritionArgs {
    #[arg(long, default_value_t = 0.0)]
    pub calories: f64,
    #[arg(long, default_value_t = 0.0)]
    pub protein: f64,
    #[arg(long, default_value_t = 0.0)]
    pub carbs: f64,
    #[arg(long, default_value_t = 0.0)]
    pub fat: f64,
    #[arg(long, default_value_t = 0.0)]
    pub fiber: f64,
    #[arg(long, default_value_t = 0.0)]
    pub sugar: f64,
}

impl From<NutritionArgs> for Nutrition {
    fn from(args: NutritionArgs) -> Self {
        Nutrition {
            calories: args.calories,
            protein: args.protein,
            carbs: args.carbs,
            fat: args.fat,
            fiber: args.fiber,
            sugar: args.sugar,
        }
    }
}

#[derive(Subcommand)]
pub enum ExtraCommand {
    /// Log a food for a day
    Add {
        /// Defaults to today
        #[arg(long)]
        day: Option<Day>,
        #[arg(long)]
        name: String,
        #[command(flatten)]
        nutrition: NutritionArgs,
    },
    /// Remove the entry at a position shown by `extra list`
    Remove {
        #[arg(long)]
        day: Option<Day>,
        #[arg(long)]
        index: usize,
    },
    /// List a day's entries
    List {
        #[arg(long)]
        day: Option<Day>,
    },
}

pub fn run<S: Storage>(app: &mut App<S>, command: ExtraCommand, today: Day) -> Result<()> {
    match command {
        ExtraCommand::Add {
            day,
            name,
            nutrition,
        } => {
            let day = day.unwrap_or(today);
            app.planner_mut()
                .add_extra(day, NewExtra::new(name, nutrition.into()))?;
            println!("{day}: {} extras logged", app.planner().extras().entries(day).len());
        }
        ExtraCommand::Remove { day, index } => {
            let day = day.unwrap_or(today);
            let removed = app.planner_mut().remove_extra(day, index)?;
            println!("{day}: removed {}", removed.name);
        }
        ExtraCommand::List { day } => {
            let day = day.unwrap_or(today);
            let entries = app.planner().extras().entries(day);
            if entries.is_empty() {
                println!("{day}: no extras");
            }
            for (index, entry) in entries.iter().enumerate() {
                let n = &entry.nutrition;
                println!(
                    "{index:>3}  {:<24} {:>6.0} kcal  P {:.0}g  C {:.0}g  F {:.0}g",
                    entry.name, n.calories, n.protein, n.carbs, n.fat
                );
            }
        }
    }

    Ok(())
}
