use anyhow::Result;
use clap::Subcommand;
use mealbook::{App, app::slot_label};
use mealbook_mealplan::Slot;
use mealbook_shared::{Day, Storage};

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Put a recipe into a slot
    Assign {
        #[arg(long)]
        day: Day,
        #[arg(long)]
        slot: Slot,
        #[arg(long)]
        recipe: String,
    },
    /// Put a free-text meal into a slot
    Custom {
        #[arg(long)]
        day: Day,
        #[arg(long)]
        slot: Slot,
        #[arg(long)]
        text: String,
    },
    /// Empty a slot
    Clear {
        #[arg(long)]
        day: Day,
        #[arg(long)]
        slot: Slot,
    },
    /// Print the plan window
    Show {
        /// First day shown, defaults to today
        #[arg(long)]
        start: Option<Day>,
    },
}

pub fn run<S: Storage>(app: &mut App<S>, command: PlanCommand, today: Day) -> Result<()> {
    match command {
        PlanCommand::Assign { day, slot, recipe } => {
            if app.recipes().snapshot().find_by_id(&recipe).is_none() {
                tracing::warn!(%recipe, "assigning a recipe that is not in the collection");
            }
            app.planner_mut().assign_recipe(day, slot, recipe);
            println!("{day} {slot}: assigned");
        }
        PlanCommand::Custom { day, slot, text } => {
            app.planner_mut().assign_custom(day, slot, &text)?;
            println!("{day} {slot}: assigned");
        }
        PlanCommand::Clear { day, slot } => match app.planner_mut().clear(day, slot) {
            Some(_) => println!("{day} {slot}: cleared"),
            None => println!("{day} {slot}: already empty"),
        },
        PlanCommand::Show { start } => {
            let snapshot = app.recipes().snapshot();
            for plan_day in app.plan(&snapshot, start.unwrap_or(today)) {
                println!("{}", plan_day.day);
                for (slot, resolved) in &plan_day.slots {
                    let label = slot_label(resolved).unwrap_or_else(|| "-".to_owned());
                    println!("  {:<10} {label}", slot.as_ref());
                }
            }
        }
    }

    Ok(())
}
