use anyhow::Result;
use clap::Subcommand;
use mealbook::App;
use mealbook_recipe::scale_recipe;
use mealbook_shared::Storage;

#[derive(Subcommand)]
pub enum RecipesCommand {
    /// Filter recipes by name, ingredient or keyword
    Search {
        #[arg(long, default_value = "")]
        term: String,
        #[arg(long)]
        collection: Option<String>,
    },
    /// List collection names
    Collections,
    /// Print one recipe, optionally scaled to another serving count
    Show {
        id: String,
        #[arg(long)]
        servings: Option<u32>,
    },
}

pub fn run<S: Storage>(app: &App<S>, command: RecipesCommand) -> Result<()> {
    let snapshot = app.recipes().snapshot();

    match command {
        RecipesCommand::Search { term, collection } => {
            let found = snapshot.search(&term, collection.as_deref());
            for recipe in &found {
                println!(
                    "{:<12} {:<32} {:>3} min  {:.0} kcal",
                    recipe.id,
                    recipe.name,
                    recipe.total_time_minutes(),
                    recipe.nutrition.calories
                );
            }
            println!("{} of {} recipes", found.len(), snapshot.len());
        }
        RecipesCommand::Collections => {
            for name in snapshot.collections() {
                println!("{name}");
            }
        }
        RecipesCommand::Show { id, servings } => {
            let Some(recipe) = snapshot.find_by_id(&id) else {
                anyhow::bail!("recipe {id} not found");
            };
            let servings = servings.unwrap_or(recipe.servings);

            println!("{} ({servings} servings)", recipe.name);
            for line in scale_recipe(recipe, servings) {
                println!("  - {line}");
            }
            for (number, step) in recipe.steps.iter().enumerate() {
                println!("  {}. {step}", number + 1);
            }
        }
    }

    Ok(())
}
