use anyhow::Result;
use clap::{Parser, Subcommand};
use mealbook::{App, config::Config};
use mealbook_recipe::{JsonFileSource, RecipeStore};
use mealbook_shared::{Day, FileStorage, today};
use std::{path::PathBuf, sync::Arc};

mod cli;

use cli::{ExtraCommand, GoalsCommand, PlanCommand, RecipesCommand};

/// mealbook - meal planning and nutrition tracking
#[derive(Parser)]
#[command(name = "mealbook")]
#[command(about = "Plan meals, track nutrition and build shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop meal plan and extras entries dated before today
    Sweep,
    /// Edit or show the meal plan
    #[command(subcommand)]
    Plan(PlanCommand),
    /// Log foods eaten outside the plan
    #[command(subcommand)]
    Extra(ExtraCommand),
    /// Show or change daily nutrition goals
    #[command(subcommand)]
    Goals(GoalsCommand),
    /// Nutrition totals against goals for one day
    Nutrition {
        /// Day to report (YYYY-MM-DD), defaults to today
        #[arg(long)]
        day: Option<Day>,
    },
    /// Today's meals, upcoming plan and nutrition at a glance
    Dashboard,
    /// Shopping list for every planned recipe
    Shopping,
    /// Write a JSON backup of recipes and planner state
    Export {
        /// Output file, stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Restore planner state from a JSON backup
    Import { file: PathBuf },
    /// Browse the recipe collection
    #[command(subcommand)]
    Recipes(RecipesCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealbook::observability::init_observability(
        "mealbook",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let recipes = RecipeStore::new();
    let refresh = recipes.spawn_refresh(Arc::new(JsonFileSource::new(&config.recipes.path)));

    let storage = FileStorage::new(&config.storage.data_dir, &config.storage.namespace);
    let today = today();
    let mut app = App::start(storage, recipes, config.plan.window_days, today);

    // Planner state is usable without recipes; a failed load only leaves
    // recipe lookups empty.
    if let Err(err) = refresh.await? {
        tracing::warn!(error = %err, "continuing without recipes");
    }

    match cli.command {
        Commands::Sweep => cli::report::sweep(&app, today),
        Commands::Plan(command) => cli::plan::run(&mut app, command, today)?,
        Commands::Extra(command) => cli::extras::run(&mut app, command, today)?,
        Commands::Goals(command) => cli::goals::run(&mut app, command)?,
        Commands::Nutrition { day } => cli::report::nutrition(&app, day.unwrap_or(today)),
        Commands::Dashboard => cli::report::dashboard(&app, today),
        Commands::Shopping => cli::report::shopping(&app)?,
        Commands::Export { out } => cli::backup::export(&app, out)?,
        Commands::Import { file } => cli::backup::import(&mut app, file)?,
        Commands::Recipes(command) => cli::recipes::run(&app, command)?,
    }

    if !app.planner().last_write_ok() {
        eprintln!(
            "warning: changes could not be saved to {}",
            app.planner().storage().dir().display()
        );
    }

    Ok(())
}
