use anyhow::{Context, Result};
use mealbook::{App, ExportPayload};
use mealbook_shared::{Storage, now};
use std::path::PathBuf;

pub fn export<S: Storage>(app: &App<S>, out: Option<PathBuf>) -> Result<()> {
    let json = app.export(now())?.to_json_pretty()?;

    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "backup written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

pub fn import<S: Storage>(app: &mut App<S>, file: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let payload = ExportPayload::from_json(&content)?;

    app.import(payload)?;
    println!(
        "imported {} meal plan days from {}",
        app.planner().meal_plan().len(),
        file.display()
    );

    Ok(())
}
