use std::sync::Arc;

use async_trait::async_trait;
use mealbook_recipe::{JsonFileSource, Recipe, RecipeSource, RecipeStore};
use mealbook_shared::Error;
use temp_dir::TempDir;

struct FailingSource;

#[async_trait]
impl RecipeSource for FailingSource {
    async fn fetch(&self) -> mealbook_shared::Result<Vec<Recipe>> {
        Err(Error::Server("backend unavailable".to_owned()))
    }
}

struct SlowSource(tokio::sync::Notify);

#[async_trait]
impl RecipeSource for SlowSource {
    async fn fetch(&self) -> mealbook_shared::Result<Vec<Recipe>> {
        self.0.notified().await;
        Ok(serde_json::from_str(r#"[{"id":"late","name":"Late"}]"#)?)
    }
}

#[tokio::test]
async fn test_refresh_from_json_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("recipes.json");
    std::fs::write(
        &path,
        r#"[
            {"id": "a", "name": "Omelette", "ingredients": ["2 eggs"], "steps": ["whisk"],
             "nutrition": {"calories": 180, "protein": 12}},
            {"id": "b", "name": "Salad", "ingredients": ["lettuce"], "steps": ["toss"]}
        ]"#,
    )?;

    let store = RecipeStore::new();
    let count = store.refresh(&JsonFileSource::new(&path)).await?;

    assert_eq!(count, 2);
    assert!(store.is_loaded());
    let snapshot = store.snapshot();
    assert_eq!(snapshot.find_by_id("a").map(|r| r.nutrition.protein), Some(12.0));

    Ok(())
}

#[tokio::test]
async fn test_legacy_and_malformed_records_do_not_fail_refresh() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("recipes.json");
    std::fs::write(
        &path,
        r#"[
            {"id": "a", "name": "Toast", "nutrition": {"calories": 100}},
            {"id": "b", "name": "Stew", "servings": null, "nutrition": "350 kcal"},
            {"id": "c", "name": "Tea", "nutrition": null},
            {"name": "no id"},
            "not a recipe"
        ]"#,
    )?;

    let store = RecipeStore::new();
    let count = store.refresh(&JsonFileSource::new(&path)).await?;

    assert_eq!(count, 3);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.find_by_id("a").map(|r| r.nutrition.calories), Some(100.0));
    let stew = snapshot.find_by_id("b").expect("legacy recipe kept");
    assert_eq!(stew.nutrition.calories, 0.0);
    assert_eq!(stew.servings, 4);
    assert_eq!(snapshot.find_by_id("c").map(|r| r.nutrition.sugar), Some(0.0));

    Ok(())
}

#[tokio::test]
async fn test_missing_file_yields_empty_store() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = RecipeStore::new();
    let count = store
        .refresh(&JsonFileSource::new(dir.child("nope.json")))
        .await?;

    assert_eq!(count, 0);
    assert!(store.snapshot().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let store = RecipeStore::with_recipes(
        serde_json::from_str(r#"[{"id":"keep","name":"Keep me"}]"#).unwrap(),
    );

    assert!(store.refresh(&FailingSource).await.is_err());
    assert!(store.snapshot().find_by_id("keep").is_some());
    assert!(!store.is_refreshing());
}

#[tokio::test]
async fn test_readers_are_not_blocked_by_refresh() {
    let store = RecipeStore::new();
    let source = Arc::new(SlowSource(tokio::sync::Notify::new()));
    let handle = store.spawn_refresh(source.clone());

    tokio::task::yield_now().await;
    assert!(store.snapshot().is_empty());

    source.0.notify_one();
    assert_eq!(handle.await.unwrap().unwrap(), 1);
    assert!(store.snapshot().find_by_id("late").is_some());
}
