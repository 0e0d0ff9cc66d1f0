use std::{
    collections::{BTreeSet, HashMap},
    path::PathBuf,
    sync::{
        Arc, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use mealbook_shared::Result;

use crate::Recipe;

/// Where recipes come from. The store never writes back.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Recipe>>;
}

/// Reads a JSON array of recipes from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecipeSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<Recipe>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "recipe file not found");
                return Ok(vec![]);
            }
            Err(err) => return Err(err.into()),
        };

        let records: Vec<serde_json::Value> = serde_json::from_str(&content)?;
        let total = records.len();
        let recipes: Vec<Recipe> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                serde_json::from_value(record)
                    .inspect_err(|err| {
                        tracing::warn!(index, error = %err, "skipping unreadable recipe");
                    })
                    .ok()
            })
            .collect();

        if recipes.len() < total {
            tracing::warn!(
                path = %self.path.display(),
                skipped = total - recipes.len(),
                "some recipes could not be read"
            );
        }

        Ok(recipes)
    }
}

/// Immutable view of the recipes known at one point in time.
#[derive(Debug, Clone, Default)]
pub struct RecipeSnapshot {
    recipes: Vec<Recipe>,
    index: HashMap<String, usize>,
}

impl RecipeSnapshot {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let index = recipes
            .iter()
            .enumerate()
            .map(|(pos, recipe)| (recipe.id.to_owned(), pos))
            .collect();

        Self { recipes, index }
    }

    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Recipe> {
        self.index.get(id).and_then(|pos| self.recipes.get(*pos))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes matching `term` (see [`Recipe::matches`]) and, when given,
    /// belonging to `collection`.
    pub fn search(&self, term: &str, collection: Option<&str>) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.matches(term))
            .filter(|r| collection.is_none_or(|c| r.in_collection(c)))
            .collect()
    }

    /// Sorted, de-duplicated collection names.
    pub fn collections(&self) -> Vec<String> {
        self.recipes
            .iter()
            .flat_map(|r| r.collections.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<Recipe> for RecipeSnapshot {
    fn from_iter<T: IntoIterator<Item = Recipe>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Shared handle to the latest recipe snapshot.
///
/// Readers take an `Arc` of the current snapshot and never block on a
/// refresh; a refresh swaps the snapshot once the fetch has completed.
#[derive(Clone, Default)]
pub struct RecipeStore {
    current: Arc<RwLock<Arc<RecipeSnapshot>>>,
    refreshing: Arc<AtomicBool>,
    loaded: Arc<AtomicBool>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        let store = Self::new();
        store.replace(recipes);
        store
    }

    pub fn snapshot(&self) -> Arc<RecipeSnapshot> {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::SeqCst)
    }

    /// True once at least one refresh (or `replace`) has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    pub fn replace(&self, recipes: Vec<Recipe>) {
        let snapshot = Arc::new(RecipeSnapshot::new(recipes));
        match self.current.write() {
            Ok(mut current) => *current = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
        self.loaded.store(true, Ordering::SeqCst);
    }

    /// Fetches from `source` and swaps the snapshot. On failure the
    /// previous snapshot stays in place.
    pub async fn refresh(&self, source: &dyn RecipeSource) -> Result<usize> {
        if self.refreshing.swap(true, Ordering::SeqCst) {
            mealbook_shared::bail!("recipe refresh already in progress");
        }

        let fetched = source.fetch().await;
        self.refreshing.store(false, Ordering::SeqCst);

        let recipes = fetched.inspect_err(|err| {
            tracing::error!(error = %err, "recipe refresh failed");
        })?;
        let count = recipes.len();
        self.replace(recipes);
        tracing::info!(count, "recipes refreshed");

        Ok(count)
    }

    /// Runs [`RecipeStore::refresh`] in the background.
    pub fn spawn_refresh(
        &self,
        source: Arc<dyn RecipeSource>,
    ) -> tokio::task::JoinHandle<Result<usize>> {
        let store = self.clone();
        tokio::spawn(async move { store.refresh(source.as_ref()).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewRecipe;

    fn recipe(id: &str, name: &str, collections: &[&str]) -> Recipe {
        NewRecipe {
            name: name.to_owned(),
            ingredients: vec!["water".to_owned()],
            steps: vec!["boil".to_owned()],
            collections: collections.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
        .into_recipe(id)
        .unwrap()
    }

    #[test]
    fn test_find_by_id() {
        let snapshot = RecipeSnapshot::new(vec![recipe("a", "Soup", &[]), recipe("b", "Tea", &[])]);
        assert_eq!(snapshot.find_by_id("b").map(|r| r.name.as_str()), Some("Tea"));
        assert!(snapshot.find_by_id("zzz").is_none());
    }

    #[test]
    fn test_collections_sorted_and_unique() {
        let snapshot = RecipeSnapshot::new(vec![
            recipe("a", "Soup", &["Winter", "Dinner"]),
            recipe("b", "Tea", &["Dinner", "Breakfast"]),
        ]);
        assert_eq!(snapshot.collections(), vec!["Breakfast", "Dinner", "Winter"]);
    }

    #[test]
    fn test_search_with_collection_filter() {
        let snapshot = RecipeSnapshot::new(vec![
            recipe("a", "Tomato Soup", &["Winter"]),
            recipe("b", "Tomato Salad", &["Summer"]),
        ]);

        let ids = |found: Vec<&Recipe>| found.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(snapshot.search("tomato", None)), vec!["a", "b"]);
        assert_eq!(ids(snapshot.search("tomato", Some("Summer"))), vec!["b"]);
        assert!(snapshot.search("tomato", Some("Autumn")).is_empty());
    }

    #[test]
    fn test_new_store_is_empty_and_not_loaded() {
        let store = RecipeStore::new();
        assert!(store.snapshot().is_empty());
        assert!(!store.is_loaded());
        assert!(!store.is_refreshing());
    }
}
