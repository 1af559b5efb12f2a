//! The per-process catalog session.
//!
//! [`CatalogCache`] loads each source the first time it is asked for and
//! keeps the result, failure included, for the rest of its life. Nothing
//! mutates a loaded catalog, so one cache can be shared by reference (or
//! behind an `Arc`) between any number of callers.

use crate::config::Config;
use crate::format::{FoodRow, RecipeCard};
use crate::loader::{load_food_catalog, load_recipe_catalog, LoadError};
use crate::model::{FoodCatalog, FoodRecord, RecipeCatalog};
use crate::search::{search_recipes, search_with_scope, suggest, FoodSearch};
use std::sync::OnceLock;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct CatalogCache {
    config: Config,
    foods: OnceLock<Result<FoodCatalog, LoadError>>,
    recipes: OnceLock<Result<RecipeCatalog, LoadError>>,
}

impl CatalogCache {
    /// Creates a cache. Nothing is read until a catalog is first needed.
    pub fn new(config: Config) -> Self {
        CatalogCache {
            config,
            foods: OnceLock::new(),
            recipes: OnceLock::new(),
        }
    }

    /// Creates a cache around catalogs that are already in memory.
    pub fn preloaded(config: Config, foods: FoodCatalog, recipes: RecipeCatalog) -> Self {
        CatalogCache {
            config,
            foods: OnceLock::from(Ok(foods)),
            recipes: OnceLock::from(Ok(recipes)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The food catalog, loading it on first use.
    pub fn foods(&self) -> Result<&FoodCatalog, LoadError> {
        self.foods
            .get_or_init(|| {
                debug!(path = %self.config.food_path, "loading food catalog");
                load_food_catalog(&self.config.food_path).inspect_err(|e| {
                    warn!(error = %e, "food catalog unavailable");
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The recipe catalog, loading it on first use.
    pub fn recipes(&self) -> Result<&RecipeCatalog, LoadError> {
        self.recipes
            .get_or_init(|| {
                debug!(path = %self.config.recipe_path, "loading recipe catalog");
                load_recipe_catalog(&self.config.recipe_path).inspect_err(|e| {
                    warn!(error = %e, "recipe catalog unavailable");
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Searches foods using the configured match scope.
    pub fn search_foods(&self, query: &str) -> Result<FoodSearch<'_>, LoadError> {
        Ok(search_with_scope(self.foods()?, query, self.config.match_scope))
    }

    /// Autocomplete suggestions, up to the configured limit.
    pub fn suggest_foods(&self, query: &str) -> Result<Vec<&FoodRecord>, LoadError> {
        Ok(suggest(self.foods()?, query, self.config.max_suggestions))
    }

    /// Food search results as display rows, or `None` for a blank query.
    pub fn food_rows(&self, query: &str) -> Result<Option<Vec<FoodRow>>, LoadError> {
        Ok(match self.search_foods(query)? {
            FoodSearch::NoQuery => None,
            FoodSearch::Results(foods) => Some(foods.into_iter().map(FoodRow::from).collect()),
        })
    }

    /// Matching recipes as display cards, grouped by category label.
    pub fn recipe_cards(&self, query: &str) -> Result<Vec<(String, Vec<RecipeCard>)>, LoadError> {
        let found = search_recipes(self.recipes()?, query);
        Ok(found
            .categories()
            .iter()
            .map(|category| {
                (
                    category.label.clone(),
                    category.recipes.iter().map(RecipeCard::from).collect(),
                )
            })
            .collect())
    }
}
