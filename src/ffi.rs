//! UniFFI bindings for mobile and desktop front ends.
//!
//! The UI owns rendering and input; this layer hands it ranked,
//! display-ready records and a load error it can tell apart from "no
//! results".

use crate::catalog::CatalogCache;
use crate::config::Config;
use crate::format::{
    category_glyph, safe_amount_text, traffic_light_glyph, FoodRow, RecipeCard,
};
use crate::loader::LoadError;
use crate::model::FoodRecord;
use camino::Utf8PathBuf;
use std::sync::Arc;

/// FFI-safe error type.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum FodmapError {
    #[error("Source not found: {message}")]
    NotFound { message: String },

    #[error("Malformed source: {message}")]
    Malformed { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

impl From<LoadError> for FodmapError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::NotFound(path) => FodmapError::NotFound {
                message: path.to_string(),
            },
            LoadError::Malformed(message) => FodmapError::Malformed { message },
            e @ LoadError::Io { .. } => FodmapError::IoError {
                message: e.to_string(),
            },
        }
    }
}

/// A food result row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFoodRow {
    pub name: String,
    pub category: String,
    pub category_glyph: String,
    /// "Green", "Amber", "Red" or "Unrated"
    pub traffic_light: String,
    pub traffic_light_glyph: String,
    /// Safe amount as stored
    pub safe_amount: String,
    /// Portion advice, e.g. "Safe up to 1/2 cup"
    pub safe_amount_text: String,
    /// Comma-joined FODMAP classes, or "None detected"
    pub fodmaps: String,
}

impl From<&FoodRecord> for FfiFoodRow {
    fn from(food: &FoodRecord) -> Self {
        let row = FoodRow::from(food);
        FfiFoodRow {
            name: row.food,
            category_glyph: category_glyph(&row.category).to_string(),
            category: row.category,
            traffic_light: food.traffic_light.to_string(),
            traffic_light_glyph: traffic_light_glyph(food.traffic_light).to_string(),
            safe_amount: row.safe_amount,
            safe_amount_text: safe_amount_text(food),
            fodmaps: row.fodmaps,
        }
    }
}

/// Result of a food search.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFoodSearch {
    /// False when the query was blank and no search ran
    pub performed: bool,
    /// Ranked matches
    pub rows: Vec<FfiFoodRow>,
}

/// A recipe ready for display.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub title: String,
    pub servings: String,
    pub ingredients: Vec<String>,
    /// Numbered steps
    pub steps: Vec<String>,
}

impl From<RecipeCard> for FfiRecipe {
    fn from(card: RecipeCard) -> Self {
        FfiRecipe {
            title: card.title,
            servings: card.servings,
            ingredients: card.ingredients,
            steps: card.steps,
        }
    }
}

/// A recipe category and its matching recipes.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeCategory {
    pub label: String,
    pub glyph: String,
    pub recipes: Vec<FfiRecipe>,
}

/// A loaded catalog session.
///
/// Sources are read on first use and kept for the life of the object.
#[derive(uniffi::Object)]
pub struct FfiCatalog {
    inner: CatalogCache,
}

#[uniffi::export]
impl FfiCatalog {
    /// Creates a session over the given food table and recipe document.
    #[uniffi::constructor]
    pub fn new(food_path: String, recipe_path: String) -> Arc<Self> {
        let config = Config {
            food_path: Utf8PathBuf::from(food_path),
            recipe_path: Utf8PathBuf::from(recipe_path),
            ..Config::default()
        };
        Arc::new(FfiCatalog {
            inner: CatalogCache::new(config),
        })
    }

    /// Searches foods. A blank query returns `performed = false`.
    pub fn search_foods(&self, query: String) -> Result<FfiFoodSearch, FodmapError> {
        let outcome = self.inner.search_foods(&query)?;
        Ok(FfiFoodSearch {
            performed: outcome.is_performed(),
            rows: outcome.results().iter().map(|f| FfiFoodRow::from(*f)).collect(),
        })
    }

    /// Autocomplete suggestions for a partial food name.
    pub fn suggest_foods(&self, query: String) -> Result<Vec<FfiFoodRow>, FodmapError> {
        Ok(self
            .inner
            .suggest_foods(&query)?
            .into_iter()
            .map(FfiFoodRow::from)
            .collect())
    }

    /// Recipes whose title or an ingredient matches. A blank query returns
    /// every recipe.
    pub fn search_recipes(&self, query: String) -> Result<Vec<FfiRecipeCategory>, FodmapError> {
        Ok(self
            .inner
            .recipe_cards(&query)?
            .into_iter()
            .map(|(label, cards)| FfiRecipeCategory {
                glyph: category_glyph(&label).to_string(),
                label,
                recipes: cards.into_iter().map(FfiRecipe::from).collect(),
            })
            .collect())
    }

    /// Number of foods in the table.
    pub fn food_count(&self) -> Result<u32, FodmapError> {
        Ok(saturating_u32(self.inner.foods()?.len()))
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn create_catalog(dir: &TempDir) -> Arc<FfiCatalog> {
        let food_path = dir.path().join("foods.csv");
        let recipe_path = dir.path().join("recipes.json");
        fs::write(
            &food_path,
            indoc! {"
                name,category,traffic_light,safe_amount,lactose
                Cheddar,Dairy,Green,Any,FALSE
                Ricotta,Dairy,Amber,2 tbsp,TRUE
                Milk,Dairy,Red,None,TRUE
            "},
        )
        .unwrap();
        fs::write(
            &recipe_path,
            r#"[{"name": "Cheese Toastie", "category": "vegetarian", "ingredients": ["cheddar", "sourdough"]}]"#,
        )
        .unwrap();

        FfiCatalog::new(
            food_path.to_str().unwrap().to_string(),
            recipe_path.to_str().unwrap().to_string(),
        )
    }

    #[test]
    fn test_search_foods() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = create_catalog(&temp_dir);

        let result = catalog.search_foods("dairy".to_string()).unwrap();
        assert!(result.performed);
        let names: Vec<_> = result.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cheddar", "Ricotta", "Milk"]);

        let ricotta = &result.rows[1];
        assert_eq!(ricotta.traffic_light, "Amber");
        assert_eq!(ricotta.traffic_light_glyph, "🟡");
        assert_eq!(ricotta.safe_amount_text, "Safe up to 2 tbsp");
        assert_eq!(ricotta.fodmaps, "Lactose");
        assert_eq!(ricotta.category_glyph, "🥛");
    }

    #[test]
    fn test_blank_search_not_performed() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = create_catalog(&temp_dir);

        let result = catalog.search_foods(String::new()).unwrap();
        assert!(!result.performed);
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_suggest_and_recipes() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = create_catalog(&temp_dir);

        let suggestions = catalog.suggest_foods("ri".to_string()).unwrap();
        assert_eq!(suggestions[0].name, "Ricotta");

        let recipes = catalog.search_recipes("cheddar".to_string()).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].label, "Vegetarian");
        assert_eq!(recipes[0].recipes[0].servings, "Servings not specified");
    }

    #[test]
    fn test_missing_source() {
        let catalog =
            FfiCatalog::new("/nonexistent/foods.csv".into(), "/nonexistent/r.json".into());
        assert!(matches!(
            catalog.search_foods("milk".to_string()),
            Err(FodmapError::NotFound { .. })
        ));
        assert!(matches!(catalog.food_count(), Err(FodmapError::NotFound { .. })));
    }

    #[test]
    fn test_count_saturates() {
        assert_eq!(saturating_u32(23), 23);
        assert_eq!(saturating_u32(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_library_version() {
        assert_eq!(library_version(), env!("CARGO_PKG_VERSION"));
    }
}
