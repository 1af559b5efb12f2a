use serde::{Deserialize, Serialize};

/// A single recipe, normalised from whichever document shape it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub name: String,
    /// Display label of the category the recipe belongs to
    pub category: String,
    /// Free-text serving size; `None` when the source does not say
    pub servings: Option<String>,
    pub ingredients: Vec<String>,
    /// Steps as stored. They may already carry a "1. " style prefix.
    pub instructions: Vec<String>,
}

/// A display category and its recipes, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCategory {
    pub label: String,
    pub recipes: Vec<RecipeRecord>,
}

/// Recipes grouped by display category, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCatalog {
    categories: Vec<RecipeCategory>,
}

impl RecipeCatalog {
    pub fn new(categories: Vec<RecipeCategory>) -> Self {
        RecipeCatalog { categories }
    }

    pub fn categories(&self) -> &[RecipeCategory] {
        &self.categories
    }

    /// Looks up a category by its display label.
    pub fn get(&self, label: &str) -> Option<&RecipeCategory> {
        self.categories.iter().find(|c| c.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.label.as_str())
    }

    /// All recipes across every category.
    pub fn recipes(&self) -> impl Iterator<Item = &RecipeRecord> {
        self.categories.iter().flat_map(|c| c.recipes.iter())
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
