pub mod catalog;
pub mod config;
pub mod ffi;
pub mod format;
pub mod loader;
pub mod model;
pub mod search;

pub use catalog::CatalogCache;
pub use config::{Config, ConfigError};
pub use format::{
    category_glyph, fodmap_label_list, numbered_instructions, results_heading, safe_amount_text,
    status_label, traffic_light_glyph, FoodRow, RecipeCard,
};
pub use loader::{load_food_catalog, load_recipe_catalog, LoadError};
pub use model::*;
pub use search::{rank, search, search_recipes, suggest, FoodSearch, MatchScope};

uniffi::setup_scaffolding!();
