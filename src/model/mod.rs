mod food;
mod recipe;

pub use food::{
    FodmapFlag, FodmapFlags, FoodCatalog, FoodRecord, SafeAmount, Severity, TrafficLight,
};
pub use recipe::{RecipeCatalog, RecipeCategory, RecipeRecord};
