use super::{category_glyph, fodmap_label_list, numbered_instructions, status_label};
use crate::model::{FoodRecord, RecipeRecord};
use serde::Serialize;

/// A food ready for a results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodRow {
    pub food: String,
    pub category: String,
    /// Traffic light glyph and rating, e.g. "🟡 Amber"
    pub status: String,
    /// Safe amount as stored
    pub safe_amount: String,
    pub fodmaps: String,
}

impl From<&FoodRecord> for FoodRow {
    fn from(food: &FoodRecord) -> Self {
        FoodRow {
            food: food.name.clone(),
            category: food.category.clone(),
            status: status_label(food.traffic_light),
            safe_amount: food.safe_amount.raw().to_string(),
            fodmaps: fodmap_label_list(food),
        }
    }
}

/// A recipe ready to be shown, with numbered steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeCard {
    pub title: String,
    /// Category glyph and label, e.g. "🍳 Breakfast"
    pub category: String,
    pub servings: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl From<&RecipeRecord> for RecipeCard {
    fn from(recipe: &RecipeRecord) -> Self {
        RecipeCard {
            title: recipe.name.clone(),
            category: format!("{} {}", category_glyph(&recipe.category), recipe.category),
            servings: match &recipe.servings {
                Some(servings) => format!("Serves {servings}"),
                None => "Servings not specified".to_string(),
            },
            ingredients: recipe.ingredients.clone(),
            steps: numbered_instructions(&recipe.instructions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FodmapFlag, FodmapFlags, SafeAmount, TrafficLight};

    #[test]
    fn test_food_row() {
        let garlic = FoodRecord::new("Garlic", "Vegetables", TrafficLight::Red, SafeAmount::Avoid)
            .with_fodmaps(FodmapFlags::empty().with(FodmapFlag::Fructans));

        let row = FoodRow::from(&garlic);
        assert_eq!(row.food, "Garlic");
        assert_eq!(row.status, "🔴 Red");
        assert_eq!(row.safe_amount, "None");
        assert_eq!(row.fodmaps, "Fructans");
    }

    #[test]
    fn test_recipe_card() {
        let recipe = RecipeRecord {
            name: "Porridge".to_string(),
            category: "Breakfast".to_string(),
            servings: None,
            ingredients: vec!["oats".to_string()],
            instructions: vec!["1. Soak".to_string(), "3. Simmer".to_string()],
        };

        let card = RecipeCard::from(&recipe);
        assert_eq!(card.category, "🍳 Breakfast");
        assert_eq!(card.servings, "Servings not specified");
        assert_eq!(card.steps, vec!["1. Soak", "2. Simmer"]);

        let card = RecipeCard::from(&RecipeRecord {
            servings: Some("2".to_string()),
            ..recipe
        });
        assert_eq!(card.servings, "Serves 2");
    }
}
