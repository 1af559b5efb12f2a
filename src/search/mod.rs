use crate::format::fodmap_names;
use crate::model::{FoodCatalog, FoodRecord, RecipeCatalog, RecipeCategory, RecipeRecord};
use std::collections::HashSet;

mod model;
mod rank;

pub use model::{FoodSearch, MatchScope};
pub use rank::{compare, rank};

/// Autocomplete stays quiet until the query has this many characters.
pub const MIN_SUGGEST_LEN: usize = 2;

/// Default number of autocomplete suggestions.
pub const DEFAULT_SUGGESTIONS: usize = 5;

/// Search foods by name, category and FODMAP classes.
///
/// See [`search_with_scope`].
pub fn search<'a>(catalog: &'a FoodCatalog, query: &str) -> FoodSearch<'a> {
    search_with_scope(catalog, query, MatchScope::All)
}

/// Case-insensitive substring search over the food catalog.
///
/// A blank query yields [`FoodSearch::NoQuery`]. Otherwise every food whose
/// searched fields contain the query is returned in [`rank`] order.
pub fn search_with_scope<'a>(
    catalog: &'a FoodCatalog,
    query: &str,
    scope: MatchScope,
) -> FoodSearch<'a> {
    let Some(needle) = normalize_query(query) else {
        return FoodSearch::NoQuery;
    };

    let matches = catalog
        .iter()
        .filter(|food| food_matches(food, &needle, scope))
        .collect();

    FoodSearch::Results(rank(matches))
}

fn food_matches(food: &FoodRecord, needle: &str, scope: MatchScope) -> bool {
    if food.name.to_lowercase().contains(needle) {
        return true;
    }
    match scope {
        MatchScope::Name => false,
        MatchScope::All => {
            food.category.to_lowercase().contains(needle)
                || fodmap_names(food).to_lowercase().contains(needle)
        }
    }
}

/// Autocomplete candidates for a partial food name.
///
/// Names starting with the query come first, then names that only contain
/// it, each group in catalog order. A name is suggested at most once and no
/// more than `limit` suggestions are returned. Queries shorter than
/// [`MIN_SUGGEST_LEN`] characters get none.
pub fn suggest<'a>(catalog: &'a FoodCatalog, query: &str, limit: usize) -> Vec<&'a FoodRecord> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };
    if needle.chars().count() < MIN_SUGGEST_LEN {
        return Vec::new();
    }

    let (prefixed, contained): (Vec<_>, Vec<_>) = catalog
        .iter()
        .filter_map(|food| {
            let name = food.name.to_lowercase();
            if name.starts_with(&needle) {
                Some((true, food))
            } else if name.contains(&needle) {
                Some((false, food))
            } else {
                None
            }
        })
        .partition(|(prefix, _)| *prefix);

    let mut seen = HashSet::new();
    prefixed
        .into_iter()
        .chain(contained)
        .map(|(_, food)| food)
        .filter(|&food| seen.insert(food.name.as_str()))
        .take(limit)
        .collect()
}

/// Filters recipes by name or by any single ingredient.
///
/// Categories left without recipes are dropped. A blank query returns the
/// whole catalog.
pub fn search_recipes(catalog: &RecipeCatalog, query: &str) -> RecipeCatalog {
    let Some(needle) = normalize_query(query) else {
        return catalog.clone();
    };

    let categories = catalog
        .categories()
        .iter()
        .filter_map(|category| {
            let recipes: Vec<RecipeRecord> = category
                .recipes
                .iter()
                .filter(|recipe| recipe_matches(recipe, &needle))
                .cloned()
                .collect();
            (!recipes.is_empty()).then(|| RecipeCategory {
                label: category.label.clone(),
                recipes,
            })
        })
        .collect();

    RecipeCatalog::new(categories)
}

fn recipe_matches(recipe: &RecipeRecord, needle: &str) -> bool {
    recipe.name.to_lowercase().contains(needle)
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(needle))
}

/// Trimmed, lower-cased query, or `None` if there is nothing to search for.
fn normalize_query(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FodmapFlag, FodmapFlags, SafeAmount, TrafficLight};

    fn catalog() -> FoodCatalog {
        FoodCatalog::new(vec![
            FoodRecord::new("Garlic", "Vegetables", TrafficLight::Red, SafeAmount::Avoid)
                .with_fodmaps(FodmapFlags::empty().with(FodmapFlag::Fructans)),
            FoodRecord::new("Spinach", "Vegetables", TrafficLight::Green, SafeAmount::Any),
            FoodRecord::new("Wheat bread", "Grains", TrafficLight::Red, SafeAmount::Avoid)
                .with_fodmaps(FodmapFlags::empty().with(FodmapFlag::Fructans)),
            FoodRecord::new(
                "Buckwheat",
                "Grains",
                TrafficLight::Green,
                SafeAmount::Portion("1 cup".to_string()),
            ),
            FoodRecord::new("Whole milk", "Dairy", TrafficLight::Red, SafeAmount::Avoid)
                .with_fodmaps(FodmapFlags::empty().with(FodmapFlag::Lactose)),
            FoodRecord::new(
                "Wheat pasta",
                "Grains",
                TrafficLight::Amber,
                SafeAmount::Portion("1/2 cup".to_string()),
            ),
            FoodRecord::new("Wheat crackers", "Grains", TrafficLight::Red, SafeAmount::Avoid),
            FoodRecord::new("Wheat bread", "Bakery", TrafficLight::Red, SafeAmount::Avoid),
            FoodRecord::new("Wheatgrass", "Beverages", TrafficLight::Green, SafeAmount::Any),
            FoodRecord::new(
                "Shredded wheat",
                "Grains",
                TrafficLight::Amber,
                SafeAmount::Portion("2 biscuits".to_string()),
            ),
        ])
    }

    fn names<'a>(foods: &[&'a FoodRecord]) -> Vec<&'a str> {
        foods.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_blank_query_is_not_a_search() {
        let catalog = catalog();
        assert_eq!(search(&catalog, ""), FoodSearch::NoQuery);
        assert_eq!(search(&catalog, "   "), FoodSearch::NoQuery);
        assert!(!search(&catalog, "").is_performed());
    }

    #[test]
    fn test_no_matches_is_an_empty_result() {
        let catalog = catalog();
        let outcome = search(&catalog, "durian");
        assert!(outcome.is_performed());
        assert!(outcome.results().is_empty());
    }

    #[test]
    fn test_category_match_and_ranking() {
        let catalog = catalog();
        let outcome = search(&catalog, "veg");
        assert_eq!(names(outcome.results()), vec!["Spinach", "Garlic"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(search(&catalog, "WHEAT"), search(&catalog, "wheat"));
        assert_eq!(search(&catalog, " Wheat "), search(&catalog, "wheat"));
    }

    #[test]
    fn test_search_ranks_results() {
        let catalog = catalog();
        let outcome = search_with_scope(&catalog, "wheat", MatchScope::Name);
        assert_eq!(
            names(outcome.results()),
            vec![
                "Buckwheat",
                "Wheatgrass",
                "Shredded wheat",
                "Wheat pasta",
                "Wheat bread",
                "Wheat bread",
                "Wheat crackers",
            ]
        );
    }

    #[test]
    fn test_search_matches_fodmap_names() {
        let catalog = catalog();
        let outcome = search(&catalog, "lactose");
        assert_eq!(names(outcome.results()), vec!["Whole milk"]);

        let outcome = search_with_scope(&catalog, "lactose", MatchScope::Name);
        assert!(outcome.results().is_empty());
    }

    #[test]
    fn test_search_does_not_match_sentinel_text() {
        let catalog = catalog();
        let outcome = search(&catalog, "detected");
        assert!(outcome.results().is_empty());
    }

    #[test]
    fn test_name_scope_ignores_category() {
        let catalog = catalog();
        let outcome = search_with_scope(&catalog, "veg", MatchScope::Name);
        assert!(outcome.results().is_empty());
    }

    #[test]
    fn test_suggest_requires_two_characters() {
        let catalog = catalog();
        assert!(suggest(&catalog, "w", DEFAULT_SUGGESTIONS).is_empty());
        assert!(suggest(&catalog, " w ", DEFAULT_SUGGESTIONS).is_empty());
        assert!(suggest(&catalog, "", DEFAULT_SUGGESTIONS).is_empty());
    }

    #[test]
    fn test_suggest_prefix_before_contains() {
        let catalog = catalog();
        let suggestions = suggest(&catalog, "wh", DEFAULT_SUGGESTIONS);
        assert_eq!(
            names(&suggestions),
            vec!["Wheat bread", "Whole milk", "Wheat pasta", "Wheat crackers", "Wheatgrass"]
        );
    }

    #[test]
    fn test_suggest_fills_with_contains_matches() {
        let catalog = catalog();
        let suggestions = suggest(&catalog, "heat", DEFAULT_SUGGESTIONS);
        assert_eq!(
            names(&suggestions),
            vec!["Wheat bread", "Buckwheat", "Wheat pasta", "Wheat crackers", "Wheatgrass"]
        );

        let suggestions = suggest(&catalog, "wheat", DEFAULT_SUGGESTIONS);
        assert_eq!(
            names(&suggestions),
            vec!["Wheat bread", "Wheat pasta", "Wheat crackers", "Wheatgrass", "Buckwheat"]
        );
    }

    #[test]
    fn test_suggest_has_no_duplicates_and_respects_limit() {
        let catalog = catalog();
        for limit in 0..=6 {
            let suggestions = suggest(&catalog, "wheat", limit);
            assert!(suggestions.len() <= limit);
            let unique: HashSet<_> = suggestions.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(unique.len(), suggestions.len());
        }
    }

    fn recipes() -> RecipeCatalog {
        let recipe = |name: &str, category: &str, ingredients: &[&str]| RecipeRecord {
            name: name.to_string(),
            category: category.to_string(),
            servings: None,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: Vec::new(),
        };
        RecipeCatalog::new(vec![
            RecipeCategory {
                label: "Breakfast".to_string(),
                recipes: vec![
                    recipe("Porridge", "Breakfast", &["oats", "maple syrup"]),
                    recipe("Spinach Omelette", "Breakfast", &["eggs", "spinach"]),
                ],
            },
            RecipeCategory {
                label: "Seafood".to_string(),
                recipes: vec![recipe("Grilled Salmon", "Seafood", &["salmon", "lemon"])],
            },
        ])
    }

    #[test]
    fn test_search_recipes_by_name_and_ingredient() {
        let catalog = recipes();

        let found = search_recipes(&catalog, "OMELETTE");
        assert_eq!(found.labels().collect::<Vec<_>>(), vec!["Breakfast"]);
        assert_eq!(found.get("Breakfast").unwrap().recipes.len(), 1);

        let found = search_recipes(&catalog, "lemon");
        assert_eq!(found.labels().collect::<Vec<_>>(), vec!["Seafood"]);
    }

    #[test]
    fn test_search_recipes_matches_single_ingredients_only() {
        let catalog = recipes();
        // "oats" + "maple" would only match a concatenation of ingredients.
        assert!(search_recipes(&catalog, "oatsmaple").is_empty());
        assert!(search_recipes(&catalog, "oats maple").is_empty());
    }

    #[test]
    fn test_search_recipes_blank_query_returns_everything() {
        let catalog = recipes();
        assert_eq!(search_recipes(&catalog, " "), catalog);
    }
}
