use super::{read_source, value_text, LoadError};
use crate::model::{RecipeCatalog, RecipeCategory, RecipeRecord};
use camino::Utf8Path;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Known category identifiers with their display labels, in display order.
const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("breakfast", "Breakfast"),
    ("vegetarian", "Vegetarian"),
    ("white_meat", "White Meat"),
    ("chicken", "Chicken"),
    ("seafood", "Seafood"),
    ("red_meat", "Red Meat"),
];

/// Label for flat-list recipes whose category is not in the table.
const FALLBACK_LABEL: &str = "Other Recipes";

/// Syntax of a recipe document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` and `.yml` are YAML; everything else is treated as JSON.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("yaml" | "yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Loads the recipe document at `path`.
pub fn load_recipe_catalog(path: &Utf8Path) -> Result<RecipeCatalog, LoadError> {
    let content = read_source(path)?;
    let catalog = parse_recipe_document(&content, DocumentFormat::from_path(path))
        .map_err(|e| e.in_file(path))?;

    info!(
        path = %path,
        categories = catalog.len(),
        recipes = catalog.recipes().count(),
        "loaded recipe catalog"
    );
    Ok(catalog)
}

/// Parses a recipe document in either supported shape.
///
/// * Flat: a list of recipe objects (or `{"recipes": [...]}`), each tagged
///   with a `category`.
/// * Keyed: an object whose keys are category identifiers, each holding a
///   list of recipes using `title` and `serves`.
///
/// Both normalise to the same [`RecipeCatalog`]. Known categories come first
/// in their fixed order, the rest follow in the order they were seen.
pub fn parse_recipe_document(
    content: &str,
    format: DocumentFormat,
) -> Result<RecipeCatalog, LoadError> {
    let document: Value = match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(LoadError::malformed)?,
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(LoadError::malformed)?,
    };

    let groups = match detect_shape(document)? {
        Shape::Flat(items) => {
            debug!(recipes = items.len(), "recipe document is a flat list");
            group_flat(items)?
        }
        Shape::Keyed(map) => {
            debug!(categories = map.len(), "recipe document is keyed by category");
            group_keyed(map)?
        }
    };

    Ok(into_catalog(groups))
}

enum Shape {
    Flat(Vec<Value>),
    Keyed(Map<String, Value>),
}

fn detect_shape(document: Value) -> Result<Shape, LoadError> {
    match document {
        Value::Array(items) => Ok(Shape::Flat(items)),
        Value::Object(mut map)
            if map.len() == 1 && map.get("recipes").is_some_and(Value::is_array) =>
        {
            match map.remove("recipes") {
                Some(Value::Array(items)) => Ok(Shape::Flat(items)),
                _ => Err(LoadError::malformed("`recipes` is not a list")),
            }
        }
        Value::Object(map) if map.values().all(Value::is_array) => Ok(Shape::Keyed(map)),
        Value::Object(_) => Err(LoadError::malformed(
            "expected a list of recipes or an object of recipe lists",
        )),
        other => Err(LoadError::malformed(format!(
            "expected a recipe document, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// A recipe in the flat shape. Either spelling of the title and servings
/// fields is accepted; when both are present `name` and `servings` win.
#[derive(Deserialize)]
struct FlatRecipe {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    servings: Option<Value>,
    #[serde(default)]
    serves: Option<Value>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    instructions: Vec<String>,
}

/// A recipe in the keyed shape. Here `title` and `serves` win over
/// `name` and `servings`.
#[derive(Deserialize)]
struct KeyedRecipe {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    serves: Option<Value>,
    #[serde(default)]
    servings: Option<Value>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    instructions: Vec<String>,
}

fn recipe_title(preferred: Option<String>, fallback: Option<String>) -> Result<String, String> {
    preferred
        .or(fallback)
        .map(|title| title.trim().to_string())
        .ok_or_else(|| "missing field `name`".to_string())
}

struct Group {
    key: String,
    label: String,
    recipes: Vec<RecipeRecord>,
}

fn group_flat(items: Vec<Value>) -> Result<Vec<Group>, LoadError> {
    let mut groups: Vec<Group> = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        let context = |e: &dyn std::fmt::Display| format!("recipe {}: {e}", index + 1);
        let recipe: FlatRecipe =
            serde_json::from_value(item).map_err(|e| LoadError::malformed(context(&e)))?;
        let name = recipe_title(recipe.name, recipe.title)
            .map_err(|e| LoadError::malformed(context(&e)))?;

        let key = recipe.category.as_deref().map(category_key).unwrap_or_default();
        let (key, label) = match known_label(&key) {
            Some(label) => (key, label.to_string()),
            None => (String::new(), FALLBACK_LABEL.to_string()),
        };

        let record = RecipeRecord {
            name,
            category: label.clone(),
            servings: recipe.servings.or(recipe.serves).as_ref().and_then(servings_text),
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
        };

        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.recipes.push(record),
            None => groups.push(Group {
                key,
                label,
                recipes: vec![record],
            }),
        }
    }

    Ok(groups)
}

fn group_keyed(map: Map<String, Value>) -> Result<Vec<Group>, LoadError> {
    let mut groups: Vec<Group> = Vec::with_capacity(map.len());

    for (raw_key, items) in map {
        let key = category_key(&raw_key);
        let malformed = |e: &dyn std::fmt::Display| {
            LoadError::malformed(format!("category `{raw_key}`: {e}"))
        };

        let items: Vec<KeyedRecipe> = serde_json::from_value(items).map_err(|e| malformed(&e))?;
        let group_index = match groups.iter().position(|g| g.key == key) {
            Some(i) => i,
            None => {
                let label = known_label(&key)
                    .map(str::to_string)
                    .unwrap_or_else(|| title_case(&raw_key));
                groups.push(Group {
                    key,
                    label,
                    recipes: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[group_index];

        for recipe in items {
            group.recipes.push(RecipeRecord {
                name: recipe_title(recipe.title, recipe.name).map_err(|e| malformed(&e))?,
                category: group.label.clone(),
                servings: recipe.serves.or(recipe.servings).as_ref().and_then(servings_text),
                ingredients: recipe.ingredients,
                instructions: recipe.instructions,
            });
        }
    }

    Ok(groups)
}

fn into_catalog(mut groups: Vec<Group>) -> RecipeCatalog {
    // Stable: unknown categories keep their encounter order.
    groups.sort_by_key(|g| canonical_position(&g.key).unwrap_or(usize::MAX));

    RecipeCatalog::new(
        groups
            .into_iter()
            .map(|g| RecipeCategory {
                label: g.label,
                recipes: g.recipes,
            })
            .collect(),
    )
}

/// Normalises a category name or identifier: "White Meat" and
/// "white-meat" both become "white_meat".
fn category_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn known_label(key: &str) -> Option<&'static str> {
    CATEGORY_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
}

fn canonical_position(key: &str) -> Option<usize> {
    CATEGORY_LABELS.iter().position(|(k, _)| *k == key)
}

fn title_case(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn servings_text(value: &Value) -> Option<String> {
    value_text(value).filter(|s| !s.is_empty())
}
