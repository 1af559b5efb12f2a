//! Display helpers.
//!
//! Everything here is a pure function of its input and always produces some
//! text, falling back to a default for values it does not recognise.

use crate::model::{FoodRecord, SafeAmount, TrafficLight};
use regex::Regex;
use std::sync::OnceLock;

mod display;

pub use display::{FoodRow, RecipeCard};

/// Shown when a food carries none of the tracked FODMAP classes.
pub const NO_FODMAPS: &str = "None detected";

const CATEGORY_GLYPHS: &[(&str, &str)] = &[
    ("vegetables", "🥦"),
    ("fruits", "🍎"),
    ("grains", "🌾"),
    ("pulses", "🫘"),
    ("nuts", "🥜"),
    ("dairy", "🥛"),
    ("meat", "🍖"),
    ("seafood", "🐟"),
    ("condiments", "🧂"),
    ("sweeteners", "🍯"),
    ("beverages", "🥤"),
    ("additives", "🧪"),
    ("breakfast", "🍳"),
    ("vegetarian", "🥗"),
    ("white meat", "🍗"),
    ("chicken", "🍗"),
    ("red meat", "🥩"),
];

const FALLBACK_GLYPH: &str = "🍽️";

/// Comma-joined names of the FODMAP classes present, in vocabulary order.
/// Empty when there are none.
pub fn fodmap_names(food: &FoodRecord) -> String {
    food.fodmaps
        .iter()
        .map(|flag| flag.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Like [`fodmap_names`] but says [`NO_FODMAPS`] instead of nothing.
pub fn fodmap_label_list(food: &FoodRecord) -> String {
    if food.fodmaps.is_empty() {
        NO_FODMAPS.to_string()
    } else {
        fodmap_names(food)
    }
}

/// Portion advice for a food.
pub fn safe_amount_text(food: &FoodRecord) -> String {
    match &food.safe_amount {
        SafeAmount::Any => "Eat freely, no portion limit".to_string(),
        SafeAmount::Avoid => "Avoid".to_string(),
        SafeAmount::Portion(amount) => format!("Safe up to {amount}"),
    }
}

/// Glyph for a food or recipe category. Matching ignores case.
pub fn category_glyph(category: &str) -> &'static str {
    let category = category.trim().to_lowercase();
    CATEGORY_GLYPHS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(FALLBACK_GLYPH)
}

pub fn traffic_light_glyph(light: TrafficLight) -> &'static str {
    match light {
        TrafficLight::Green => "🟢",
        TrafficLight::Amber => "🟡",
        TrafficLight::Red => "🔴",
        TrafficLight::Unrated => "⚪",
    }
}

/// Glyph followed by the rating, e.g. "🟢 Green".
pub fn status_label(light: TrafficLight) -> String {
    format!("{} {}", traffic_light_glyph(light), light)
}

/// Heading for a result list.
pub fn results_heading(count: usize) -> String {
    format!("Found {count} food(s)")
}

fn ordinal_prefix() -> &'static Regex {
    static ORDINAL: OnceLock<Regex> = OnceLock::new();
    ORDINAL.get_or_init(|| Regex::new(r"^\s*\d+\.\s+").expect("ordinal pattern is valid"))
}

/// Removes a leading "<digits>. " from an instruction step.
pub fn strip_ordinal(step: &str) -> &str {
    match ordinal_prefix().find(step) {
        Some(m) => &step[m.end()..],
        None => step.trim_start(),
    }
}

/// Numbers instruction steps from 1, replacing any numbering they already
/// carry. Applying it to its own output changes nothing.
pub fn numbered_instructions<S: AsRef<str>>(steps: &[S]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, strip_ordinal(step.as_ref()).trim_end()))
        .collect()
}
