use super::{read_source, value_text, LoadError};
use crate::model::{FodmapFlag, FodmapFlags, FoodCatalog, FoodRecord, SafeAmount, TrafficLight};
use camino::Utf8Path;
use serde_json::{Map, Value};
use std::io::Read;
use tracing::{debug, info, warn};

const REQUIRED_COLUMNS: [&str; 4] = ["name", "category", "traffic_light", "safe_amount"];

/// Loads the food table from a `.json` file or, for any other extension,
/// from CSV.
pub fn load_food_catalog(path: &Utf8Path) -> Result<FoodCatalog, LoadError> {
    let content = read_source(path)?;
    let parsed = match path.extension().map(str::to_ascii_lowercase).as_deref() {
        Some("json") => parse_food_json(&content),
        _ => parse_food_csv(content.as_bytes()),
    };
    let catalog = parsed.map_err(|e| e.in_file(path))?;

    info!(path = %path, foods = catalog.len(), "loaded food catalog");
    Ok(catalog)
}

/// Parses a CSV food table with a header row.
///
/// `name`, `category`, `traffic_light` and `safe_amount` columns are required.
/// FODMAP columns are optional and default to `false`; unknown columns are
/// ignored. Rows may be ragged: missing trailing cells read as empty and
/// cells past the header are dropped.
pub fn parse_food_csv<R: Read>(reader: R) -> Result<FoodCatalog, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(LoadError::malformed)?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let mut required = [0usize; 4];
    for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = column(name)
            .ok_or_else(|| LoadError::malformed(format!("missing required column `{name}`")))?;
    }
    let [name_col, category_col, light_col, amount_col] = required;
    let flag_cols: Vec<(FodmapFlag, usize)> = FodmapFlag::ALL
        .into_iter()
        .filter_map(|flag| column(flag.column()).map(|i| (flag, i)))
        .collect();
    debug!(flag_columns = flag_cols.len(), "resolved food table columns");

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(LoadError::malformed)?;
        let cell = |i: usize| row.get(i).unwrap_or("");

        let name = cell(name_col);
        if name.is_empty() {
            warn!(row = index + 1, "skipping food row without a name");
            continue;
        }

        let fodmaps = flag_cols
            .iter()
            .filter(|(_, i)| coerce_flag(&csv_cell(cell(*i))))
            .map(|(flag, _)| *flag)
            .collect();

        records.push(
            FoodRecord::new(
                name,
                cell(category_col),
                TrafficLight::parse(cell(light_col)),
                SafeAmount::parse(Some(cell(amount_col))),
            )
            .with_fodmaps(fodmaps),
        );
    }

    Ok(FoodCatalog::new(records))
}

/// Parses a JSON array of food row objects.
///
/// Keys follow the CSV column names. Each row needs a `name`; the other
/// fields fall back to empty, unrated and avoid respectively.
pub fn parse_food_json(content: &str) -> Result<FoodCatalog, LoadError> {
    let rows: Vec<Map<String, Value>> =
        serde_json::from_str(content).map_err(LoadError::malformed)?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let row: Map<String, Value> = row
            .into_iter()
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v))
            .collect();
        let text = |key: &str| row.get(key).and_then(value_text);

        let Some(name) = text("name").filter(|n| !n.is_empty()) else {
            warn!(row = index + 1, "skipping food row without a name");
            continue;
        };

        let mut fodmaps = FodmapFlags::empty();
        for flag in FodmapFlag::ALL {
            fodmaps.set(flag, row.get(flag.column()).is_some_and(coerce_flag));
        }

        records.push(
            FoodRecord::new(
                name,
                text("category").unwrap_or_default(),
                TrafficLight::parse(&text("traffic_light").unwrap_or_default()),
                SafeAmount::parse(text("safe_amount").as_deref()),
            )
            .with_fodmaps(fodmaps),
        );
    }

    Ok(FoodCatalog::new(records))
}

/// Reads a CSV cell the way a dataframe reader types it: `True`/`False` in
/// their native spellings become booleans, everything else stays text.
fn csv_cell(cell: &str) -> Value {
    match cell {
        "True" | "true" => Value::Bool(true),
        "False" | "false" => Value::Bool(false),
        other => Value::String(other.to_string()),
    }
}

/// `TRUE` (as stored) and native `true` are present; anything else is absent.
fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "TRUE",
        _ => false,
    }
}
