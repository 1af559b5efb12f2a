//! Loading of the static food table and recipe document.
//!
//! Both loaders read a single file, pick a parser from the file extension
//! and normalise the result into the types in [`crate::model`]. Failures are
//! reported as [`LoadError`] and never panic; the caller decides how to tell
//! the user that no catalog is available.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::io::ErrorKind;
use thiserror::Error;

mod food;
mod recipe;

pub use food::{load_food_catalog, parse_food_csv, parse_food_json};
pub use recipe::{load_recipe_catalog, parse_recipe_document, DocumentFormat};

/// Errors that can occur when loading a catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Source not found: {0}")]
    NotFound(Utf8PathBuf),

    #[error("Malformed source: {0}")]
    Malformed(String),

    #[error("Failed to read {path}: {message}")]
    Io { path: Utf8PathBuf, message: String },
}

impl LoadError {
    pub(crate) fn malformed(message: impl ToString) -> Self {
        LoadError::Malformed(message.to_string())
    }

    /// Prefixes a parse failure with the file it came from.
    fn in_file(self, path: &Utf8Path) -> Self {
        match self {
            LoadError::Malformed(message) => LoadError::Malformed(format!("{path}: {message}")),
            other => other,
        }
    }
}

fn read_source(path: &Utf8Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        ErrorKind::InvalidData => LoadError::Malformed(format!("{path}: {e}")),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })
}

/// Renders a scalar cell as text. `null` and containers have no text.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
