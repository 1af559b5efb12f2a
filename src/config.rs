//! Runtime configuration: where the data lives and how searches behave.

use crate::search::{MatchScope, DEFAULT_SUGGESTIONS};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

pub const FOOD_PATH_VAR: &str = "FODMAP_FOOD_PATH";
pub const RECIPE_PATH_VAR: &str = "FODMAP_RECIPE_PATH";
pub const MATCH_SCOPE_VAR: &str = "FODMAP_MATCH_SCOPE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    IoError {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value for {var}: {message}")]
    InvalidEnv { var: &'static str, message: String },
}

/// Settings for a catalog session.
///
/// Every field has a default, so an empty YAML file is a valid config.
///
/// ```
/// # use fodmap_find::Config;
/// let config = Config::from_yaml_str("max_suggestions: 8").unwrap();
/// assert_eq!(config.max_suggestions, 8);
/// assert_eq!(config.food_path.as_str(), "data/foods.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Food table, CSV or JSON
    pub food_path: Utf8PathBuf,
    /// Recipe document, JSON or YAML
    pub recipe_path: Utf8PathBuf,
    pub match_scope: MatchScope,
    pub max_suggestions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            food_path: Utf8PathBuf::from("data/foods.csv"),
            recipe_path: Utf8PathBuf::from("data/recipes.json"),
            match_scope: MatchScope::default(),
            max_suggestions: DEFAULT_SUGGESTIONS,
        }
    }
}

impl Config {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Reads the config file if one is given, otherwise starts from the
    /// defaults, then applies `FODMAP_*` environment overrides.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(FOOD_PATH_VAR) {
            self.food_path = path.into();
        }
        if let Some(path) = lookup(RECIPE_PATH_VAR) {
            self.recipe_path = path.into();
        }
        if let Some(scope) = lookup(MATCH_SCOPE_VAR) {
            self.match_scope = scope.parse().map_err(|message| ConfigError::InvalidEnv {
                var: MATCH_SCOPE_VAR,
                message,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.food_path, Utf8PathBuf::from("data/foods.csv"));
        assert_eq!(config.recipe_path, Utf8PathBuf::from("data/recipes.json"));
        assert_eq!(config.match_scope, MatchScope::All);
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(Config::from_yaml_str("").unwrap(), config);
    }

    #[test]
    fn test_from_yaml() {
        let config = Config::from_yaml_str(indoc! {"
            food_path: /srv/fodmap/foods.json
            match_scope: name
        "})
        .unwrap();

        assert_eq!(config.food_path, Utf8PathBuf::from("/srv/fodmap/foods.json"));
        assert_eq!(config.recipe_path, Utf8PathBuf::from("data/recipes.json"));
        assert_eq!(config.match_scope, MatchScope::Name);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_scope() {
        let result = Config::from_yaml_str("match_scope: everything");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("fodmap.yaml")).unwrap();
        fs::write(&path, "max_suggestions: 3\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.max_suggestions, 3);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Utf8Path::new("/nonexistent/fodmap.yaml"));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (FOOD_PATH_VAR, "foods.json"),
            (MATCH_SCOPE_VAR, "NAME"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|var| env.get(var).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.food_path, Utf8PathBuf::from("foods.json"));
        assert_eq!(config.recipe_path, Utf8PathBuf::from("data/recipes.json"));
        assert_eq!(config.match_scope, MatchScope::Name);
    }

    #[test]
    fn test_invalid_scope_override() {
        let mut config = Config::default();
        let result = config.apply_overrides(|var| {
            (var == MATCH_SCOPE_VAR).then(|| "fuzzy".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
    }
}
