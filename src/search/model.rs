use crate::model::FoodRecord;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome of a food search.
///
/// A blank query is not a search; callers should prompt for input instead
/// of reporting zero results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodSearch<'a> {
    NoQuery,
    /// Matches in rank order. May be empty.
    Results(Vec<&'a FoodRecord>),
}

impl<'a> FoodSearch<'a> {
    pub fn is_performed(&self) -> bool {
        matches!(self, FoodSearch::Results(_))
    }

    /// Ranked matches; empty when no search was performed.
    pub fn results(&self) -> &[&'a FoodRecord] {
        match self {
            FoodSearch::NoQuery => &[],
            FoodSearch::Results(results) => results,
        }
    }
}

/// Which fields a food query is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchScope {
    /// Food name only
    Name,
    /// Name, category, and the names of the FODMAP classes present
    #[default]
    All,
}

impl FromStr for MatchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(MatchScope::Name),
            "all" => Ok(MatchScope::All),
            other => Err(format!("unknown match scope `{other}`, expected `name` or `all`")),
        }
    }
}
