use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall safety rating of a food on a low-FODMAP diet.
///
/// Anything that is not one of the three known colours is kept as
/// `Unrated` rather than rejected, and sorts with the foods to avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficLight {
    Green,
    Amber,
    Red,
    Unrated,
}

impl TrafficLight {
    /// Parses a rating as stored in the food table. Case and surrounding
    /// whitespace are ignored.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "green" => TrafficLight::Green,
            "amber" => TrafficLight::Amber,
            "red" => TrafficLight::Red,
            _ => TrafficLight::Unrated,
        }
    }

    /// Severity bucket used for ranking.
    pub fn severity(self) -> Severity {
        match self {
            TrafficLight::Green => Severity::Safe,
            TrafficLight::Amber => Severity::Caution,
            TrafficLight::Red | TrafficLight::Unrated => Severity::Avoid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrafficLight::Green => "Green",
            TrafficLight::Amber => "Amber",
            TrafficLight::Red => "Red",
            TrafficLight::Unrated => "Unrated",
        }
    }
}

impl fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranking bucket. The derived `Ord` is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Safe = 0,
    Caution = 1,
    Avoid = 2,
}

/// The tolerated portion of a food.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafeAmount {
    /// No portion limit.
    Any,
    /// Should not be eaten at all. Also covers empty and missing values.
    Avoid,
    /// Free-text quantity such as "1/2 cup", kept verbatim.
    Portion(String),
}

impl SafeAmount {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return SafeAmount::Avoid;
        };
        match raw.to_ascii_lowercase().as_str() {
            "any" => SafeAmount::Any,
            "" | "none" | "nan" | "null" | "n/a" => SafeAmount::Avoid,
            _ => SafeAmount::Portion(raw.to_string()),
        }
    }

    /// The value as it would appear in the source table.
    pub fn raw(&self) -> &str {
        match self {
            SafeAmount::Any => "Any",
            SafeAmount::Avoid => "None",
            SafeAmount::Portion(text) => text,
        }
    }
}

/// One of the six tracked FODMAP classes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FodmapFlag {
    Fructans,
    Gos,
    Fructose,
    Lactose,
    Sorbitol,
    Mannitol,
}

impl FodmapFlag {
    pub const ALL: [FodmapFlag; 6] = [
        FodmapFlag::Fructans,
        FodmapFlag::Gos,
        FodmapFlag::Fructose,
        FodmapFlag::Lactose,
        FodmapFlag::Sorbitol,
        FodmapFlag::Mannitol,
    ];

    /// Column name in the food table.
    pub fn column(self) -> &'static str {
        match self {
            FodmapFlag::Fructans => "fructans",
            FodmapFlag::Gos => "gos",
            FodmapFlag::Fructose => "fructose",
            FodmapFlag::Lactose => "lactose",
            FodmapFlag::Sorbitol => "sorbitol",
            FodmapFlag::Mannitol => "mannitol",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            FodmapFlag::Fructans => "Fructans",
            FodmapFlag::Gos => "GOS",
            FodmapFlag::Fructose => "Fructose",
            FodmapFlag::Lactose => "Lactose",
            FodmapFlag::Sorbitol => "Sorbitol",
            FodmapFlag::Mannitol => "Mannitol",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of FODMAP classes present in a food.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FodmapFlags(u8);

impl FodmapFlags {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, flag: FodmapFlag) -> Self {
        self.set(flag, true);
        self
    }

    pub fn set(&mut self, flag: FodmapFlag, present: bool) {
        if present {
            self.0 |= flag.bit();
        } else {
            self.0 &= !flag.bit();
        }
    }

    pub fn contains(&self, flag: FodmapFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Present flags in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = FodmapFlag> + '_ {
        FodmapFlag::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl FromIterator<FodmapFlag> for FodmapFlags {
    fn from_iter<I: IntoIterator<Item = FodmapFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), FodmapFlags::with)
    }
}

/// One row of the food table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub name: String,
    pub category: String,
    pub traffic_light: TrafficLight,
    pub safe_amount: SafeAmount,
    pub fodmaps: FodmapFlags,
}

impl FoodRecord {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        traffic_light: TrafficLight,
        safe_amount: SafeAmount,
    ) -> Self {
        FoodRecord {
            name: name.into(),
            category: category.into(),
            traffic_light,
            safe_amount,
            fodmaps: FodmapFlags::empty(),
        }
    }

    pub fn with_fodmaps(mut self, fodmaps: FodmapFlags) -> Self {
        self.fodmaps = fodmaps;
        self
    }

    /// Ranking bucket. Derived from the traffic light alone; the safe amount
    /// is only ever displayed.
    pub fn severity(&self) -> Severity {
        self.traffic_light.severity()
    }
}

/// The loaded food table, in source order.
///
/// Duplicate names are kept as separate records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodCatalog {
    records: Vec<FoodRecord>,
}

impl FoodCatalog {
    pub fn new(records: Vec<FoodRecord>) -> Self {
        FoodCatalog { records }
    }

    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FoodRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a FoodCatalog {
    type Item = &'a FoodRecord;
    type IntoIter = std::slice::Iter<'a, FoodRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_light_parse() {
        assert_eq!(TrafficLight::parse("Green"), TrafficLight::Green);
        assert_eq!(TrafficLight::parse(" amber "), TrafficLight::Amber);
        assert_eq!(TrafficLight::parse("RED"), TrafficLight::Red);
        assert_eq!(TrafficLight::parse("purple"), TrafficLight::Unrated);
        assert_eq!(TrafficLight::parse(""), TrafficLight::Unrated);
    }

    #[test]
    fn test_severity_buckets() {
        assert_eq!(TrafficLight::Green.severity(), Severity::Safe);
        assert_eq!(TrafficLight::Amber.severity(), Severity::Caution);
        assert_eq!(TrafficLight::Red.severity(), Severity::Avoid);
        assert_eq!(TrafficLight::Unrated.severity(), Severity::Avoid);
        assert!(Severity::Safe < Severity::Caution);
        assert!(Severity::Caution < Severity::Avoid);
    }

    #[test]
    fn test_severity_ignores_safe_amount() {
        // Inconsistent rows are tolerated; the traffic light wins.
        let food = FoodRecord::new("Odd", "Misc", TrafficLight::Green, SafeAmount::Avoid);
        assert_eq!(food.severity(), Severity::Safe);
    }

    #[test]
    fn test_safe_amount_parse() {
        assert_eq!(SafeAmount::parse(Some("Any")), SafeAmount::Any);
        assert_eq!(SafeAmount::parse(Some("any")), SafeAmount::Any);
        assert_eq!(SafeAmount::parse(Some("None")), SafeAmount::Avoid);
        assert_eq!(SafeAmount::parse(Some("  ")), SafeAmount::Avoid);
        assert_eq!(SafeAmount::parse(Some("NaN")), SafeAmount::Avoid);
        assert_eq!(SafeAmount::parse(None), SafeAmount::Avoid);
        assert_eq!(
            SafeAmount::parse(Some(" 1/2 cup ")),
            SafeAmount::Portion("1/2 cup".to_string())
        );
    }

    #[test]
    fn test_fodmap_flags() {
        let mut flags: FodmapFlags = [FodmapFlag::Mannitol, FodmapFlag::Fructans]
            .into_iter()
            .collect();
        assert!(flags.contains(FodmapFlag::Fructans));
        assert!(!flags.contains(FodmapFlag::Lactose));
        assert_eq!(
            flags.iter().collect::<Vec<_>>(),
            vec![FodmapFlag::Fructans, FodmapFlag::Mannitol]
        );

        flags.set(FodmapFlag::Fructans, false);
        flags.set(FodmapFlag::Mannitol, false);
        assert!(flags.is_empty());
    }
}
