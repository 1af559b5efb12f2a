use crate::model::FoodRecord;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Orders foods safe, then caution, then avoid, and by name within each
/// bucket. The sort is stable, so equal names keep their input order.
pub fn rank<R: Borrow<FoodRecord>>(mut records: Vec<R>) -> Vec<R> {
    records.sort_by(|a, b| compare(a.borrow(), b.borrow()));
    records
}

/// Severity bucket first, then a case-sensitive comparison of names.
pub fn compare(a: &FoodRecord, b: &FoodRecord) -> Ordering {
    a.severity()
        .cmp(&b.severity())
        .then_with(|| a.name.cmp(&b.name))
}
