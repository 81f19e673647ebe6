use super::aggregate::JurisdictionResult;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Ascending by reference total; unavailable totals go last in input order.
pub fn rank(results: Vec<JurisdictionResult>) -> Vec<JurisdictionResult> {
    rank_by(results, |result| result.total_reference)
}

/// Stable sort on an optional key, pushing `None` after every `Some`.
pub fn rank_by<T, F>(mut entries: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> Option<Decimal>,
{
    entries.sort_by(|left, right| match (key(left), key(right)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    entries
}
