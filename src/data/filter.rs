use std::collections::BTreeSet;

use super::model::Record;
use super::ordering::FilterGroup;
use super::selection::Selection;

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Whether `record` satisfies every constrained key of `selection`.
///
/// A record passes a key when:
/// * The key is not present in `selection` → passes (no constraint)
/// * The record's value for that key is among the accepted values → passes
/// * The record lacks the key → fails
pub fn matches(record: &Record, selection: &Selection) -> bool {
    selection
        .iter()
        .all(|(key, accepted)| record.get(key).is_some_and(|val| accepted.contains(val)))
}

/// Return indices of records that pass the selection, in input order.
pub fn filtered_indices(records: &[Record], selection: &Selection) -> Vec<usize> {
    if selection.is_empty() {
        return (0..records.len()).collect();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, selection))
        .map(|(i, _)| i)
        .collect()
}

/// Records that pass the selection, in input order.
pub fn filter<'a>(records: &'a [Record], selection: &Selection) -> Vec<&'a Record> {
    records.iter().filter(|rec| matches(rec, selection)).collect()
}

// ---------------------------------------------------------------------------
// Predictive disabling
// ---------------------------------------------------------------------------

/// Whether flipping `value` under `key` on top of `selection` leaves no
/// matching record.
///
/// The flip is a toggle: an inactive value is added to the key's accepted
/// set (union with the values already active there), an active one is
/// removed. Every other key keeps its current constraint.
pub fn would_be_empty(records: &[Record], selection: &Selection, key: &str, value: &str) -> bool {
    let simulated = selection.toggled(key, value);
    !records.iter().any(|rec| matches(rec, &simulated))
}

/// Whether the button for (`key`, `value`) should be shown disabled.
///
/// Active values are never disabled: turning one off can only widen the view.
pub fn is_disabled(records: &[Record], selection: &Selection, key: &str, value: &str) -> bool {
    !selection.is_active(key, value) && would_be_empty(records, selection, key, value)
}

/// Every (key, value) button across `groups` that is currently disabled.
///
/// Costs one pass over `records` per button; recompute after each
/// selection change.
pub fn disabled_pairs(
    records: &[Record],
    selection: &Selection,
    groups: &[FilterGroup],
) -> BTreeSet<(String, String)> {
    let mut disabled = BTreeSet::new();
    for group in groups {
        for fk in &group.keys {
            for value in &fk.values {
                if is_disabled(records, selection, &fk.key, value) {
                    disabled.insert((fk.key.clone(), value.clone()));
                }
            }
        }
    }
    log::debug!("{} filter values disabled", disabled.len());
    disabled
}
