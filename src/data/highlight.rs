use std::collections::BTreeSet;

use super::model::Record;
use super::ordering::{filter_keys, FilterGroup};

/// The filter buttons that describe `record`: every (key, value) pair of the
/// record for which `groups` has a button.
pub fn highlight_pairs(record: &Record, groups: &[FilterGroup]) -> BTreeSet<(String, String)> {
    filter_keys(groups)
        .filter_map(|fk| {
            let value = record.get(&fk.key)?;
            fk.values
                .iter()
                .any(|v| v == value)
                .then(|| (fk.key.clone(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ordering::FilterKey;

    #[test]
    fn test_highlight_known_pairs_only() {
        let groups = vec![FilterGroup {
            name: String::new(),
            keys: vec![
                FilterKey::new("Venue", ["CHI", "CSCW"]),
                FilterKey::new("Method", ["Survey"]),
            ],
        }];
        let record: Record = [
            ("Author", "Lee"),
            ("Venue", "CHI"),
            ("Method", "Interview"),
            ("Data", "Logs"),
        ]
        .into_iter()
        .collect();

        let pairs = highlight_pairs(&record, &groups);
        let expected: BTreeSet<(String, String)> =
            [("Venue".to_string(), "CHI".to_string())].into_iter().collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_highlight_empty_record() {
        let groups = vec![FilterGroup {
            name: String::new(),
            keys: vec![FilterKey::new("Venue", ["CHI"])],
        }];
        assert!(highlight_pairs(&Record::default(), &groups).is_empty());
    }
}
