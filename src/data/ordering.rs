use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use super::model::{field_names, is_reserved, Record};

// ---------------------------------------------------------------------------
// Ordering descriptor (ordering.json)
// ---------------------------------------------------------------------------

/// Optional display ordering for filter keys and their buttons.
///
/// ```json
/// {
///   "keysOrder": ["Venue", "Method"],
///   "groups": [{ "name": "Publication", "keys": ["Venue"] }],
///   "buttonsOrder": { "Venue": ["CHI", "CSCW"], "Method": ["Survey"] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingDescriptor {
    #[serde(default)]
    pub keys_order: Vec<String>,
    #[serde(default)]
    pub groups: Vec<GroupOrder>,
    #[serde(default)]
    pub buttons_order: BTreeMap<String, Vec<String>>,
}

impl OrderingDescriptor {
    /// Whether the descriptor names at least one key, through `groups` or
    /// `keysOrder`. `{}` or misspelled fields parse but name nothing.
    pub fn is_well_formed(&self) -> bool {
        !self.keys_order.is_empty() || self.groups.iter().any(|g| !g.keys.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GroupOrder {
    #[serde(default)]
    pub name: String,
    pub keys: Vec<String>,
}

// ---------------------------------------------------------------------------
// Resolved filter structure
// ---------------------------------------------------------------------------

/// A filterable field and its ordered button values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterKey {
    pub key: String,
    pub values: Vec<String>,
}

impl FilterKey {
    pub fn new<I, S>(key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterKey {
            key: key.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A titled bucket of filter keys. The name may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroup {
    pub name: String,
    pub keys: Vec<FilterKey>,
}

/// Build the filter groups for `records`.
///
/// With a descriptor its groups, key order and value order are used as-is,
/// even when they name values that no record carries. Without one, every
/// non-reserved field becomes a key in a single unnamed group, keys and
/// values sorted. A descriptor that names no keys counts as absent.
pub fn resolve(records: &[Record], descriptor: Option<&OrderingDescriptor>) -> Vec<FilterGroup> {
    match descriptor {
        Some(desc) if desc.is_well_formed() => from_descriptor(records, desc),
        Some(_) => {
            log::warn!("Ordering names no filter keys. Using default ordering.");
            derive_default(records)
        }
        None => derive_default(records),
    }
}

fn from_descriptor(records: &[Record], desc: &OrderingDescriptor) -> Vec<FilterGroup> {
    let resolve_key = |key: &String| match desc.buttons_order.get(key) {
        Some(values) => FilterKey::new(key, values.iter().cloned()),
        None => {
            log::warn!("Ordering has no buttonsOrder entry for '{key}', deriving from data");
            FilterKey::new(key, distinct_values(records, key))
        }
    };

    if desc.groups.is_empty() {
        return vec![FilterGroup {
            name: String::new(),
            keys: desc.keys_order.iter().map(&resolve_key).collect(),
        }];
    }

    desc.groups
        .iter()
        .map(|g| FilterGroup {
            name: g.name.clone(),
            keys: g.keys.iter().map(&resolve_key).collect(),
        })
        .collect()
}

fn derive_default(records: &[Record]) -> Vec<FilterGroup> {
    vec![FilterGroup {
        name: String::new(),
        keys: field_names(records)
            .into_iter()
            .filter(|k| !is_reserved(k))
            .map(|k| FilterKey::new(k, distinct_values(records, k)))
            .collect(),
    }]
}

/// Sorted distinct values of `key`; records without the key contribute nothing.
pub fn distinct_values(records: &[Record], key: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.get(key))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Every filter key across `groups`, in display order.
pub fn filter_keys(groups: &[FilterGroup]) -> impl Iterator<Item = &FilterKey> {
    groups.iter().flat_map(|g| g.keys.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    fn records() -> Vec<Record> {
        vec![
            rec(&[("id", "1"), ("Author", "Lee"), ("Year", "2020"), ("Paper", "P1"), ("DOI_URL", "u1"), ("Venue", "CHI"), ("Method", "Survey")]),
            rec(&[("id", "2"), ("Author", "Kim"), ("Year", "2019"), ("Paper", "P2"), ("DOI_URL", "u2"), ("Venue", "CSCW")]),
            rec(&[("id", "3"), ("Author", "Ahn"), ("Year", "2021"), ("Paper", "P3"), ("DOI_URL", "u3"), ("Venue", "CHI"), ("Data", "Logs")]),
        ]
    }

    #[test]
    fn test_default_derivation() {
        let groups = resolve(&records(), None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "");
        let keys: Vec<&str> = groups[0].keys.iter().map(|k| k.key.as_str()).collect();
        assert_eq!(keys, vec!["Data", "Method", "Venue"]);
        assert_eq!(groups[0].keys[2].values, vec!["CHI", "CSCW"]);
        assert_eq!(groups[0].keys[0].values, vec!["Logs"]);
    }

    #[test]
    fn test_descriptor_order_is_authoritative() {
        let desc: OrderingDescriptor = serde_json::from_str(
            r#"{
                "keysOrder": ["Venue", "Method"],
                "groups": [
                    { "name": "Where", "keys": ["Venue"] },
                    { "name": "How", "keys": ["Method"] }
                ],
                "buttonsOrder": {
                    "Venue": ["CSCW", "CHI", "NIME"],
                    "Method": ["Survey", "Interview"]
                }
            }"#,
        )
        .unwrap();
        let groups = resolve(&records(), Some(&desc));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Where");
        assert_eq!(groups[0].keys, vec![FilterKey::new("Venue", ["CSCW", "CHI", "NIME"])]);
        assert_eq!(groups[1].keys, vec![FilterKey::new("Method", ["Survey", "Interview"])]);
    }

    #[test]
    fn test_descriptor_without_groups_uses_keys_order() {
        let desc = OrderingDescriptor {
            keys_order: vec!["Method".into(), "Venue".into()],
            groups: Vec::new(),
            buttons_order: [("Method".to_string(), vec!["Interview".to_string()])].into_iter().collect(),
        };
        let groups = resolve(&records(), Some(&desc));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "");
        assert_eq!(groups[0].keys[0], FilterKey::new("Method", ["Interview"]));
        // No buttonsOrder entry: values come from the data.
        assert_eq!(groups[0].keys[1], FilterKey::new("Venue", ["CHI", "CSCW"]));
    }

    #[test]
    fn test_empty_descriptor_falls_back_to_default() {
        let empty: OrderingDescriptor = serde_json::from_str("{}").unwrap();
        assert!(!empty.is_well_formed());
        assert_eq!(resolve(&records(), Some(&empty)), resolve(&records(), None));

        let misspelled: OrderingDescriptor = serde_json::from_str(
            r#"{"keys_order": ["Venue"], "buttons_order": {"Venue": ["CHI"]}}"#,
        )
        .unwrap();
        assert_eq!(resolve(&records(), Some(&misspelled)), resolve(&records(), None));

        let hollow_groups: OrderingDescriptor =
            serde_json::from_str(r#"{"groups": [{"name": "Where", "keys": []}]}"#).unwrap();
        assert_eq!(resolve(&records(), Some(&hollow_groups)), resolve(&records(), None));
    }

    #[test]
    fn test_groups_alone_are_well_formed() {
        let desc: OrderingDescriptor =
            serde_json::from_str(r#"{"groups": [{"name": "Where", "keys": ["Venue"]}]}"#).unwrap();
        assert!(desc.is_well_formed());
        let groups = resolve(&records(), Some(&desc));
        assert_eq!(groups[0].name, "Where");
        assert_eq!(groups[0].keys, vec![FilterKey::new("Venue", ["CHI", "CSCW"])]);
    }

    #[test]
    fn test_distinct_values_skips_missing() {
        assert_eq!(distinct_values(&records(), "Method"), vec!["Survey"]);
        assert!(distinct_values(&records(), "Nope").is_empty());
    }

    #[test]
    fn test_filter_keys_flattens_groups() {
        let groups = vec![
            FilterGroup { name: "A".into(), keys: vec![FilterKey::new("x", ["1"])] },
            FilterGroup { name: "B".into(), keys: vec![FilterKey::new("y", ["2"]), FilterKey::new("z", ["3"])] },
        ];
        let keys: Vec<&str> = filter_keys(&groups).map(|k| k.key.as_str()).collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }
}
