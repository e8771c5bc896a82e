use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Reserved display fields
// ---------------------------------------------------------------------------

pub const FIELD_ID: &str = "id";
pub const FIELD_AUTHOR: &str = "Author";
pub const FIELD_YEAR: &str = "Year";
pub const FIELD_PAPER: &str = "Paper";
pub const FIELD_DOI_URL: &str = "DOI_URL";

/// Fields rendered as table columns (or bookkeeping) and never offered as filters.
pub const RESERVED_FIELDS: [&str; 5] = [FIELD_ID, FIELD_AUTHOR, FIELD_YEAR, FIELD_PAPER, FIELD_DOI_URL];

const DOI_PREFIX: &str = "https://doi.org/";
const DOI_DISPLAY_CHARS: usize = 30;

pub fn is_reserved(field: &str) -> bool {
    RESERVED_FIELDS.contains(&field)
}

// ---------------------------------------------------------------------------
// Record – one bibliographic entry
// ---------------------------------------------------------------------------

/// One row of the bibliography: field name → textual value.
///
/// A field that is absent from `fields` is "missing"; it never matches a
/// filter value and sorts as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub fields: BTreeMap<String, String>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of `field`, or `""` when the record lacks it.
    pub fn get_or_empty(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn author(&self) -> &str {
        self.get_or_empty(FIELD_AUTHOR)
    }

    pub fn year(&self) -> &str {
        self.get_or_empty(FIELD_YEAR)
    }

    pub fn paper(&self) -> &str {
        self.get_or_empty(FIELD_PAPER)
    }

    pub fn doi_url(&self) -> &str {
        self.get_or_empty(FIELD_DOI_URL)
    }

    /// Short label for the DOI link: the bare DOI for `doi.org` links,
    /// otherwise a truncated URL.
    pub fn display_doi(&self) -> String {
        let url = self.doi_url();
        match url.strip_prefix(DOI_PREFIX) {
            Some(doi) => doi.to_string(),
            None => {
                let head: String = url.chars().take(DOI_DISPLAY_CHARS).collect();
                format!("{head}...")
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Every field name that occurs in at least one record, sorted.
pub fn field_names(records: &[Record]) -> BTreeSet<&str> {
    records
        .iter()
        .flat_map(|r| r.fields.keys().map(String::as_str))
        .collect()
}

// ---------------------------------------------------------------------------
// Dataset – the immutable loaded record set
// ---------------------------------------------------------------------------

/// The full loaded bibliography. Never mutated after construction; every
/// table view is derived from [`Dataset::all`].
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Read-only view of every record, in load order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
