use std::cmp::Ordering;

use super::model::{Record, FIELD_YEAR};

// ---------------------------------------------------------------------------
// Per-field comparison semantics
// ---------------------------------------------------------------------------

/// How values of a field are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Leading integer of the value; unparsable values rank first.
    Numeric,
    /// Lowercased text.
    CaseInsensitive,
}

impl SortField {
    pub fn for_field(field: &str) -> Self {
        if field == FIELD_YEAR {
            SortField::Numeric
        } else {
            SortField::CaseInsensitive
        }
    }

    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            SortField::Numeric => parse_leading_int(a).cmp(&parse_leading_int(b)),
            SortField::CaseInsensitive => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

/// Integer formed by the optional sign and digits at the start of `s`
/// (after leading whitespace). `"2020a"` → 2020, `"n.d."` → `None`.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let digits_start = usize::from(s.starts_with(['+', '-']));
    let end = s[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + digits_start);
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Indices of `indices` reordered by `field`.
///
/// Stable: equal keys keep their relative order in either direction.
pub fn sorted_indices(records: &[Record], indices: &[usize], field: &str, ascending: bool) -> Vec<usize> {
    let semantic = SortField::for_field(field);
    let mut out = indices.to_vec();
    out.sort_by(|&a, &b| {
        let ord = semantic.compare(records[a].get_or_empty(field), records[b].get_or_empty(field));
        if ascending { ord } else { ord.reverse() }
    });
    out
}

/// A new sequence of `records` ordered by `field`; the input is untouched.
pub fn sort<'a>(records: &[&'a Record], field: &str, ascending: bool) -> Vec<&'a Record> {
    let semantic = SortField::for_field(field);
    let mut out = records.to_vec();
    out.sort_by(|a, b| {
        let ord = semantic.compare(a.get_or_empty(field), b.get_or_empty(field));
        if ascending { ord } else { ord.reverse() }
    });
    out
}
