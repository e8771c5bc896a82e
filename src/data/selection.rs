use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Selection: which values are active per filter key
// ---------------------------------------------------------------------------

/// Active filter constraints: key → non-empty set of accepted values.
///
/// A key that is absent imposes no constraint. Empty value sets are never
/// stored, so "cleared" and "never touched" are the same state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    active: BTreeMap<String, BTreeSet<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no key is constrained.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn is_active(&self, key: &str, value: &str) -> bool {
        self.active.get(key).is_some_and(|vals| vals.contains(value))
    }

    /// Accepted values for `key`, or `None` when the key is unconstrained.
    pub fn values(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.active.get(key)
    }

    /// Iterate constrained keys with their accepted values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.active.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.active
            .entry(key.to_string())
            .or_default()
            .insert(value.to_string());
    }

    pub fn remove(&mut self, key: &str, value: &str) {
        if let Some(vals) = self.active.get_mut(key) {
            vals.remove(value);
            if vals.is_empty() {
                self.active.remove(key);
            }
        }
    }

    /// Flip membership of `value` under `key`.
    pub fn toggle(&mut self, key: &str, value: &str) {
        if self.is_active(key, value) {
            self.remove(key, value);
        } else {
            self.insert(key, value);
        }
    }

    /// Copy of this selection with `value` under `key` flipped.
    pub fn toggled(&self, key: &str, value: &str) -> Selection {
        let mut next = self.clone();
        next.toggle(key, value);
        next
    }

    /// Drop every active value for `key`.
    pub fn clear_key(&mut self, key: &str) {
        self.active.remove(key);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

impl<K, V> FromIterator<(K, V)> for Selection
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut sel = Selection::new();
        for (k, v) in iter {
            sel.insert(k.as_ref(), v.as_ref());
        }
        sel
    }
}
