use std::collections::BTreeSet;

use crate::color::GroupColors;
use crate::data::filter::{disabled_pairs, filtered_indices};
use crate::data::highlight::highlight_pairs;
use crate::data::loader::Loaded;
use crate::data::model::{Dataset, FIELD_AUTHOR};
use crate::data::ordering::{resolve, FilterGroup};
use crate::data::selection::Selection;
use crate::data::sort::sorted_indices;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the records resource has loaded).
    pub dataset: Option<Dataset>,

    /// Filter groups resolved from the ordering descriptor or the data.
    pub groups: Vec<FilterGroup>,

    /// Active filter values.
    pub selection: Selection,

    /// Indices of records passing the selection, in display order (cached).
    pub visible_indices: Vec<usize>,

    /// Buttons that would empty the table if toggled on (cached).
    pub disabled: BTreeSet<(String, String)>,

    /// Buttons describing the hovered row.
    pub highlighted: BTreeSet<(String, String)>,

    /// Highlight accent per filter group.
    pub group_colors: GroupColors,

    /// Column the table is sorted by.
    pub sort_field: String,

    pub sort_ascending: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            groups: Vec::new(),
            selection: Selection::default(),
            visible_indices: Vec::new(),
            disabled: BTreeSet::new(),
            highlighted: BTreeSet::new(),
            group_colors: GroupColors::default(),
            sort_field: FIELD_AUTHOR.to_string(),
            sort_ascending: true,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    pub fn with_sort(field: &str, ascending: bool) -> Self {
        Self {
            sort_field: field.to_string(),
            sort_ascending: ascending,
            ..Self::default()
        }
    }

    /// Ingest freshly loaded resources: resolve filters, reset the selection.
    pub fn set_loaded(&mut self, loaded: Loaded) {
        self.groups = resolve(loaded.dataset.all(), loaded.ordering.as_ref());
        self.group_colors = GroupColors::new(&self.groups);
        log::info!(
            "{} records, {} filter groups ({} ordering)",
            loaded.dataset.len(),
            self.groups.len(),
            if loaded.ordering.is_some() { "descriptor" } else { "default" }
        );

        self.dataset = Some(loaded.dataset);
        self.selection.clear();
        self.highlighted.clear();
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    /// Record a failed records load. Whatever was shown before is dropped,
    /// leaving an empty table under the error message.
    pub fn set_load_error(&mut self, message: String) {
        self.dataset = None;
        self.groups.clear();
        self.group_colors = GroupColors::default();
        self.selection.clear();
        self.visible_indices.clear();
        self.disabled.clear();
        self.highlighted.clear();
        self.status_message = Some(message);
        self.loading = false;
    }

    /// Recompute `visible_indices` and `disabled` after a selection or sort change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.disabled.clear();
            return;
        };
        let records = ds.all();
        let matching = filtered_indices(records, &self.selection);
        self.visible_indices = sorted_indices(records, &matching, &self.sort_field, self.sort_ascending);
        self.disabled = disabled_pairs(records, &self.selection, &self.groups);
        log::debug!(
            "Selection {:?}: {} of {} records visible",
            self.selection,
            self.visible_indices.len(),
            records.len()
        );
    }

    /// Toggle a single filter value.
    pub fn toggle_filter_value(&mut self, key: &str, value: &str) {
        self.selection.toggle(key, value);
        self.refilter();
    }

    /// Deselect every value of a key.
    pub fn clear_key(&mut self, key: &str) {
        self.selection.clear_key(key);
        self.refilter();
    }

    /// Deselect everything.
    pub fn clear_all(&mut self) {
        self.selection.clear();
        self.refilter();
    }

    /// Sort by `field`; picking the current field again flips the direction.
    pub fn sort_by(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
        self.refilter();
    }

    /// Highlight the buttons of visible row `row`, or clear with `None`.
    pub fn hover_row(&mut self, row: Option<usize>) {
        self.highlighted = match (&self.dataset, row.and_then(|r| self.visible_indices.get(r))) {
            (Some(ds), Some(&idx)) => highlight_pairs(&ds.all()[idx], &self.groups),
            _ => BTreeSet::new(),
        };
    }

    pub fn is_disabled(&self, key: &str, value: &str) -> bool {
        self.disabled.contains(&(key.to_string(), value.to_string()))
    }

    pub fn is_highlighted(&self, key: &str, value: &str) -> bool {
        self.highlighted.contains(&(key.to_string(), value.to_string()))
    }
}
