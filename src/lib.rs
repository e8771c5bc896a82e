//! Filterable bibliography table.
//!
//! The [`data`] module holds the pure query engine (filter, predictive
//! disabling, sort, ordering resolution); [`state`] keeps the current
//! selection and derived views; [`app`] and [`ui`] render them with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
