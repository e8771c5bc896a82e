use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

/// A resource the user picked from the File menu.
pub enum SourceChange {
    Records(PathBuf),
    Ordering(PathBuf),
    /// Drop the ordering descriptor and derive filters from the data.
    DefaultOrdering,
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState) -> Option<SourceChange> {
    let mut change = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data…").clicked() {
                change = pick_records_file().map(SourceChange::Records);
                ui.close_menu();
            }
            if ui.button("Open ordering…").clicked() {
                change = pick_ordering_file().map(SourceChange::Ordering);
                ui.close_menu();
            }
            if ui.button("Use default ordering").clicked() {
                change = Some(SourceChange::DefaultOrdering);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} papers loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        } else if state.loading {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    change
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn pick_records_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open bibliography")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

fn pick_ordering_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open filter ordering")
        .add_filter("JSON", &["json"])
        .pick_file()
}
