use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{FIELD_AUTHOR, FIELD_DOI_URL, FIELD_PAPER, FIELD_YEAR};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 22.0;
const HEADER_HEIGHT: f32 = 24.0;

// ---------------------------------------------------------------------------
// Papers table (central panel)
// ---------------------------------------------------------------------------

/// Render the visible papers. Hovering a row highlights its filter buttons;
/// clicking a header sorts by that column.
pub fn papers_table(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let text = if state.loading {
                "Loading papers…"
            } else {
                "No papers loaded  (File → Open data…)"
            };
            ui.heading(text);
        });
        return;
    };

    if state.visible_indices.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No papers match the selected filters.");
        });
        if !state.highlighted.is_empty() {
            state.hover_row(None);
        }
        return;
    }

    let mut sort_clicked: Option<&str> = None;
    let mut hovered_row: Option<usize> = None;
    let records = dataset.all();
    let visible = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::initial(180.0).at_least(80.0))
        .column(Column::initial(60.0).at_least(50.0))
        .column(Column::remainder().at_least(200.0).clip(true))
        .column(Column::initial(220.0).at_least(80.0))
        .header(HEADER_HEIGHT, |mut header| {
            for field in [FIELD_AUTHOR, FIELD_YEAR, FIELD_PAPER, FIELD_DOI_URL] {
                header.col(|ui: &mut Ui| {
                    let arrow = match (state.sort_field == field, state.sort_ascending) {
                        (true, true) => " ⏶",
                        (true, false) => " ⏷",
                        _ => "",
                    };
                    if ui.button(RichText::new(format!("{field}{arrow}")).strong()).clicked() {
                        sort_clicked = Some(field);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, visible.len(), |mut row| {
                let rec = &records[visible[row.index()]];
                let row_index = row.index();
                let mut hovered = false;

                hovered |= row.col(|ui: &mut Ui| {
                    ui.label(rec.author());
                }).1.hovered();
                hovered |= row.col(|ui: &mut Ui| {
                    ui.label(rec.year());
                }).1.hovered();
                hovered |= row.col(|ui: &mut Ui| {
                    ui.label(rec.paper());
                }).1.hovered();
                hovered |= row.col(|ui: &mut Ui| {
                    ui.add(egui::Hyperlink::from_label_and_url(rec.display_doi(), rec.doi_url()).open_in_new_tab(true));
                }).1.hovered();

                if hovered {
                    hovered_row = Some(row_index);
                }
            });
        });

    if let Some(field) = sort_clicked {
        state.sort_by(field);
    }
    state.hover_row(hovered_row);
}
