use eframe::egui::{self, Button, RichText, ScrollArea, Sense, Stroke, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Filter panel – grouped toggle buttons
// ---------------------------------------------------------------------------

enum FilterAction {
    Toggle(String, String),
    ClearKey(String),
    ClearAll,
}

/// Render the filter groups. Clicking a key label clears that key.
pub fn filter_panel(ui: &mut Ui, state: &mut AppState) {
    let mut action = None;

    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Filters");
        if !state.selection.is_empty() && ui.small_button("Clear all").clicked() {
            action = Some(FilterAction::ClearAll);
        }
    });
    ui.separator();

    if state.dataset.is_none() {
        ui.label(if state.loading { "Loading…" } else { "No dataset loaded." });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (gi, group) in state.groups.iter().enumerate() {
                let accent = state.group_colors.color_for(gi);
                if !group.name.is_empty() {
                    ui.add_space(6.0);
                    ui.label(RichText::new(&group.name).heading().color(accent));
                }

                for fk in &group.keys {
                    ui.horizontal_wrapped(|ui: &mut Ui| {
                        let n_active = state.selection.values(&fk.key).map_or(0, |v| v.len());
                        let label = if n_active > 0 {
                            format!("{} ({n_active})", fk.key)
                        } else {
                            fk.key.clone()
                        };
                        let key_label = ui
                            .add(egui::Label::new(RichText::new(label).strong()).sense(Sense::click()))
                            .on_hover_text("Click to clear");
                        if key_label.clicked() {
                            action = Some(FilterAction::ClearKey(fk.key.clone()));
                        }

                        for value in &fk.values {
                            let mut button = Button::new(value.as_str())
                                .selected(state.selection.is_active(&fk.key, value));
                            if state.is_highlighted(&fk.key, value) {
                                button = button.stroke(Stroke::new(2.0, accent));
                            }
                            let enabled = !state.is_disabled(&fk.key, value);
                            if ui.add_enabled(enabled, button).clicked() {
                                action = Some(FilterAction::Toggle(fk.key.clone(), value.clone()));
                            }
                        }
                    });
                }
                ui.separator();
            }
        });

    match action {
        Some(FilterAction::Toggle(key, value)) => state.toggle_filter_value(&key, &value),
        Some(FilterAction::ClearKey(key)) => state.clear_key(&key),
        Some(FilterAction::ClearAll) => state.clear_all(),
        None => {}
    }
}
