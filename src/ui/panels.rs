use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::kde::BandwidthRule;
use crate::state::{AppState, PitcherView};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.context.is_none() {
        ui.label("No pitch file loaded.");
        return;
    }

    // Collect choices first; selection recomputes views and needs `&mut state`.
    let mut picked_pitcher: Option<String> = None;
    let mut picked_type: Option<String> = None;
    let mut picked_rule: Option<BandwidthRule> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Pitcher ----
            ui.strong("Select a Pitcher");
            let current = state.selected_pitcher().unwrap_or_default().to_string();
            egui::ComboBox::from_id_salt("pitcher")
                .selected_text(&current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for pitcher in &state.pitchers {
                        if ui.selectable_label(current == *pitcher, pitcher).clicked() {
                            picked_pitcher = Some(pitcher.clone());
                        }
                    }
                });
            ui.add_space(6.0);

            // ---- Pitch type ----
            ui.strong("Select a TaggedPitchType");
            let current = state.selected_pitch_type().unwrap_or_default().to_string();
            let pitch_types = state
                .pitcher_view
                .as_ref()
                .map(|v| v.pitch_types.as_slice())
                .unwrap_or_default();
            let colors = state.context.as_ref().map(|ctx| &ctx.colors);
            egui::ComboBox::from_id_salt("pitch_type")
                .selected_text(&current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for pitch_type in pitch_types {
                        let mut text = RichText::new(pitch_type);
                        if let Some(c) = colors.and_then(|m| m.lookup(pitch_type)) {
                            text = text.color(c);
                        }
                        if ui.selectable_label(current == *pitch_type, text).clicked() {
                            picked_type = Some(pitch_type.clone());
                        }
                    }
                });
            ui.separator();

            // ---- Density bandwidth ----
            ui.strong("KDE bandwidth");
            ui.horizontal(|ui: &mut Ui| {
                for rule in BandwidthRule::ALL {
                    if ui
                        .selectable_label(state.density.bandwidth == rule, rule.label())
                        .clicked()
                    {
                        picked_rule = Some(rule);
                    }
                }
            });
        });

    if let Some(pitcher) = picked_pitcher {
        state.select_pitcher(&pitcher);
    }
    if let Some(pitch_type) = picked_type {
        state.select_pitch_type(&pitch_type);
    }
    if let Some(rule) = picked_rule {
        state.set_bandwidth(rule);
    }
}

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

/// Release-angle means and standard deviations per pitch type.
pub fn summary_table(ui: &mut Ui, view: &PitcherView) {
    if view.summaries.is_empty() {
        return;
    }

    ui.push_id("summary_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(110.0))
            .columns(Column::auto().at_least(70.0), 5)
            .header(20.0, |mut header| {
                for title in ["Pitch type", "N", "Horz mean", "Vert mean", "Horz SD", "Vert SD"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for s in &view.summaries {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(&s.pitch_type);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(s.count.to_string());
                        });
                        for value in [s.horizontal.mean, s.vertical.mean, s.horizontal.std, s.vertical.std] {
                            row.col(|ui: &mut Ui| {
                                ui.label(format_stat(value));
                            });
                        }
                    });
                }
            });
    });
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "–".to_string()
    } else {
        format!("{value:.2}")
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ctx) = &state.context {
            ui.label(format!(
                "{}: {} pitches loaded, {} dropped, {} pitchers",
                ctx.source.display(),
                ctx.table.len(),
                ctx.table.dropped_rows(),
                state.pitchers.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open pitch data")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json", "parquet", "pq"])
        .add_filter("CSV / TSV", &["csv", "tsv", "tab"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_statistics_render_as_dash() {
        assert_eq!(format_stat(f64::NAN), "–");
        assert_eq!(format_stat(1.581_138), "1.58");
    }
}
