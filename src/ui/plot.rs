use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points, Polygon};

use crate::analysis::comparison::DensityComparison;
use crate::color::{with_alpha, PitchColorMap, ELLIPSE_FILL_ALPHA, REST_OF_ARSENAL_COLOR};
use crate::data::model::AngleFeature;
use crate::state::{AppState, PitchTypeView, PitcherView};

const DENSITY_PLOT_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the ellipse chart, the summary table and the density charts.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let (Some(ctx), Some(view)) = (&state.context, &state.pitcher_view) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a pitch file to begin  (File → Open…)");
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("Pitch Movement Ellipses for {}", view.pitcher));
            ellipse_plot(ui, view, &ctx.colors, state.ellipse_segments);
            ui.add_space(8.0);
            super::panels::summary_table(ui, view);
            ui.add_space(12.0);

            ui.heading(format!("KDE Analysis for {}", view.pitcher));
            match &state.pitch_type_view {
                Some(densities) => density_grid(ui, densities, &ctx.colors),
                None => {
                    ui.label("No pitches for this pitcher.");
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Movement ellipses
// ---------------------------------------------------------------------------

/// 1-SD release-angle ellipses with centroid markers, one per known pitch type.
pub fn ellipse_plot(ui: &mut Ui, view: &PitcherView, colors: &PitchColorMap, segments: usize) {
    Plot::new("ellipse_plot")
        .legend(Legend::default())
        .height(420.0)
        .x_axis_label(AngleFeature::HorzRelAngle.label())
        .y_axis_label(AngleFeature::VertRelAngle.label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ellipse in &view.ellipses {
                let color = colors.color_for(ellipse.pitch_type);
                let name = ellipse.pitch_type.label();

                let outline: PlotPoints = ellipse.outline(segments).into();
                plot_ui.polygon(
                    Polygon::new(outline)
                        .name(name)
                        .fill_color(with_alpha(color, ELLIPSE_FILL_ALPHA))
                        .stroke(Stroke::new(1.5, color)),
                );

                plot_ui.points(
                    Points::new(vec![ellipse.center])
                        .name(format!("{name} (Mean)"))
                        .color(color)
                        .radius(6.0)
                        .filled(true),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Density comparisons
// ---------------------------------------------------------------------------

fn density_grid(ui: &mut Ui, view: &PitchTypeView, colors: &PitchColorMap) {
    ui.label(format!(
        "{}: {} pitches vs {} in the rest of the arsenal",
        view.pitch_type, view.selected_count, view.rest_count
    ));

    for pair in view.comparisons.chunks(2) {
        ui.columns(2, |cols: &mut [Ui]| {
            for (col, comparison) in cols.iter_mut().zip(pair) {
                col.strong(format!("{} Density Comparison", comparison.feature));
                density_plot(col, view, comparison, colors);
            }
        });
        ui.add_space(8.0);
    }
}

/// Selected pitch type (solid, its colour) against the rest (grey, dashed).
fn density_plot(
    ui: &mut Ui,
    view: &PitchTypeView,
    comparison: &DensityComparison,
    colors: &PitchColorMap,
) {
    let selected_color = colors.color_or_default(&view.pitch_type);

    Plot::new(format!("density_{}", comparison.feature.column()))
        .legend(Legend::default())
        .height(DENSITY_PLOT_HEIGHT)
        .x_axis_label(comparison.feature.column())
        .y_axis_label("Density")
        .show(ui, |plot_ui| {
            if let Some(curve) = &comparison.selected {
                plot_ui.line(
                    Line::new(PlotPoints::from(curve.points.clone()))
                        .name(&view.pitch_type)
                        .color(selected_color)
                        .width(2.0),
                );
            }
            if let Some(curve) = &comparison.rest {
                plot_ui.line(
                    Line::new(PlotPoints::from(curve.points.clone()))
                        .name("Rest of Arsenal")
                        .color(REST_OF_ARSENAL_COLOR)
                        .style(LineStyle::dashed_loose())
                        .width(2.0),
                );
            }
        });

    if comparison.selected.is_none() && comparison.rest.is_none() {
        ui.label(RichText::new("Not enough pitches for a density estimate").color(Color32::GRAY));
    }
}
