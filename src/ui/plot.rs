use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{outcome_color, CategoryColors};
use crate::data::views::{OutcomeFigure, PayloadFigure};

/// Arc segments per convex sub-wedge.
const ARC_SEGMENTS: usize = 12;

fn chart_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(title);
    });
}

fn empty_chart(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(message).weak());
    });
}

// ---------------------------------------------------------------------------
// Outcome pie chart
// ---------------------------------------------------------------------------

/// Outline of the wedge from `start` to `end` (radians), split into convex
/// pieces no wider than an eighth of a turn so the plot can fill them.
pub fn wedge_polygons(start: f64, end: f64, radius: f64) -> Vec<Vec<[f64; 2]>> {
    let sweep = end - start;
    if sweep.abs() <= f64::EPSILON {
        return Vec::new();
    }
    let pieces = (sweep.abs() / FRAC_PI_4 - 1e-9).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;

    (0..pieces)
        .map(|p| {
            let a0 = start + step * p as f64;
            let mut outline = Vec::with_capacity(ARC_SEGMENTS + 2);
            outline.push([0.0, 0.0]);
            for s in 0..=ARC_SEGMENTS {
                let a = a0 + step * s as f64 / ARC_SEGMENTS as f64;
                outline.push([radius * a.cos(), radius * a.sin()]);
            }
            outline
        })
        .collect()
}

/// Render the success/failure pie. Slices run clockwise from twelve o'clock.
pub fn outcome_pie(ui: &mut Ui, figure: &OutcomeFigure) {
    chart_title(ui, &figure.title);

    if figure.slices.is_empty() {
        empty_chart(ui, "No launches match this site.");
        return;
    }

    Plot::new("success_pie_chart")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            let mut angle = FRAC_PI_2;
            for slice in &figure.slices {
                let end = angle - slice.fraction * TAU;
                let color = outcome_color(slice.outcome);
                let name = format!("{} – {}", slice.outcome, slice.count);

                for outline in wedge_polygons(angle, end, 1.0) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(outline))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = (angle + end) / 2.0;
                let label_radius = if figure.slices.len() == 1 { 0.0 } else { 0.6 };
                plot_ui.text(Text::new(
                    PlotPoint::new(label_radius * mid.cos(), label_radius * mid.sin()),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));

                angle = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Payload vs outcome scatter chart
// ---------------------------------------------------------------------------

/// Render payload against outcome, one colour per booster category.
pub fn payload_scatter(ui: &mut Ui, figure: &PayloadFigure, colors: &CategoryColors) {
    chart_title(ui, &figure.title);

    if figure.series.is_empty() {
        empty_chart(ui, "No launches in this payload range.");
        return;
    }

    Plot::new("success_payload_scatter_chart")
        .legend(Legend::default())
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\npayload = {:.0} kg\nclass = {:.0}", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for series in &figure.series {
                plot_ui.points(
                    Points::new(PlotPoints::from(series.points.clone()))
                        .name(&series.booster_version_category)
                        .color(colors.color_for(&series.booster_version_category))
                        .shape(MarkerShape::Circle)
                        .radius(5.0)
                        .filled(true),
                );
            }
        });
}
