use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::DashboardConfig;
use crate::data::filter::{slider_marks, PayloadRange, SiteSelection};
use crate::data::model::LaunchOutcome;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dropdown and payload slider
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) {
    ui.heading("Controls");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state below.
    let sites = dataset.launch_sites.clone();
    let bounds = dataset.payload_bounds;

    // ---- Launch site dropdown ----
    ui.strong("Launch Site");
    let mut selected = state.site.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected.label().to_owned())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, SiteSelection::All, SiteSelection::ALL_LABEL);
            for site in &sites {
                ui.selectable_value(&mut selected, SiteSelection::Site(site.clone()), site);
            }
        });
    state.select_site(selected);

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range slider ----
    ui.strong("Payload range (kg)");
    let Some(bounds) = bounds else {
        ui.label(RichText::new("Select a launch site").weak());
        return;
    };

    let PayloadRange { mut min, mut max } = state.payload_range;
    let min_changed = ui
        .add(
            egui::Slider::new(&mut min, bounds.min..=bounds.max)
                .step_by(config.payload_step)
                .text("min"),
        )
        .changed();
    let max_changed = ui
        .add(
            egui::Slider::new(&mut max, bounds.min..=bounds.max)
                .step_by(config.payload_step)
                .text("max"),
        )
        .changed();

    // Dragging one handle past the other pushes it along.
    if min_changed && min > max {
        max = min;
    }
    if max_changed && max < min {
        min = max;
    }
    if min_changed || max_changed {
        let range = PayloadRange::new(min, max).snapped_to_top(bounds, config.payload_step);
        state.set_payload_range(range);
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for mark in slider_marks(bounds, config.mark_interval) {
            ui.label(RichText::new(format!("{mark:.0}")).small().weak());
        }
    });

    if ui.small_button("Full range").clicked() {
        state.reset_payload_range();
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Booster colour key ----
    ui.strong("Booster Version Category");
    for (category, color) in state.booster_colors.legend_entries() {
        ui.label(RichText::new(format!("● {category}")).color(color));
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
            let can_export = state.snapshot().is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export view…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(outcome), Some(payload)) =
            (&state.dataset, &state.outcome, &state.payload)
        {
            ui.label(format!(
                "{} launches loaded, {}/{} successful at {}, {} in payload range",
                ds.len(),
                outcome.count_of(LaunchOutcome::Success),
                outcome.total,
                state.site,
                payload.point_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export current view")
        .add_filter("JSON", &["json"])
        .set_file_name("launch_view.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_to(&path) {
            log::error!("Failed to export view: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
