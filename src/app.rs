use eframe::egui::{self, Ui};
use egui_extras::{Size, StripBuilder};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashboardApp {
    pub state: AppState,
    pub config: DashboardConfig,
}

impl LaunchDashboardApp {
    /// Load the configured data file once; a failure leaves the dashboard
    /// empty with the error in the status line.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::default();
        if config.data_path.exists() {
            state.load_path(&config.data_path);
        } else {
            log::warn!(
                "{} not found, open a launch table with File → Open…",
                config.data_path.display()
            );
            state.status_message = Some(format!("{} not found", config.data_path.display()));
        }
        Self { state, config }
    }
}

impl eframe::App for LaunchDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dropdown + slider ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.config);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading("SpaceX Launch Records Dashboard");
            });
            ui.separator();

            let (Some(outcome), Some(payload)) = (&self.state.outcome, &self.state.payload)
            else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a launch table to begin  (File → Open…)");
                });
                return;
            };

            StripBuilder::new(ui)
                .size(Size::relative(0.45))
                .size(Size::remainder())
                .vertical(|mut strip| {
                    strip.cell(|ui| plot::outcome_pie(ui, outcome));
                    strip.cell(|ui| {
                        plot::payload_scatter(ui, payload, &self.state.booster_colors)
                    });
                });
        });
    }
}
