use std::path::Path;

use anyhow::{Context, Result};

use crate::color::CategoryColors;
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::loader::load_file;
use crate::data::model::LaunchDataset;
use crate::data::views::{
    outcome_distribution, payload_correlation, DashboardSnapshot, OutcomeFigure, PayloadFigure,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub dataset: Option<LaunchDataset>,

    /// Dropdown value.
    pub site: SiteSelection,

    /// Slider value.
    pub payload_range: PayloadRange,

    /// Pie chart for the current site (cached).
    pub outcome: Option<OutcomeFigure>,

    /// Scatter chart for the current site and range (cached).
    pub payload: Option<PayloadFigure>,

    /// Colour per booster version category.
    pub booster_colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load a file and ingest it, or record the error for the status line.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the controls to show everything.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        if dataset.is_empty() {
            log::warn!("Loaded launch table has no rows");
        }
        self.site = SiteSelection::All;
        self.payload_range = dataset.payload_bounds.unwrap_or_default();
        self.booster_colors = CategoryColors::new(&dataset.booster_categories);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Change the dropdown value. No-op when unchanged.
    pub fn select_site(&mut self, site: SiteSelection) {
        if self.site != site {
            self.site = site;
            self.recompute();
        }
    }

    /// Change the slider value, clamped to the dataset bounds.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        let range = match self.dataset.as_ref().and_then(|ds| ds.payload_bounds) {
            Some(bounds) => range.clamped_to(bounds),
            None => range,
        };
        if self.payload_range != range {
            self.payload_range = range;
            self.recompute_payload();
        }
    }

    /// Back to the full dataset min..max.
    pub fn reset_payload_range(&mut self) {
        if let Some(bounds) = self.dataset.as_ref().and_then(|ds| ds.payload_bounds) {
            self.set_payload_range(bounds);
        }
    }

    /// Recompute both figures.
    pub fn recompute(&mut self) {
        if let Some(ds) = &self.dataset {
            let outcome = outcome_distribution(ds, &self.site);
            log::debug!("Outcome view for {}: {} launches", self.site, outcome.total);
            self.outcome = Some(outcome);
        }
        self.recompute_payload();
    }

    fn recompute_payload(&mut self) {
        if let Some(ds) = &self.dataset {
            let payload = payload_correlation(ds, &self.site, self.payload_range);
            log::debug!(
                "Payload view for {} in {:.0}..={:.0} kg: {} points",
                self.site,
                self.payload_range.min,
                self.payload_range.max,
                payload.point_count()
            );
            self.payload = Some(payload);
        }
    }

    /// Current controls and figures, if a dataset is loaded.
    pub fn snapshot(&self) -> Option<DashboardSnapshot<'_>> {
        Some(DashboardSnapshot {
            site: &self.site,
            payload_range: self.payload_range,
            outcome: self.outcome.as_ref()?,
            payload: self.payload.as_ref()?,
        })
    }

    /// Write the current snapshot as pretty JSON.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        let snapshot = self.snapshot().context("no dataset loaded")?;
        let json = snapshot.to_json().context("serializing view")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported current view to {}", path.display());
        Ok(())
    }
}
