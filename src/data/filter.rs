use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Site selection: the dropdown value
// ---------------------------------------------------------------------------

/// Dropdown value: every site, or one site by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub const ALL_LABEL: &'static str = "All Sites";

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => Self::ALL_LABEL,
            SiteSelection::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Payload range: the slider value
// ---------------------------------------------------------------------------

/// Inclusive payload range in kilograms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub min: f64,
    pub max: f64,
}

impl PayloadRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, payload: f64) -> bool {
        self.min <= payload && payload <= self.max
    }

    /// Clamp both ends into `bounds`, keeping `min <= max`.
    /// Slider input goes through this; the views accept any range as-is.
    pub fn clamped_to(&self, bounds: PayloadRange) -> Self {
        let min = self.min.clamp(bounds.min, bounds.max);
        let max = self.max.clamp(bounds.min, bounds.max);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Slider stops are counted from `bounds.min`, so the top stop can fall
    /// short of `bounds.max`. Ends within one `step` of the top snap to it.
    pub fn snapped_to_top(&self, bounds: PayloadRange, step: f64) -> Self {
        let snap = |v: f64| if v > bounds.max - step { bounds.max } else { v };
        Self {
            min: snap(self.min),
            max: snap(self.max),
        }
    }
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Indices of records matching the site selection.
pub fn site_indices(dataset: &LaunchDataset, site: &SiteSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| site.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of records whose payload lies in `range`, further restricted to
/// the selected site unless every site is selected.
pub fn payload_indices(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg))
        .filter(|(_, rec)| site.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Slider tick marks: every `interval` kg from the floored minimum up to,
/// but not including, the floored maximum.
pub fn slider_marks(bounds: PayloadRange, interval: f64) -> Vec<f64> {
    if interval <= 0.0 {
        return Vec::new();
    }
    let start = bounds.min.floor();
    let end = bounds.max.floor();
    let mut marks = Vec::new();
    let mut mark = start;
    while mark < end {
        marks.push(mark);
        mark += interval;
    }
    marks
}
