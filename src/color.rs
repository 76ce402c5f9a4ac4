use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::LaunchOutcome;

// ---------------------------------------------------------------------------
// Fixed outcome colours
// ---------------------------------------------------------------------------

/// CSS `green`.
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x00, 0x80, 0x00);
/// CSS `red`.
pub const FAILURE_COLOR: Color32 = Color32::from_rgb(0xFF, 0x00, 0x00);

pub fn outcome_color(outcome: LaunchOutcome) -> Color32 {
    match outcome {
        LaunchOutcome::Success => SUCCESS_COLOR,
        LaunchOutcome::Failure => FAILURE_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Booster category → Color32
// ---------------------------------------------------------------------------

/// Maps booster version categories to distinct colours for the scatter chart.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
}

impl CategoryColors {
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories.iter().cloned().zip(palette).collect();
        CategoryColors { mapping }
    }

    /// Unknown categories fall back to grey.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping.get(category).copied().unwrap_or(Color32::GRAY)
    }

    pub fn legend_entries(&self) -> Vec<(&str, Color32)> {
        self.mapping
            .iter()
            .map(|(c, color)| (c.as_str(), *color))
            .collect()
    }
}
