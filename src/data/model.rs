use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::LoadError;
use super::filter::PayloadRange;

/// Source column names, as written by the upstream data-preparation notebook.
pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// LaunchOutcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Outcome of a single launch attempt. Ordered like the raw class value so
/// grouping yields failure (0) before success (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum LaunchOutcome {
    Failure,
    Success,
}

impl LaunchOutcome {
    /// The raw `class` value.
    pub fn class(self) -> i64 {
        match self {
            LaunchOutcome::Failure => 0,
            LaunchOutcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LaunchOutcome::Failure => "Failure",
            LaunchOutcome::Success => "Success",
        }
    }
}

impl TryFrom<i64> for LaunchOutcome {
    type Error = LoadError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            0 => Ok(LaunchOutcome::Failure),
            1 => Ok(LaunchOutcome::Success),
            other => Err(LoadError::InvalidOutcome(other)),
        }
    }
}

impl From<LaunchOutcome> for i64 {
    fn from(outcome: LaunchOutcome) -> Self {
        outcome.class()
    }
}

impl fmt::Display for LaunchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch attempt. Columns not listed here are ignored on load.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub outcome: LaunchOutcome,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded launch table with indices derived once at load time.
/// Never mutated after construction.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    pub records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    pub launch_sites: Vec<String>,
    /// Distinct booster version categories, sorted.
    pub booster_categories: BTreeSet<String>,
    /// Minimum and maximum payload; `None` for an empty table.
    pub payload_bounds: Option<PayloadRange>,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut launch_sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_bounds: Option<PayloadRange> = None;

        for rec in &records {
            if !launch_sites.iter().any(|s| *s == rec.launch_site) {
                launch_sites.push(rec.launch_site.clone());
            }
            booster_categories.insert(rec.booster_version_category.clone());

            // Non-finite payloads never widen the slider bounds.
            let p = rec.payload_mass_kg;
            if !p.is_finite() {
                continue;
            }
            payload_bounds = Some(match payload_bounds {
                None => PayloadRange::new(p, p),
                Some(b) => PayloadRange::new(b.min.min(p), b.max.max(p)),
            });
        }

        LaunchDataset {
            records,
            launch_sites,
            booster_categories,
            payload_bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::launches;
    use super::*;
    use crate::data::loader::load_csv_reader;

    #[test]
    fn sites_keep_first_appearance_order() {
        let ds = launches();
        assert_eq!(
            ds.launch_sites,
            vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
    }

    #[test]
    fn payload_bounds_cover_every_row() {
        let ds = launches();
        let bounds = ds.payload_bounds.unwrap();
        assert_eq!(bounds.min, 0.0);
        assert_eq!(bounds.max, 15600.0);
        assert!(ds.records.iter().all(|r| bounds.contains(r.payload_mass_kg)));
    }

    #[test]
    fn booster_categories_are_sorted_and_distinct() {
        let ds = launches();
        let cats: Vec<&str> = ds.booster_categories.iter().map(String::as_str).collect();
        assert_eq!(cats, vec!["B4", "B5", "FT", "v1.0", "v1.1"]);
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.payload_bounds.is_none());
        assert!(ds.launch_sites.is_empty());
    }

    #[test]
    fn non_finite_payloads_are_left_out_of_bounds() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
                   A,NaN,1,FT\n\
                   A,2500,0,FT\n\
                   B,NaN,1,B5\n";
        let ds = load_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.launch_sites, vec!["A", "B"]);
        assert_eq!(ds.payload_bounds, Some(PayloadRange::new(2500.0, 2500.0)));

        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,NaN,1,FT\n";
        let ds = load_csv_reader(csv.as_bytes()).unwrap();
        assert!(ds.payload_bounds.is_none());
    }

    #[test]
    fn outcome_only_accepts_binary_class() {
        assert_eq!(LaunchOutcome::try_from(1).unwrap(), LaunchOutcome::Success);
        assert_eq!(LaunchOutcome::try_from(0).unwrap(), LaunchOutcome::Failure);
        assert!(matches!(
            LaunchOutcome::try_from(2),
            Err(LoadError::InvalidOutcome(2))
        ));
    }
}
