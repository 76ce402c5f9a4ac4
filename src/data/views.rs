//! Chart descriptions recomputed whenever a control changes.
//!
//! Both functions are pure: they read the dataset and the current control
//! values and return a plain-data figure. The UI layer renders figures and
//! the export writes them out as JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::{payload_indices, site_indices, PayloadRange, SiteSelection};
use super::model::{LaunchDataset, LaunchOutcome};

// ---------------------------------------------------------------------------
// Outcome distribution (pie chart)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeSlice {
    pub outcome: LaunchOutcome,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeFigure {
    pub title: String,
    /// Only outcomes that occur, failure before success.
    pub slices: Vec<OutcomeSlice>,
    pub total: usize,
}

impl OutcomeFigure {
    pub fn count_of(&self, outcome: LaunchOutcome) -> usize {
        self.slices
            .iter()
            .find(|s| s.outcome == outcome)
            .map_or(0, |s| s.count)
    }
}

/// Group the selected site's launches (or all launches) by outcome and count.
pub fn outcome_distribution(dataset: &LaunchDataset, site: &SiteSelection) -> OutcomeFigure {
    let title = match site {
        SiteSelection::All => "Total Success Launches Across All Sites".to_string(),
        SiteSelection::Site(name) => format!("Success vs Failed Launches for {name}"),
    };

    let mut counts: BTreeMap<LaunchOutcome, usize> = BTreeMap::new();
    for i in site_indices(dataset, site) {
        *counts.entry(dataset.records[i].outcome).or_default() += 1;
    }

    let total: usize = counts.values().sum();
    let slices = counts
        .into_iter()
        .map(|(outcome, count)| OutcomeSlice {
            outcome,
            count,
            fraction: count as f64 / total as f64,
        })
        .collect();

    OutcomeFigure {
        title,
        slices,
        total,
    }
}

// ---------------------------------------------------------------------------
// Payload correlation (scatter chart)
// ---------------------------------------------------------------------------

/// Points of one booster version category, as `[payload_kg, class]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub booster_version_category: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// One series per booster category present in the filtered rows, by name.
    pub series: Vec<ScatterSeries>,
}

impl PayloadFigure {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Payload against outcome for launches inside `range`, restricted to the
/// selected site unless every site is selected.
pub fn payload_correlation(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> PayloadFigure {
    let title = match site {
        SiteSelection::All => {
            "Correlation Between Payload and Launch Outcome for All Sites".to_string()
        }
        SiteSelection::Site(name) => format!("Payload vs Launch Outcome for {name}"),
    };

    let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for i in payload_indices(dataset, site, range) {
        let rec = &dataset.records[i];
        by_category
            .entry(rec.booster_version_category.as_str())
            .or_default()
            .push([rec.payload_mass_kg, rec.outcome.class() as f64]);
    }

    let series = by_category
        .into_iter()
        .map(|(category, points)| ScatterSeries {
            booster_version_category: category.to_string(),
            points,
        })
        .collect();

    PayloadFigure {
        title,
        x_label: "Payload Mass (kg)".to_string(),
        y_label: "Launch Outcome".to_string(),
        series,
    }
}

// ---------------------------------------------------------------------------
// Snapshot for export
// ---------------------------------------------------------------------------

/// Current control values plus both figures.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub site: &'a SiteSelection,
    pub payload_range: PayloadRange,
    pub outcome: &'a OutcomeFigure,
    pub payload: &'a PayloadFigure,
}

impl DashboardSnapshot<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::launches;

    fn all_points(fig: &PayloadFigure) -> impl Iterator<Item = &[f64; 2]> {
        fig.series.iter().flat_map(|s| s.points.iter())
    }

    #[test]
    fn all_sites_counts_sum_to_row_count() {
        let ds = launches();
        let fig = outcome_distribution(&ds, &SiteSelection::All);
        assert_eq!(fig.title, "Total Success Launches Across All Sites");
        assert_eq!(fig.total, ds.len());
        assert_eq!(fig.slices.iter().map(|s| s.count).sum::<usize>(), ds.len());
        assert_eq!(fig.count_of(LaunchOutcome::Success), 8);
        assert_eq!(fig.count_of(LaunchOutcome::Failure), 7);
    }

    #[test]
    fn slices_are_ordered_by_class() {
        let ds = launches();
        let fig = outcome_distribution(&ds, &SiteSelection::All);
        let order: Vec<LaunchOutcome> = fig.slices.iter().map(|s| s.outcome).collect();
        assert_eq!(order, vec![LaunchOutcome::Failure, LaunchOutcome::Success]);
        let total: f64 = fig.slices.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_site_pie_counts_only_that_site() {
        let ds = launches();
        let fig = outcome_distribution(&ds, &SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(fig.title, "Success vs Failed Launches for KSC LC-39A");
        assert_eq!(fig.total, 4);
        assert_eq!(fig.count_of(LaunchOutcome::Success), 3);
        assert_eq!(fig.count_of(LaunchOutcome::Failure), 1);
    }

    #[test]
    fn site_with_one_outcome_has_one_slice() {
        let ds = launches();
        let fig = outcome_distribution(&ds, &SiteSelection::Site("CCAFS LC-40".into()));
        // four failures, one success
        assert_eq!(fig.slices.len(), 2);
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,1.0,1,FT\n";
        let ds = crate::data::loader::load_csv_reader(csv.as_bytes()).unwrap();
        let fig = outcome_distribution(&ds, &SiteSelection::All);
        assert_eq!(fig.slices.len(), 1);
        assert_eq!(fig.slices[0].fraction, 1.0);
    }

    #[test]
    fn unknown_site_gives_empty_pie() {
        let ds = launches();
        let fig = outcome_distribution(&ds, &SiteSelection::Site("nowhere".into()));
        assert!(fig.slices.is_empty());
        assert_eq!(fig.total, 0);
    }

    #[test]
    fn scatter_points_stay_inside_range() {
        let ds = launches();
        for (lo, hi) in [(0.0, 1000.0), (2000.0, 6000.0), (9600.0, 9600.0), (20000.0, 30000.0)] {
            let range = PayloadRange::new(lo, hi);
            let fig = payload_correlation(&ds, &SiteSelection::All, range);
            assert!(all_points(&fig).all(|p| lo <= p[0] && p[0] <= hi));
        }
    }

    #[test]
    fn full_range_scatter_reproduces_dataset() {
        let ds = launches();
        let fig = payload_correlation(&ds, &SiteSelection::All, ds.payload_bounds.unwrap());
        assert_eq!(fig.point_count(), ds.len());
        assert_eq!(
            fig.title,
            "Correlation Between Payload and Launch Outcome for All Sites"
        );
        assert_eq!(fig.x_label, "Payload Mass (kg)");
        assert_eq!(fig.y_label, "Launch Outcome");
    }

    #[test]
    fn scatter_groups_by_booster_category() {
        let ds = launches();
        let fig = payload_correlation(
            &ds,
            &SiteSelection::Site("VAFB SLC-4E".into()),
            ds.payload_bounds.unwrap(),
        );
        assert_eq!(fig.title, "Payload vs Launch Outcome for VAFB SLC-4E");
        let cats: Vec<&str> = fig
            .series
            .iter()
            .map(|s| s.booster_version_category.as_str())
            .collect();
        assert_eq!(cats, vec!["B5", "FT", "v1.1"]);
        assert!(all_points(&fig).all(|p| p[1] == 0.0 || p[1] == 1.0));
    }

    #[test]
    fn inverted_range_gives_empty_scatter() {
        let ds = launches();
        let fig = payload_correlation(&ds, &SiteSelection::All, PayloadRange::new(5000.0, 10.0));
        assert_eq!(fig.point_count(), 0);
        assert!(fig.series.is_empty());
    }

    #[test]
    fn snapshot_serializes_class_values() {
        let ds = launches();
        let site = SiteSelection::All;
        let range = ds.payload_bounds.unwrap();
        let outcome = outcome_distribution(&ds, &site);
        let payload = payload_correlation(&ds, &site, range);
        let json = DashboardSnapshot {
            site: &site,
            payload_range: range,
            outcome: &outcome,
            payload: &payload,
        }
        .to_json()
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["site"], "All");
        assert_eq!(value["outcome"]["slices"][0]["outcome"], 0);
        assert_eq!(value["outcome"]["total"], 15);
        assert_eq!(value["payload_range"]["max"], 15600.0);
    }
}
