use std::path::PathBuf;

/// Startup settings. The only runtime override is an optional data path as
/// the first positional argument.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Slider step in kg.
    pub payload_step: f64,
    /// Distance between slider tick labels in kg.
    pub mark_interval: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            window_size: [1280.0, 860.0],
            min_window_size: [720.0, 480.0],
            payload_step: 100.0,
            mark_interval: 1000.0,
        }
    }
}

impl DashboardConfig {
    /// Build from process arguments, program name excluded.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().next() {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}
