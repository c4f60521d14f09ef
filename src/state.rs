use std::path::PathBuf;

use diamond_dash::config::{DashboardConfig, DataPaths};
use diamond_dash::data::error::LoadError;
use diamond_dash::data::loader::load_datasets;
use diamond_dash::data::model::Datasets;
use diamond_dash::view::{DashboardView, ViewOutput, ViewSelection, selectable_years};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Folder the three input files are read from.
    pub data_dir: PathBuf,

    /// Raw records, loaded once per folder.
    pub datasets: Datasets,

    /// One entry per dataset that failed to load.
    pub load_issues: Vec<LoadError>,

    /// Which view the user picked.
    pub view: DashboardView,

    /// Year range and yearly-stats selectors.
    pub selection: ViewSelection,

    /// Result of the last recomputation.
    pub output: ViewOutput,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = Self {
            data_dir: config.data_dir.clone(),
            selection: ViewSelection::from_config(&config),
            config,
            datasets: Datasets::default(),
            load_issues: Vec::new(),
            view: DashboardView::YearlyStats,
            output: ViewOutput::Empty {
                reason: String::new(),
            },
        };
        state.reload();
        state
    }

    /// Re-read all input files from `data_dir` and recompute the view.
    pub fn reload(&mut self) {
        let paths = DataPaths::in_dir(&self.data_dir, &self.config);
        let report = load_datasets(&paths);
        log::info!(
            "{} rows loaded from {}, {} dataset(s) unavailable",
            report.datasets.len(),
            self.data_dir.display(),
            report.issues.len()
        );
        self.datasets = report.datasets;
        self.load_issues = report.issues;
        self.selection.year = None;
        self.recompute();
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.data_dir = dir;
        self.reload();
    }

    /// Run the current view's pipeline against the current selection.
    pub fn recompute(&mut self) {
        self.output = self
            .view
            .compute(&self.datasets, &self.selection, &self.config);
    }

    pub fn set_view(&mut self, view: DashboardView) {
        if self.view != view {
            self.view = view;
            self.recompute();
        }
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.selection.year = year;
        self.recompute();
    }

    pub fn set_league(&mut self, league: Option<String>) {
        self.selection.league = league;
        self.recompute();
    }

    pub fn set_division(&mut self, division: Option<String>) {
        self.selection.division = division;
        self.recompute();
    }

    /// Seasons the year selector offers.
    pub fn selectable_years(&self) -> Vec<i32> {
        selectable_years(&self.datasets, &self.selection)
    }
}
