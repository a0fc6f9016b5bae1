use std::path::Path;

use chrono::NaiveDate;

use bike_dash::config::DataSource;
use bike_dash::data::aggregate::{Summary, summarize};
use bike_dash::data::filter::filter;
use bike_dash::data::loader;
use bike_dash::data::model::{BikeTable, Dataset, DateRange};

use crate::color::CategoryColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Session dataset, replaced only by an explicit reload.
    pub dataset: Dataset,

    /// Date picker values.
    pub start: NaiveDate,
    pub end: NaiveDate,

    /// Distinct days in the full dataset.
    pub total_days: usize,

    /// Rows and calendar days in the current working set.
    pub working_rows: usize,
    pub selected_days: i64,

    /// Aggregates for the current selection.
    pub summary: Summary,

    /// Rejected date range, shown next to the picker.
    pub input_error: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    pub season_colors: CategoryColors,
    pub weather_colors: CategoryColors,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        let domain = dataset.domain();
        let mut state = Self {
            dataset,
            start: domain.start,
            end: domain.end,
            total_days: 0,
            working_rows: 0,
            selected_days: 0,
            summary: Summary::default(),
            input_error: None,
            status_message: None,
            season_colors: CategoryColors::new(&[]),
            weather_colors: CategoryColors::new(&[]),
        };
        state.refresh_dataset_facts();
        state.recompute();
        state
    }

    /// Swap in a newly loaded dataset and reset the range to its domain.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.status_message = None;
        self.refresh_dataset_facts();
        self.reset_range();
    }

    /// Select the whole date domain again.
    pub fn reset_range(&mut self) {
        let domain = self.dataset.domain();
        self.start = domain.start;
        self.end = domain.end;
        self.recompute();
    }

    /// Re-run filter and aggregation for the current picker values.
    ///
    /// An invalid range is reported in `input_error`; the working-set views
    /// are emptied while the full-set views stay populated.
    pub fn recompute(&mut self) {
        let full = &self.dataset.full;
        let working = DateRange::from_selection(&[self.start, self.end])
            .and_then(|range| filter(full, range).map(|working| (range, working)));

        match working {
            Ok((range, working)) => {
                log::debug!(
                    "Recomputing for {} to {} ({} days): {} rows",
                    range.start,
                    range.end,
                    range.num_days(),
                    working.len()
                );
                self.working_rows = working.len();
                self.selected_days = range.num_days();
                self.summary = summarize(&working, full);
                self.input_error = None;
            }
            Err(e) => {
                let empty = BikeTable {
                    rows: Vec::new(),
                    domain: full.domain,
                };
                self.working_rows = 0;
                self.selected_days = 0;
                self.summary = summarize(&empty, full);
                if e.is_recoverable() {
                    log::warn!("Rejected date range: {e}");
                    self.input_error = Some(e.to_string());
                } else {
                    log::error!("Recomputation failed: {e}");
                    self.input_error = None;
                    self.status_message = Some(format!("Error: {e}"));
                }
            }
        }
    }

    /// Reload `day.csv` / `hour.csv` from a directory. On failure the current
    /// dataset is kept and the error is shown in the status bar.
    pub fn load_folder(&mut self, dir: &Path) {
        let source = DataSource::Local { dir: dir.to_path_buf() };
        match loader::load(&source) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", dir.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Header line: date domain, distinct days and hourly rows.
    pub fn dataset_summary(&self) -> String {
        let domain = self.dataset.domain();
        format!(
            "{} to {}  ·  {} days  ·  {} hourly rows",
            domain.start,
            domain.end,
            self.total_days,
            self.dataset.full.len()
        )
    }

    /// Cache per-dataset facts: distinct day count and category colours.
    fn refresh_dataset_facts(&mut self) {
        self.total_days = self.dataset.full.distinct_days();

        let full = summarize(
            &BikeTable {
                rows: Vec::new(),
                domain: self.dataset.full.domain,
            },
            &self.dataset.full,
        );
        let seasons: Vec<&'static str> = full.seasonal.iter().map(|s| s.season).collect();
        let weather: Vec<&'static str> = full.weather.iter().map(|w| w.weather).collect();
        self.season_colors = CategoryColors::new(&seasons);
        self.weather_colors = CategoryColors::new(&weather);
    }
}
