use crate::data::filter::{Choice, FilterOptions, FilterSelection};
use crate::data::model::Dataset;
use crate::pipeline::{compute_with, Dashboard, PipelineOptions};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// `dashboard` is recomputed synchronously inside every selection setter, so
/// it always reflects `selection`.
pub struct AppState {
    /// Loaded dataset, read-only for the lifetime of the state.
    dataset: Dataset,

    /// Values offered by the two filter widgets.
    pub options: FilterOptions,

    selection: FilterSelection,

    /// Summaries for the current selection.
    dashboard: Dashboard,

    pipeline: PipelineOptions,

    /// Whether the full table is shown above the charts.
    pub show_raw_data: bool,
}

impl AppState {
    /// Ingest the loaded dataset and compute the unfiltered dashboard.
    pub fn new(dataset: Dataset, pipeline: PipelineOptions) -> Self {
        let options = FilterOptions::from_dataset(&dataset);
        let selection = FilterSelection::all();
        let dashboard = compute_with(&dataset, &selection, &pipeline);
        Self {
            dataset,
            options,
            selection,
            dashboard,
            pipeline,
            show_raw_data: false,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Replace the selection and recompute every summary.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        if selection == self.selection {
            return;
        }
        log::info!("Filter changed: {selection}");
        self.selection = selection;
        self.dashboard = compute_with(&self.dataset, &self.selection, &self.pipeline);
    }

    pub fn select_sex(&mut self, sex: Choice<String>) {
        let selection = FilterSelection {
            sex,
            ..self.selection.clone()
        };
        self.set_selection(selection);
    }

    pub fn select_pclass(&mut self, pclass: Choice<i64>) {
        let selection = FilterSelection {
            pclass,
            ..self.selection.clone()
        };
        self.set_selection(selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PassengerRecord;

    fn state() -> AppState {
        let dataset = Dataset::from_records(vec![
            PassengerRecord::new(0, "male", 1, 100.0, true),
            PassengerRecord::new(1, "female", 1, 80.0, false),
            PassengerRecord::new(2, "male", 3, 10.0, false),
        ]);
        AppState::new(dataset, PipelineOptions::default())
    }

    #[test]
    fn starts_unfiltered() {
        let state = state();
        assert_eq!(state.selection(), &FilterSelection::all());
        assert_eq!(state.dashboard().matched_rows, 3);
        assert_eq!(state.dashboard().preview.len(), 3);
    }

    #[test]
    fn dashboard_follows_every_selection_change() {
        let mut state = state();
        state.select_sex(Choice::Only("male".into()));
        assert_eq!(state.dashboard().selection, *state.selection());
        assert_eq!(state.dashboard().matched_rows, 2);

        state.select_pclass(Choice::Only(3));
        assert_eq!(state.dashboard().selection, *state.selection());
        assert_eq!(state.dashboard().matched_rows, 1);

        state.select_sex(Choice::All);
        assert_eq!(state.selection(), &FilterSelection::all().with_pclass(3));
        assert_eq!(state.dashboard().matched_rows, 1);
        assert_eq!(state.dataset().len(), 3);
    }

    #[test]
    fn absent_class_gives_empty_dashboard() {
        let mut state = state();
        state.select_pclass(Choice::Only(2));
        assert_eq!(state.dashboard().matched_rows, 0);
        assert!(state.dashboard().summaries.is_empty());
        assert!(state.dashboard().preview.is_empty());
    }
}
