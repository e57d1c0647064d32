//! Aggregation pipeline: selection in, seven derived summaries out.
//!
//! [`compute`] is the only entry point the presentation layer needs. It is a
//! pure function of the dataset and the selection; callers re-run it on every
//! selection change instead of patching a previous result.

pub mod stats;
pub mod summaries;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::data::filter::{apply, FilterSelection, FilteredView};
use crate::data::model::{Dataset, PassengerRecord};

pub use summaries::{
    AgeDistribution, CorrelationMatrix, EmbarkationCounts, SurvivalAgeGroup, SurvivalCount,
    SurvivalStatus,
};

/// Tunables of the pipeline that do not change its semantics.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineOptions {
    /// Rows shown in the filtered preview.
    pub preview_rows: usize,
    /// Bins of the age histogram.
    pub histogram_bins: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            histogram_bins: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// Summaries – the seven derived views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summaries {
    pub survival_by_sex: Vec<SurvivalCount>,
    pub age_distribution: AgeDistribution,
    pub survival_rate_by_class: BTreeMap<i64, f64>,
    pub average_fare_by_class: BTreeMap<i64, f64>,
    pub embarkation: EmbarkationCounts,
    pub age_by_survival: Vec<SurvivalAgeGroup>,
    pub correlation: CorrelationMatrix,
}

impl Summaries {
    pub fn from_view(view: &FilteredView<'_>, options: &PipelineOptions) -> Self {
        Summaries {
            survival_by_sex: summaries::survival_counts_by_sex(view),
            age_distribution: summaries::age_distribution(view, options.histogram_bins),
            survival_rate_by_class: summaries::survival_rate_by_class(view),
            average_fare_by_class: summaries::average_fare_by_class(view),
            embarkation: summaries::counts_by_embarkation(view),
            age_by_survival: summaries::age_by_survival(view),
            correlation: summaries::correlation_matrix(view),
        }
    }

    /// Whether every summary is empty (the state of an empty view).
    pub fn is_empty(&self) -> bool {
        self.survival_by_sex.is_empty()
            && self.age_distribution.is_empty()
            && self.survival_rate_by_class.is_empty()
            && self.average_fare_by_class.is_empty()
            && self.embarkation.is_empty()
            && self.age_by_survival.is_empty()
            && self.correlation.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dashboard – everything drawn for one selection
// ---------------------------------------------------------------------------

/// Result of one pipeline run. Owns its data so it can outlive the view.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub selection: FilterSelection,
    pub total_rows: usize,
    pub matched_rows: usize,
    /// First rows of the filtered view.
    pub preview: Vec<PassengerRecord>,
    pub summaries: Summaries,
}

/// Filter `dataset` by `selection` and derive every summary, with default options.
pub fn compute(dataset: &Dataset, selection: &FilterSelection) -> Dashboard {
    compute_with(dataset, selection, &PipelineOptions::default())
}

pub fn compute_with(
    dataset: &Dataset,
    selection: &FilterSelection,
    options: &PipelineOptions,
) -> Dashboard {
    let view = apply(dataset, selection);
    log::debug!(
        "Recomputing summaries for {selection}: {} of {} rows",
        view.len(),
        dataset.len()
    );

    Dashboard {
        selection: selection.clone(),
        total_rows: dataset.len(),
        matched_rows: view.len(),
        preview: view
            .head(options.preview_rows)
            .into_iter()
            .cloned()
            .collect(),
        summaries: Summaries::from_view(&view, options),
    }
}
