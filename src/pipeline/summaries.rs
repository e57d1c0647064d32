use std::collections::BTreeMap;
use std::fmt;

use super::stats::{self, BoxStats, Histogram};
use crate::data::filter::FilteredView;
use crate::data::model::PassengerRecord;

/// Number of points the age density curve is sampled at.
const KDE_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// SurvivalStatus – labelled form of the `Survived` flag
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SurvivalStatus {
    DidNotSurvive,
    Survived,
}

impl SurvivalStatus {
    pub const ALL: [SurvivalStatus; 2] = [SurvivalStatus::DidNotSurvive, SurvivalStatus::Survived];

    pub fn from_survived(survived: bool) -> Self {
        if survived {
            SurvivalStatus::Survived
        } else {
            SurvivalStatus::DidNotSurvive
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SurvivalStatus::DidNotSurvive => "Did Not Survive",
            SurvivalStatus::Survived => "Survived",
        }
    }
}

impl fmt::Display for SurvivalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// 1. Survival counts by sex
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurvivalCount {
    pub status: SurvivalStatus,
    pub sex: String,
    pub count: usize,
}

/// Row count per `(status, sex)` pair present in the view, ordered by status
/// and then by the order in which each sex first appears.
pub fn survival_counts_by_sex(view: &FilteredView<'_>) -> Vec<SurvivalCount> {
    let mut sexes: Vec<&str> = Vec::new();
    let mut counts: BTreeMap<(SurvivalStatus, usize), usize> = BTreeMap::new();
    for rec in view.records() {
        let sex_pos = match sexes.iter().position(|s| *s == rec.sex) {
            Some(pos) => pos,
            None => {
                sexes.push(&rec.sex);
                sexes.len() - 1
            }
        };
        *counts
            .entry((SurvivalStatus::from_survived(rec.survived), sex_pos))
            .or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((status, sex_pos), count)| SurvivalCount {
            status,
            sex: sexes[sex_pos].to_string(),
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 2. Age distribution
// ---------------------------------------------------------------------------

/// Known ages of the view, plus the histogram and density curve drawn from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgeDistribution {
    /// Non-missing ages in view order.
    pub ages: Vec<f64>,
    pub histogram: Histogram,
    /// Density scaled to histogram counts (`density · n · bin width`).
    pub kde: Vec<[f64; 2]>,
}

impl AgeDistribution {
    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }
}

pub fn age_distribution(view: &FilteredView<'_>, bins: usize) -> AgeDistribution {
    let ages = known_ages(view, |_| true);
    let histogram = Histogram::from_values(&ages, bins);
    let scale = histogram.bin_width().unwrap_or(0.0) * ages.len() as f64;
    let kde = stats::gaussian_kde(&ages, KDE_POINTS)
        .into_iter()
        .map(|[x, density]| [x, density * scale])
        .collect();
    AgeDistribution {
        ages,
        histogram,
        kde,
    }
}

fn known_ages(view: &FilteredView<'_>, keep: impl Fn(bool) -> bool) -> Vec<f64> {
    view.records()
        .filter(|rec| keep(rec.survived))
        .filter_map(|rec| rec.age)
        .filter(|age| !age.is_nan())
        .collect()
}

// ---------------------------------------------------------------------------
// 3 & 4. Per-class means
// ---------------------------------------------------------------------------

/// Mean of a per-row value for each class present, keyed by class ascending.
fn mean_by_class(
    view: &FilteredView<'_>,
    value: impl Fn(&PassengerRecord) -> f64,
) -> BTreeMap<i64, f64> {
    let mut groups: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for rec in view.records() {
        groups.entry(rec.pclass).or_default().push(value(rec));
    }
    groups
        .into_iter()
        .filter_map(|(class, values)| stats::mean(values).map(|m| (class, m)))
        .collect()
}

/// Fraction of survivors in each class, in `[0, 1]`.
pub fn survival_rate_by_class(view: &FilteredView<'_>) -> BTreeMap<i64, f64> {
    mean_by_class(view, |rec| if rec.survived { 1.0 } else { 0.0 })
}

pub fn average_fare_by_class(view: &FilteredView<'_>) -> BTreeMap<i64, f64> {
    mean_by_class(view, |rec| rec.fare)
}

// ---------------------------------------------------------------------------
// 5. Counts by embarkation point
// ---------------------------------------------------------------------------

/// Passengers per port of embarkation.
///
/// Rows without a port do not form a bucket of their own; they are only
/// tallied in `missing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbarkationCounts {
    /// `(port, count)` in first-seen order.
    pub counts: Vec<(String, usize)>,
    pub missing: usize,
}

impl EmbarkationCounts {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, port: &str) -> Option<usize> {
        self.counts.iter().find(|(p, _)| p == port).map(|(_, c)| *c)
    }
}

pub fn counts_by_embarkation(view: &FilteredView<'_>) -> EmbarkationCounts {
    let mut out = EmbarkationCounts::default();
    for rec in view.records() {
        let Some(port) = rec.embarked.as_deref() else {
            out.missing += 1;
            continue;
        };
        match out.counts.iter_mut().find(|(p, _)| p == port) {
            Some((_, count)) => *count += 1,
            None => out.counts.push((port.to_string(), 1)),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// 6. Age distribution by survival status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalAgeGroup {
    pub status: SurvivalStatus,
    pub ages: Vec<f64>,
    /// `None` when no passenger of this status has a known age.
    pub box_stats: Option<BoxStats>,
}

/// One group per survival status present in the view, `DidNotSurvive` first.
pub fn age_by_survival(view: &FilteredView<'_>) -> Vec<SurvivalAgeGroup> {
    SurvivalStatus::ALL
        .into_iter()
        .filter(|status| {
            view.records()
                .any(|rec| SurvivalStatus::from_survived(rec.survived) == *status)
        })
        .map(|status| {
            let ages = known_ages(view, |survived| SurvivalStatus::from_survived(survived) == status);
            let box_stats = BoxStats::from_values(&ages);
            SurvivalAgeGroup {
                status,
                ages,
                box_stats,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 7. Correlation matrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson correlation between the numeric columns of a view.
///
/// Stored row-major; a `None` cell means the coefficient is undefined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    cells: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    /// Correlated column names; row and column order of the matrix.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let n = self.columns.len();
        if row >= n || col >= n {
            return None;
        }
        self.cells.get(row * n + col).copied().flatten()
    }

    /// Look a coefficient up by column names.
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.get(i, j)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Correlate every pair of numeric columns over the rows where both are
/// present. The diagonal is exactly `1.0` wherever the column has spread.
pub fn correlation_matrix(view: &FilteredView<'_>) -> CorrelationMatrix {
    if view.is_empty() {
        return CorrelationMatrix::default();
    }

    let columns: Vec<String> = view
        .dataset()
        .schema()
        .numeric_columns()
        .map(str::to_string)
        .collect();
    let values: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|col| view.records().map(|rec| rec.numeric(col)).collect())
        .collect();

    let n = columns.len();
    let mut cells = vec![None; n * n];
    for i in 0..n {
        for j in i..n {
            let pairs: Vec<(f64, f64)> = values[i]
                .iter()
                .zip(&values[j])
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .collect();
            let r = stats::pearson(&pairs).map(|r| if i == j { 1.0 } else { r });
            cells[i * n + j] = r;
            cells[j * n + i] = r;
        }
    }

    CorrelationMatrix { columns, cells }
}
