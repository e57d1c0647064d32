use std::fmt;

use super::model::{Dataset, PassengerRecord};

// ---------------------------------------------------------------------------
// Choice – one filter's selected value, or "All"
// ---------------------------------------------------------------------------

/// The value picked in a single filter widget.
///
/// `All` is part of every filter's domain and never equals a data value, so a
/// passenger whose sex is literally the text "All" is still only matched by
/// `Only("All")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    /// Whether a row with `value` passes this constraint.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(selected) => selected == value,
        }
    }
}

impl<T> Choice<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => write!(f, "All"),
            Choice::Only(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterSelection – the current constraint per filterable column
// ---------------------------------------------------------------------------

/// Constraints on `Sex` and `Pclass`, combined with logical AND.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub sex: Choice<String>,
    pub pclass: Choice<i64>,
}

impl FilterSelection {
    /// No restriction on either column.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Choice::Only(sex.into());
        self
    }

    pub fn with_pclass(mut self, pclass: i64) -> Self {
        self.pclass = Choice::Only(pclass);
        self
    }

    /// Whether a passenger satisfies every active constraint.
    pub fn admits(&self, record: &PassengerRecord) -> bool {
        self.sex.admits(&record.sex) && self.pclass.admits(&record.pclass)
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sex={}, Pclass={}", self.sex, self.pclass)
    }
}

// ---------------------------------------------------------------------------
// FilterOptions – values offered by each filter widget
// ---------------------------------------------------------------------------

/// The selectable values of both filters, derived once from the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    /// `All`, then each distinct sex in first-seen order.
    pub sex: Vec<Choice<String>>,
    /// `All`, then each distinct class in ascending order.
    pub pclass: Vec<Choice<i64>>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut sexes: Vec<String> = Vec::new();
        let mut classes: Vec<i64> = Vec::new();
        for rec in dataset.records() {
            if !sexes.contains(&rec.sex) {
                sexes.push(rec.sex.clone());
            }
            classes.push(rec.pclass);
        }
        classes.sort_unstable();
        classes.dedup();

        FilterOptions {
            sex: std::iter::once(Choice::All)
                .chain(sexes.into_iter().map(Choice::Only))
                .collect(),
            pclass: std::iter::once(Choice::All)
                .chain(classes.into_iter().map(Choice::Only))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredView – rows passing the current selection
// ---------------------------------------------------------------------------

/// A read-only subset of a [`Dataset`], in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Positions of the matching rows within the dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a PassengerRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// The first `n` matching rows.
    pub fn head(&self, n: usize) -> Vec<&'a PassengerRecord> {
        self.records().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the rows of `dataset` that pass every active constraint of `selection`.
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.admits(rec))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}
