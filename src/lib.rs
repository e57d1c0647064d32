//! Exploratory data analysis over the cleaned Titanic passenger table.
//!
//! The library is UI-free: load a [`Dataset`](data::model::Dataset) once,
//! offer the [`FilterOptions`](data::filter::FilterOptions) it yields, and call
//! [`compute`](pipeline::compute) for every filter selection.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod state;

pub use data::filter::{apply, Choice, FilterOptions, FilterSelection, FilteredView};
pub use data::loader::load_file;
pub use data::model::{Cell, ColumnKind, Dataset, PassengerRecord, Schema};
pub use error::DataError;
pub use pipeline::{compute, compute_with, Dashboard, PipelineOptions, Summaries};
