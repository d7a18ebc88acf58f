//! Exploratory analysis of tabular datasets: parsing, per-column summaries, missing-value
//! reports and heuristic quality flags.

mod error;

pub mod missing;
pub mod quality;
pub mod summary;
pub mod table;

pub use error::{Error, Result};
pub use missing::{MissingEntry, MissingReport, missing_table};
pub use quality::compute_flags;
pub use summary::{ColumnSummary, DatasetSummary, summarize};
pub use table::{Column, ColumnKind, Table, Value};
