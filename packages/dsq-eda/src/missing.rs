use serde::Serialize;

use crate::Table;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
	pub column: String,
	pub missing_count: usize,
	pub missing_share: f64,
}

/// Missing-value counts per column, in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MissingReport {
	pub entries: Vec<MissingEntry>,
}
impl MissingReport {
	/// `0.0` for a table without columns.
	pub fn max_missing_share(&self) -> f64 {
		self.entries.iter().map(|entry| entry.missing_share).fold(0.0, f64::max)
	}
}

pub fn missing_table(table: &Table) -> MissingReport {
	let n_rows = table.n_rows();
	let entries = table
		.columns()
		.iter()
		.map(|column| {
			let missing_count = column.missing_count();
			let missing_share =
				if n_rows == 0 { 0.0 } else { missing_count as f64 / n_rows as f64 };

			MissingEntry { column: column.name.clone(), missing_count, missing_share }
		})
		.collect();

	MissingReport { entries }
}
