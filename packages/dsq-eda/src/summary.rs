use serde::Serialize;

use crate::{Column, Table, Value};

const EXAMPLE_VALUES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
	/// Optional in the analyzer contract; [`summarize`] always fills both.
	pub n_rows: Option<usize>,
	pub n_cols: Option<usize>,
	pub columns: Vec<ColumnSummary>,
}
impl DatasetSummary {
	/// `(n_rows, n_cols)` when the summary carries both dimensions.
	pub fn dimensions(&self) -> Option<(usize, usize)> {
		self.n_rows.zip(self.n_cols)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
	pub name: String,
	pub dtype: &'static str,
	pub non_null: usize,
	pub missing: usize,
	pub missing_share: f64,
	pub unique: usize,
	pub example_values: Vec<String>,
	pub is_numeric: bool,
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub mean: Option<f64>,
	pub std: Option<f64>,
}

pub fn summarize(table: &Table) -> DatasetSummary {
	let n_rows = table.n_rows();
	let columns = table.columns().iter().map(|column| summarize_column(column, n_rows)).collect();

	DatasetSummary { n_rows: Some(n_rows), n_cols: Some(table.n_cols()), columns }
}

fn summarize_column(column: &Column, n_rows: usize) -> ColumnSummary {
	let missing = column.missing_count();
	let non_null = column.values.len() - missing;
	let missing_share = if n_rows == 0 { 0.0 } else { missing as f64 / n_rows as f64 };
	let example_values = column.present().take(EXAMPLE_VALUES).map(render).collect();
	let stats = column.is_numeric().then(|| NumericStats::of(column.numbers())).flatten();

	ColumnSummary {
		name: column.name.clone(),
		dtype: if column.is_numeric() { "number" } else { "text" },
		non_null,
		missing,
		missing_share,
		unique: column.distinct_count(),
		example_values,
		is_numeric: column.is_numeric(),
		min: stats.as_ref().map(|stats| stats.min),
		max: stats.as_ref().map(|stats| stats.max),
		mean: stats.as_ref().map(|stats| stats.mean),
		std: stats.and_then(|stats| stats.std),
	}
}

fn render(value: &Value) -> String {
	match value {
		Value::Missing => String::new(),
		Value::Number(number) => number.to_string(),
		Value::Text(text) => text.clone(),
	}
}

struct NumericStats {
	min: f64,
	max: f64,
	mean: f64,
	/// Sample standard deviation; needs at least two values.
	std: Option<f64>,
}
impl NumericStats {
	fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
		let values: Vec<f64> = values.collect();

		if values.is_empty() {
			return None;
		}

		let count = values.len() as f64;
		let min = values.iter().copied().fold(f64::INFINITY, f64::min);
		let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
		let mean = values.iter().sum::<f64>() / count;
		let std = (values.len() > 1).then(|| {
			let variance =
				values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / (count - 1.0);

			variance.sqrt()
		});

		Some(Self { min, max, mean, std })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_std_needs_two_values() {
		let single = NumericStats::of([4.0].into_iter()).expect("Expected stats.");
		let pair = NumericStats::of([1.0, 3.0].into_iter()).expect("Expected stats.");

		assert_eq!(single.std, None);
		assert_eq!(pair.mean, 2.0);
		assert!((pair.std.expect("Expected std.") - 2.0_f64.sqrt()).abs() < 1e-12);
		assert!(NumericStats::of(std::iter::empty()).is_none());
	}
}
