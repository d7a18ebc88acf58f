use std::collections::HashSet;

use crate::{Error, Result};

/// Cell spellings read as a missing value, compared after trimming.
pub const MISSING_TOKENS: [&str; 9] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
	Numeric,
	Categorical,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Missing,
	Number(f64),
	Text(String),
}
impl Value {
	pub fn is_missing(&self) -> bool {
		matches!(self, Self::Missing)
	}

	fn key(&self) -> ValueKey<'_> {
		match self {
			Self::Missing => ValueKey::Missing,
			// Adding zero folds -0.0 into 0.0 so both count as one distinct value.
			Self::Number(value) => ValueKey::Number((value + 0.0).to_bits()),
			Self::Text(value) => ValueKey::Text(value),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ValueKey<'a> {
	Missing,
	Number(u64),
	Text(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
	pub name: String,
	pub kind: ColumnKind,
	pub values: Vec<Value>,
}
impl Column {
	fn infer(name: String, cells: Vec<Option<String>>) -> Self {
		let numeric = cells.iter().flatten().all(|cell| cell.parse::<f64>().is_ok());
		let kind = if numeric { ColumnKind::Numeric } else { ColumnKind::Categorical };
		let values = cells
			.into_iter()
			.map(|cell| match cell {
				None => Value::Missing,
				Some(cell) if numeric => cell.parse().map(Value::Number).unwrap_or(Value::Missing),
				Some(cell) => Value::Text(cell),
			})
			.collect();

		Self { name, kind, values }
	}

	pub fn is_numeric(&self) -> bool {
		self.kind == ColumnKind::Numeric
	}

	pub fn missing_count(&self) -> usize {
		self.values.iter().filter(|value| value.is_missing()).count()
	}

	pub fn present(&self) -> impl Iterator<Item = &Value> {
		self.values.iter().filter(|value| !value.is_missing())
	}

	pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
		self.values.iter().filter_map(|value| match value {
			Value::Number(number) => Some(*number),
			_ => None,
		})
	}

	/// Distinct present values; missing cells are not counted.
	pub fn distinct_count(&self) -> usize {
		self.present().map(Value::key).collect::<HashSet<_>>().len()
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
	columns: Vec<Column>,
	n_rows: usize,
}
impl Table {
	/// Parses CSV bytes with a header row. Records shorter than the header are padded with
	/// missing cells; longer records are rejected.
	pub fn from_csv(bytes: &[u8]) -> Result<Self> {
		let mut reader =
			csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(bytes);
		let headers = reader.headers()?.clone();

		if headers.is_empty() {
			return Err(Error::NoColumns);
		}

		let names = unique_names(headers.iter());
		let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
		let mut n_rows = 0_usize;

		for record in reader.records() {
			let record = record?;

			if record.len() > names.len() {
				return Err(Error::TooManyFields {
					line: record.position().map(csv::Position::line).unwrap_or_default(),
					expected: names.len(),
					found: record.len(),
				});
			}

			for (idx, column) in cells.iter_mut().enumerate() {
				column.push(record.get(idx).and_then(read_cell));
			}

			n_rows += 1;
		}

		let columns = names
			.into_iter()
			.zip(cells)
			.map(|(name, cells)| Column::infer(name, cells))
			.collect();

		tracing::debug!(n_rows, n_cols = headers.len(), "Parsed CSV table.");

		Ok(Self { columns, n_rows })
	}

	pub fn n_rows(&self) -> usize {
		self.n_rows
	}

	pub fn n_cols(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.n_rows == 0
	}

	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	/// Rows that repeat an earlier row exactly, missing cells included.
	pub fn duplicate_row_count(&self) -> usize {
		let mut seen = HashSet::with_capacity(self.n_rows);
		let mut duplicates = 0;

		for row in 0..self.n_rows {
			let key: Vec<ValueKey<'_>> = self
				.columns
				.iter()
				.map(|column| column.values.get(row).map(Value::key).unwrap_or(ValueKey::Missing))
				.collect();

			if !seen.insert(key) {
				duplicates += 1;
			}
		}

		duplicates
	}
}

fn read_cell(field: &str) -> Option<String> {
	let trimmed = field.trim();

	if MISSING_TOKENS.contains(&trimmed) { None } else { Some(trimmed.to_string()) }
}

/// Blank headers become `Unnamed: <index>`; repeats get `.1`, `.2`, ... suffixes.
fn unique_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
	let mut names: Vec<String> = Vec::new();

	for (idx, header) in headers.enumerate() {
		let base = match header.trim() {
			"" => format!("Unnamed: {idx}"),
			trimmed => trimmed.to_string(),
		};
		let mut name = base.clone();
		let mut suffix = 1;

		while names.contains(&name) {
			name = format!("{base}.{suffix}");
			suffix += 1;
		}

		names.push(name);
	}

	names
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renames_blank_and_repeated_headers() {
		let names = unique_names(["a", "", "a", "a", " b "].into_iter());

		assert_eq!(names, vec!["a", "Unnamed: 1", "a.1", "a.2", "b"]);
	}

	#[test]
	fn missing_tokens_are_trimmed() {
		assert_eq!(read_cell("  NA "), None);
		assert_eq!(read_cell(""), None);
		assert_eq!(read_cell(" x "), Some("x".to_string()));
	}

	#[test]
	fn negative_zero_is_not_a_distinct_value() {
		let column = Column::infer(
			"z".to_string(),
			vec![Some("0".to_string()), Some("-0".to_string()), None],
		);

		assert!(column.is_numeric());
		assert_eq!(column.distinct_count(), 1);
		assert_eq!(column.missing_count(), 1);
	}
}
