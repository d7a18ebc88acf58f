//! Heuristic quality flags over an analyzed table.
//!
//! The output mixes booleans with numeric diagnostics (`max_missing_share`,
//! `duplicate_rows_share`, `quality_score`); consumers filter by variant.

use dsq_domain::FlagMap;

use crate::{ColumnKind, DatasetSummary, MissingReport, Table};

pub const MIN_ROWS: usize = 100;
pub const MAX_COLS: usize = 100;
pub const MAX_MISSING_SHARE: f64 = 0.5;
pub const HIGH_CARDINALITY_UNIQUE: usize = 50;
pub const DUPLICATE_ROWS_SHARE: f64 = 0.1;
pub const ZERO_VALUES_SHARE: f64 = 0.5;

pub fn compute_flags(summary: &DatasetSummary, missing: &MissingReport, table: &Table) -> FlagMap {
	let (n_rows, n_cols) = summary.dimensions().unwrap_or((table.n_rows(), table.n_cols()));
	let max_missing_share = missing.max_missing_share();
	let duplicate_rows_share = share(table.duplicate_row_count(), table.n_rows());
	let too_few_rows = n_rows < MIN_ROWS;
	let too_many_columns = n_cols > MAX_COLS;
	let too_many_missing = max_missing_share > MAX_MISSING_SHARE;
	let has_constant_columns = summary.columns.iter().any(|column| column.unique <= 1);
	let has_high_cardinality_categoricals = table.columns().iter().any(|column| {
		column.kind == ColumnKind::Categorical && column.distinct_count() > HIGH_CARDINALITY_UNIQUE
	});
	let high_duplicate_values_ratio = duplicate_rows_share > DUPLICATE_ROWS_SHARE;
	let has_many_zero_values = table.columns().iter().filter(|column| column.is_numeric()).any(
		|column| {
			let present = column.numbers().count();
			let zeros = column.numbers().filter(|value| *value == 0.0).count();

			present > 0 && share(zeros, present) > ZERO_VALUES_SHARE
		},
	);

	let mut score = 1.0 - max_missing_share;

	for (flag, penalty) in [
		(too_few_rows, 0.2),
		(too_many_columns, 0.1),
		(has_constant_columns, 0.1),
		(has_high_cardinality_categoricals, 0.1),
		(high_duplicate_values_ratio, 0.05),
		(has_many_zero_values, 0.05),
	] {
		if flag {
			score -= penalty;
		}
	}

	FlagMap::from([
		("too_few_rows".to_string(), too_few_rows.into()),
		("too_many_columns".to_string(), too_many_columns.into()),
		("max_missing_share".to_string(), max_missing_share.into()),
		("too_many_missing".to_string(), too_many_missing.into()),
		("has_constant_columns".to_string(), has_constant_columns.into()),
		("has_high_cardinality_categoricals".to_string(), has_high_cardinality_categoricals.into()),
		("duplicate_rows_share".to_string(), duplicate_rows_share.into()),
		("high_duplicate_values_ratio".to_string(), high_duplicate_values_ratio.into()),
		("has_many_zero_values".to_string(), has_many_zero_values.into()),
		("quality_score".to_string(), score.clamp(0.0, 1.0).into()),
	])
}

fn share(part: usize, total: usize) -> f64 {
	if total == 0 { 0.0 } else { part as f64 / total as f64 }
}
