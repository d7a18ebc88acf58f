use serde::{Deserialize, Serialize};

/// Aggregate features of a dataset, supplied by the caller rather than derived from a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
	pub n_rows: u64,
	pub n_cols: u64,
	/// Largest share of missing values over all columns, in `[0, 1]`.
	pub max_missing_share: f64,
	pub numeric_cols: u64,
	pub categorical_cols: u64,
}
impl FeatureSet {
	pub fn shape(&self) -> DatasetShape {
		DatasetShape { n_rows: self.n_rows, n_cols: self.n_cols }
	}

	/// JSON paths of fields outside their documented range. Counts are unsigned by type, so
	/// only the missing share can be out of range.
	pub fn invalid_fields(&self) -> Vec<String> {
		let mut fields = Vec::new();

		if !self.max_missing_share.is_finite() || !(0.0..=1.0).contains(&self.max_missing_share) {
			fields.push("$.max_missing_share".to_string());
		}

		fields
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetShape {
	pub n_rows: u64,
	pub n_cols: u64,
}
