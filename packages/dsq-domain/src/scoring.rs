//! Fixed heuristics deciding whether a dataset is ready for model training.
//!
//! The score deductions and the diagnostic flags use independent thresholds: the score subtracts
//! the missing share directly while `too_many_missing` only fires past one half. Both are
//! observable outputs and must not be reconciled.

use crate::{FeatureSet, FlagSet};

/// Lowest score, inclusive, that is still considered fit for training.
pub const OK_FOR_MODEL_THRESHOLD: f64 = 0.7;

pub const MIN_ROWS: u64 = 1_000;
pub const MAX_COLS: u64 = 100;
pub const MAX_MISSING_SHARE: f64 = 0.5;

const FEW_ROWS_PENALTY: f64 = 0.2;
const WIDE_PENALTY: f64 = 0.1;
const ONLY_CATEGORICAL_PENALTY: f64 = 0.1;
const ONLY_NUMERIC_PENALTY: f64 = 0.05;

const FEATURES_OK_MESSAGE: &str =
	"Dataset looks sufficient for model training (by current heuristics).";
const FEATURES_NOT_OK_MESSAGE: &str =
	"Dataset quality is insufficient; rework needed (by current heuristics).";
const CSV_OK_MESSAGE: &str = "CSV looks good enough for model training (by current heuristics).";
const CSV_NOT_OK_MESSAGE: &str = "CSV needs rework before model training (by current heuristics).";

/// Which surface produced a score; selects the verdict wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
	Features,
	Csv,
}
impl Verdict {
	pub fn message(self, ok_for_model: bool) -> &'static str {
		match (self, ok_for_model) {
			(Self::Features, true) => FEATURES_OK_MESSAGE,
			(Self::Features, false) => FEATURES_NOT_OK_MESSAGE,
			(Self::Csv, true) => CSV_OK_MESSAGE,
			(Self::Csv, false) => CSV_NOT_OK_MESSAGE,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureAssessment {
	pub score: f64,
	pub ok_for_model: bool,
	pub message: &'static str,
	pub flags: FlagSet,
}

pub fn assess_features(features: &FeatureSet) -> FeatureAssessment {
	let score = clamp_score(raw_score(features));
	let ok_for_model = is_ok_for_model(score);

	FeatureAssessment {
		score,
		ok_for_model,
		message: Verdict::Features.message(ok_for_model),
		flags: feature_flags(features),
	}
}

pub fn clamp_score(score: f64) -> f64 {
	score.clamp(0.0, 1.0)
}

pub fn is_ok_for_model(score: f64) -> bool {
	score >= OK_FOR_MODEL_THRESHOLD
}

fn raw_score(features: &FeatureSet) -> f64 {
	let mut score = 1.0;

	score -= features.max_missing_share;

	if features.n_rows < MIN_ROWS {
		score -= FEW_ROWS_PENALTY;
	}
	if features.n_cols > MAX_COLS {
		score -= WIDE_PENALTY;
	}
	if features.numeric_cols == 0 && features.categorical_cols > 0 {
		score -= ONLY_CATEGORICAL_PENALTY;
	}
	if features.categorical_cols == 0 && features.numeric_cols > 0 {
		score -= ONLY_NUMERIC_PENALTY;
	}

	score
}

fn feature_flags(features: &FeatureSet) -> FlagSet {
	FlagSet::from([
		("too_few_rows".to_string(), features.n_rows < MIN_ROWS),
		("too_many_columns".to_string(), features.n_cols > MAX_COLS),
		("too_many_missing".to_string(), features.max_missing_share > MAX_MISSING_SHARE),
		("no_numeric_columns".to_string(), features.numeric_cols == 0),
		("no_categorical_columns".to_string(), features.categorical_cols == 0),
	])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn both_type_penalties_never_apply_together() {
		let only_numeric = FeatureSet {
			n_rows: 5_000,
			n_cols: 4,
			max_missing_share: 0.0,
			numeric_cols: 4,
			categorical_cols: 0,
		};
		let only_categorical = FeatureSet { numeric_cols: 0, categorical_cols: 4, ..only_numeric };
		let empty = FeatureSet { numeric_cols: 0, categorical_cols: 0, ..only_numeric };

		assert_eq!(raw_score(&only_numeric), 0.95);
		assert_eq!(raw_score(&only_categorical), 0.9);
		assert_eq!(raw_score(&empty), 1.0);
	}

	#[test]
	fn messages_follow_verdict() {
		assert_ne!(Verdict::Features.message(true), Verdict::Features.message(false));
		assert_ne!(Verdict::Csv.message(true), Verdict::Features.message(true));
	}
}
