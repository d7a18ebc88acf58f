use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Boolean diagnostics keyed by flag name.
pub type FlagSet = BTreeMap<String, bool>;

/// Raw analyzer output: booleans mixed with numeric and textual diagnostics.
pub type FlagMap = BTreeMap<String, FlagValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
	Bool(bool),
	Number(f64),
	Text(String),
}
impl FlagValue {
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Numeric reading of the value. Booleans count as `1.0`/`0.0`; text must parse.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
			Self::Number(value) => Some(*value),
			Self::Text(value) => value.trim().parse().ok(),
		}
	}
}

impl From<bool> for FlagValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for FlagValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

/// Keeps only the boolean-valued entries.
pub fn bool_flags(flags: &FlagMap) -> FlagSet {
	flags.iter().filter_map(|(key, value)| value.as_bool().map(|flag| (key.clone(), flag))).collect()
}

/// Numeric field of an analyzer output, `0.0` when absent or unreadable. Not clamped.
pub fn score_field(flags: &FlagMap, key: &str) -> f64 {
	flags.get(key).and_then(FlagValue::as_f64).filter(|value| !value.is_nan()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> FlagMap {
		FlagMap::from([
			("too_few_rows".to_string(), FlagValue::Bool(true)),
			("has_constant_columns".to_string(), FlagValue::Bool(false)),
			("quality_score".to_string(), FlagValue::Number(0.42)),
			("max_missing_share".to_string(), FlagValue::Number(0.1)),
			("note".to_string(), FlagValue::Text("ok".to_string())),
		])
	}

	#[test]
	fn bool_flags_drop_other_variants() {
		let flags = bool_flags(&sample());

		assert_eq!(flags.len(), 2);
		assert_eq!(flags.get("too_few_rows"), Some(&true));
		assert_eq!(flags.get("has_constant_columns"), Some(&false));
		assert!(!flags.contains_key("quality_score"));
		assert!(!flags.contains_key("note"));
	}

	#[test]
	fn score_field_reads_numbers_and_defaults() {
		let mut flags = sample();

		assert_eq!(score_field(&flags, "quality_score"), 0.42);
		assert_eq!(score_field(&flags, "missing"), 0.0);
		assert_eq!(score_field(&flags, "note"), 0.0);
		assert_eq!(score_field(&flags, "too_few_rows"), 1.0);

		flags.insert("quality_score".to_string(), FlagValue::Text(" 0.75 ".to_string()));

		assert_eq!(score_field(&flags, "quality_score"), 0.75);
	}

	#[test]
	fn conversions_pick_the_matching_variant() {
		assert_eq!(FlagValue::from(true), FlagValue::Bool(true));
		assert_eq!(FlagValue::from(0.25), FlagValue::Number(0.25));
	}

	#[test]
	fn untagged_values_round_trip_through_json() {
		let json = serde_json::json!({ "a": true, "b": 0.5, "c": "x" });
		let flags: FlagMap = serde_json::from_value(json).expect("Failed to decode flags.");

		assert_eq!(flags["a"], FlagValue::Bool(true));
		assert_eq!(flags["b"], FlagValue::Number(0.5));
		assert_eq!(flags["c"], FlagValue::Text("x".to_string()));
	}
}
