pub mod features;
pub mod flags;
pub mod scoring;

pub use features::{DatasetShape, FeatureSet};
pub use flags::{FlagMap, FlagSet, FlagValue, bool_flags, score_field};
pub use scoring::{
	FeatureAssessment, OK_FOR_MODEL_THRESHOLD, Verdict, assess_features, clamp_score,
	is_ok_for_model,
};
