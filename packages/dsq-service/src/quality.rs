use std::time::Instant;

use serde::{Deserialize, Serialize};

use dsq_domain::{
	DatasetShape, FeatureSet, FlagSet, Verdict, assess_features, bool_flags, clamp_score,
	is_ok_for_model, score_field,
};

use crate::{IngestError, ParsedDataset, QualityService, TelemetryEvent, Upload};

pub const ENDPOINT_QUALITY: &str = "/quality";
pub const ENDPOINT_QUALITY_FROM_CSV: &str = "/quality-from-csv";
pub const ENDPOINT_QUALITY_FLAGS_FROM_CSV: &str = "/quality-flags-from-csv";

const QUALITY_SCORE_KEY: &str = "quality_score";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityResponse {
	pub ok_for_model: bool,
	pub quality_score: f64,
	pub message: String,
	pub latency_ms: f64,
	pub flags: Option<FlagSet>,
	pub dataset_shape: Option<DatasetShape>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlagsResponse {
	pub flags: FlagSet,
}

impl QualityService {
	/// Scores caller-supplied aggregate features. Range validation happens before this call.
	pub fn quality(&self, features: &FeatureSet) -> QualityResponse {
		let started = Instant::now();
		let assessment = assess_features(features);
		let latency_ms = elapsed_ms(started);

		self.telemetry.emit(
			TelemetryEvent::success(ENDPOINT_QUALITY, latency_ms)
				.with_verdict(assessment.ok_for_model)
				.with_shape(features.shape()),
		);

		QualityResponse {
			ok_for_model: assessment.ok_for_model,
			quality_score: assessment.score,
			message: assessment.message.to_string(),
			latency_ms,
			flags: Some(assessment.flags),
			dataset_shape: Some(features.shape()),
		}
	}

	/// Scores an uploaded CSV with the analyzer's own `quality_score`.
	pub fn quality_from_csv(&self, upload: &Upload<'_>) -> Result<QualityResponse, IngestError> {
		let started = Instant::now();
		let parsed = self.ingest_recorded(ENDPOINT_QUALITY_FROM_CSV, upload, started)?;
		let score = clamp_score(score_field(&parsed.flags_all, QUALITY_SCORE_KEY));
		let ok_for_model = is_ok_for_model(score);
		let latency_ms = elapsed_ms(started);

		self.telemetry.emit(
			TelemetryEvent::success(ENDPOINT_QUALITY_FROM_CSV, latency_ms)
				.with_verdict(ok_for_model)
				.with_shape(parsed.shape()),
		);

		Ok(QualityResponse {
			ok_for_model,
			quality_score: score,
			message: Verdict::Csv.message(ok_for_model).to_string(),
			latency_ms,
			flags: Some(bool_flags(&parsed.flags_all)),
			dataset_shape: Some(parsed.shape()),
		})
	}

	/// Every boolean flag the analyzer produced, with no score or verdict.
	pub fn quality_flags_from_csv(
		&self,
		upload: &Upload<'_>,
	) -> Result<QualityFlagsResponse, IngestError> {
		let started = Instant::now();
		let parsed = self.ingest_recorded(ENDPOINT_QUALITY_FLAGS_FROM_CSV, upload, started)?;
		let flags = bool_flags(&parsed.flags_all);

		self.telemetry.emit(
			TelemetryEvent::success(ENDPOINT_QUALITY_FLAGS_FROM_CSV, elapsed_ms(started))
				.with_shape(parsed.shape()),
		);

		Ok(QualityFlagsResponse { flags })
	}

	fn ingest_recorded(
		&self,
		endpoint: &'static str,
		upload: &Upload<'_>,
		started: Instant,
	) -> Result<ParsedDataset, IngestError> {
		self.ingest(upload).inspect_err(|err| {
			tracing::info!(endpoint, error_code = err.code(), error = %err, "Rejected dataset upload.");

			self.telemetry.emit(TelemetryEvent::error(endpoint, elapsed_ms(started)));
		})
	}
}

fn elapsed_ms(started: Instant) -> f64 {
	started.elapsed().as_secs_f64() * 1_000.0
}
