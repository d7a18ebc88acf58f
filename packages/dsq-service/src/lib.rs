pub mod context;
pub mod ingest;
pub mod quality;
pub mod telemetry;
pub mod time_serde;

mod error;

use std::sync::Arc;

pub use context::{RequestContext, UNKNOWN_REQUEST_ID};
pub use error::{Error, IngestError, Result};
pub use ingest::{ParsedDataset, Upload};
pub use quality::{
	ENDPOINT_QUALITY, ENDPOINT_QUALITY_FLAGS_FROM_CSV, ENDPOINT_QUALITY_FROM_CSV,
	QualityFlagsResponse, QualityResponse,
};
pub use telemetry::{
	ConsoleSink, FileSink, Status, Telemetry, TelemetryEvent, TelemetryRecord, TelemetrySink,
};

use dsq_config::Config;
use dsq_domain::FlagMap;
use dsq_eda::{DatasetSummary, MissingReport, Table};

/// Dataset analysis consumed by the ingestion pipeline.
pub trait DatasetAnalyzer
where
	Self: Send + Sync,
{
	fn summarize(&self, table: &Table) -> DatasetSummary;

	fn missing_table(&self, table: &Table) -> MissingReport;

	/// Must include a numeric `quality_score` entry for the CSV score path.
	fn compute_flags(
		&self,
		summary: &DatasetSummary,
		missing: &MissingReport,
		table: &Table,
	) -> FlagMap;
}

/// [`DatasetAnalyzer`] backed by the `dsq-eda` heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdaAnalyzer;
impl DatasetAnalyzer for EdaAnalyzer {
	fn summarize(&self, table: &Table) -> DatasetSummary {
		dsq_eda::summarize(table)
	}

	fn missing_table(&self, table: &Table) -> MissingReport {
		dsq_eda::missing_table(table)
	}

	fn compute_flags(
		&self,
		summary: &DatasetSummary,
		missing: &MissingReport,
		table: &Table,
	) -> FlagMap {
		dsq_eda::compute_flags(summary, missing, table)
	}
}

pub struct QualityService {
	pub cfg: Config,
	pub telemetry: Telemetry,
	pub analyzer: Arc<dyn DatasetAnalyzer>,
}
impl QualityService {
	pub fn new(cfg: Config, telemetry: Telemetry) -> Self {
		Self { cfg, telemetry, analyzer: Arc::new(EdaAnalyzer) }
	}

	pub fn with_analyzer(
		cfg: Config,
		telemetry: Telemetry,
		analyzer: Arc<dyn DatasetAnalyzer>,
	) -> Self {
		Self { cfg, telemetry, analyzer }
	}
}
