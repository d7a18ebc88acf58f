pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to initialize telemetry sink at {path:?}: {message}")]
	TelemetryInit { path: std::path::PathBuf, message: String },
}

/// Reasons an uploaded dataset is rejected. All of them are correctable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
	#[error("Expected a CSV file (content-type text/csv).")]
	InvalidContentType { content_type: Option<String> },
	#[error("Failed to read CSV: {detail}")]
	ParseFailure { detail: String },
	#[error("CSV file contains no data (empty table).")]
	EmptyDataset,
}
impl IngestError {
	pub fn code(&self) -> &'static str {
		match self {
			Self::InvalidContentType { .. } => "INVALID_CONTENT_TYPE",
			Self::ParseFailure { .. } => "PARSE_FAILURE",
			Self::EmptyDataset => "EMPTY_DATASET",
		}
	}
}
