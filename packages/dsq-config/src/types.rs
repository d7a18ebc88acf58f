use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub telemetry: Telemetry,
	pub ingest: Ingest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	/// Reported as `service` by the health endpoint.
	pub name: String,
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Telemetry {
	/// Created once at startup if missing.
	pub log_dir: PathBuf,
	pub file_name: String,
	#[serde(default)]
	pub rotation: Rotation,
	/// Mirror every record to stdout.
	#[serde(default = "default_console")]
	pub console: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
	#[default]
	Never,
	Hourly,
	Daily,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ingest {
	/// Content-type hints accepted for uploaded tables. Compared against the
	/// media type essence, lowercased.
	#[serde(default = "default_allowed_content_types")]
	pub allowed_content_types: Vec<String>,
	#[serde(default = "default_max_upload_bytes")]
	pub max_upload_bytes: usize,
}

fn default_console() -> bool {
	true
}

pub fn default_allowed_content_types() -> Vec<String> {
	["text/csv", "application/vnd.ms-excel", "application/octet-stream"]
		.into_iter()
		.map(str::to_string)
		.collect()
}

fn default_max_upload_bytes() -> usize {
	10 * 1_024 * 1_024
}
