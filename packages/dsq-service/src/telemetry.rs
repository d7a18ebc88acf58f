//! One structured record per request outcome, appended to every configured sink.
//!
//! Records are JSON objects on a single line. Unknown optional fields are left out instead of
//! being written as `null`. A sink that fails to accept a record is reported through `tracing`
//! and skipped; emission never fails the request that triggered it.

use std::{
	fs,
	io::{self, Write},
	path::Path,
	sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use dsq_config::Rotation as RotationConfig;
use dsq_domain::DatasetShape;

use crate::{Error, Result, context};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
	Success,
	Error,
}

/// What an entry point knows about its outcome; identity and time are added on emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryEvent {
	pub endpoint: &'static str,
	pub status: Status,
	pub latency_ms: f64,
	pub ok_for_model: Option<bool>,
	pub shape: Option<DatasetShape>,
}
impl TelemetryEvent {
	pub fn success(endpoint: &'static str, latency_ms: f64) -> Self {
		Self { endpoint, status: Status::Success, latency_ms, ok_for_model: None, shape: None }
	}

	pub fn error(endpoint: &'static str, latency_ms: f64) -> Self {
		Self { endpoint, status: Status::Error, latency_ms, ok_for_model: None, shape: None }
	}

	pub fn with_verdict(self, ok_for_model: bool) -> Self {
		Self { ok_for_model: Some(ok_for_model), ..self }
	}

	pub fn with_shape(self, shape: DatasetShape) -> Self {
		Self { shape: Some(shape), ..self }
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
	pub endpoint: String,
	pub status: Status,
	pub latency_ms: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ok_for_model: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub n_rows: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub n_cols: Option<u64>,
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	pub request_id: String,
}
impl TelemetryRecord {
	pub fn new(event: TelemetryEvent, request_id: String, timestamp: OffsetDateTime) -> Self {
		Self {
			endpoint: event.endpoint.to_string(),
			status: event.status,
			latency_ms: event.latency_ms.max(0.0),
			ok_for_model: event.ok_for_model,
			n_rows: event.shape.map(|shape| shape.n_rows),
			n_cols: event.shape.map(|shape| shape.n_cols),
			timestamp,
			request_id,
		}
	}
}

/// Destination for serialized records. `write_record` receives one complete line without the
/// trailing newline and must write it as a unit.
pub trait TelemetrySink
where
	Self: Send + Sync,
{
	fn name(&self) -> &'static str;

	fn write_record(&self, line: &str) -> io::Result<()>;
}

/// Durable append-only JSON-lines file.
pub struct FileSink {
	appender: Mutex<RollingFileAppender>,
}
impl FileSink {
	pub fn open(dir: &Path, file_name: &str, rotation: RotationConfig) -> Result<Self> {
		let init_error =
			|message: String| Error::TelemetryInit { path: dir.join(file_name), message };

		fs::create_dir_all(dir).map_err(|err| init_error(err.to_string()))?;

		let mut builder = RollingFileAppender::builder().rotation(match rotation {
			RotationConfig::Never => Rotation::NEVER,
			RotationConfig::Hourly => Rotation::HOURLY,
			RotationConfig::Daily => Rotation::DAILY,
		});

		builder = match file_name.rsplit_once('.') {
			Some((prefix, suffix)) if !prefix.is_empty() && !suffix.is_empty() =>
				builder.filename_prefix(prefix).filename_suffix(suffix),
			_ => builder.filename_prefix(file_name),
		};

		let appender = builder.build(dir).map_err(|err| init_error(err.to_string()))?;

		Ok(Self { appender: Mutex::new(appender) })
	}
}

impl TelemetrySink for FileSink {
	fn name(&self) -> &'static str {
		"file"
	}

	fn write_record(&self, line: &str) -> io::Result<()> {
		let mut buf = String::with_capacity(line.len() + 1);

		buf.push_str(line);
		buf.push('\n');

		let mut appender = self.appender.lock().unwrap_or_else(|err| err.into_inner());

		appender.write_all(buf.as_bytes())?;
		appender.flush()
	}
}

/// Live mirror on stdout.
pub struct ConsoleSink;
impl TelemetrySink for ConsoleSink {
	fn name(&self) -> &'static str {
		"console"
	}

	fn write_record(&self, line: &str) -> io::Result<()> {
		let mut stdout = io::stdout().lock();

		writeln!(stdout, "{line}")?;
		stdout.flush()
	}
}

/// Process-lifetime emitter shared by every request.
#[derive(Clone)]
pub struct Telemetry {
	sinks: Arc<[Arc<dyn TelemetrySink>]>,
}
impl Telemetry {
	/// Provisions the log directory and opens the configured sinks. Call once at startup.
	pub fn init(cfg: &dsq_config::Telemetry) -> Result<Self> {
		let mut sinks: Vec<Arc<dyn TelemetrySink>> =
			vec![Arc::new(FileSink::open(&cfg.log_dir, &cfg.file_name, cfg.rotation)?)];

		if cfg.console {
			sinks.push(Arc::new(ConsoleSink));
		}

		tracing::info!(log_dir = ?cfg.log_dir, file_name = %cfg.file_name, console = cfg.console, "Telemetry sinks ready.");

		Ok(Self::with_sinks(sinks))
	}

	pub fn with_sinks(sinks: Vec<Arc<dyn TelemetrySink>>) -> Self {
		Self { sinks: sinks.into() }
	}

	/// Records `event` under the request id of the running call chain.
	pub fn emit(&self, event: TelemetryEvent) {
		let record = TelemetryRecord::new(event, context::current(), OffsetDateTime::now_utc());
		let line = match serde_json::to_string(&record) {
			Ok(line) => line,
			Err(err) => {
				tracing::warn!(error = %err, endpoint = event.endpoint, "Failed to serialize telemetry record.");

				return;
			},
		};

		for sink in self.sinks.iter() {
			if let Err(err) = sink.write_record(&line) {
				tracing::warn!(error = %err, sink = sink.name(), "Telemetry sink write failed.");
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_fields_are_omitted() {
		let record = TelemetryRecord::new(
			TelemetryEvent::error("/quality-from-csv", 1.5),
			"req-1".to_string(),
			OffsetDateTime::UNIX_EPOCH,
		);
		let json = serde_json::to_value(&record).expect("Failed to encode record.");
		let object = json.as_object().expect("Record must be an object.");

		assert_eq!(object.len(), 5);
		assert_eq!(json["status"], "error");
		assert_eq!(json["timestamp"], "1970-01-01T00:00:00Z");
		assert!(!object.contains_key("ok_for_model"));
		assert!(!object.contains_key("n_rows"));
		assert!(!object.contains_key("n_cols"));
	}

	#[test]
	fn known_fields_keep_declared_order() {
		let event = TelemetryEvent::success("/quality", 0.25)
			.with_verdict(true)
			.with_shape(DatasetShape { n_rows: 10, n_cols: 2 });
		let record = TelemetryRecord::new(event, "req-2".to_string(), OffsetDateTime::UNIX_EPOCH);
		let line = serde_json::to_string(&record).expect("Failed to encode record.");

		assert_eq!(
			line,
			r#"{"endpoint":"/quality","status":"success","latency_ms":0.25,"ok_for_model":true,"n_rows":10,"n_cols":2,"timestamp":"1970-01-01T00:00:00Z","request_id":"req-2"}"#
		);
	}

	#[test]
	fn file_sink_appends_lines() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir.");
		let sink = FileSink::open(&dir.path().join("nested"), "api.log", RotationConfig::Never)
			.expect("Failed to open file sink.");

		sink.write_record("{\"a\":1}").expect("Failed to write first record.");
		sink.write_record("{\"a\":2}").expect("Failed to write second record.");

		let raw = fs::read_to_string(dir.path().join("nested").join("api.log"))
			.expect("Failed to read log file.");

		assert_eq!(raw, "{\"a\":1}\n{\"a\":2}\n");
	}
}
