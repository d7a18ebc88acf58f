mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Ingest, Rotation, Service, Telemetry, default_allowed_content_types};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.name", &cfg.service.name),
		("service.http_bind", &cfg.service.http_bind),
		("telemetry.file_name", &cfg.telemetry.file_name),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.telemetry.log_dir.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "telemetry.log_dir must be non-empty.".to_string(),
		});
	}
	if cfg.telemetry.file_name.contains(['/', '\\']) {
		return Err(Error::Validation {
			message: "telemetry.file_name must be a bare file name.".to_string(),
		});
	}
	if cfg.ingest.allowed_content_types.is_empty() {
		return Err(Error::Validation {
			message: "ingest.allowed_content_types must list at least one content type."
				.to_string(),
		});
	}
	if cfg.ingest.max_upload_bytes == 0 {
		return Err(Error::Validation {
			message: "ingest.max_upload_bytes must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.name = cfg.service.name.trim().to_string();
	cfg.telemetry.file_name = cfg.telemetry.file_name.trim().to_string();

	let mut allowed = Vec::with_capacity(cfg.ingest.allowed_content_types.len());

	for value in &cfg.ingest.allowed_content_types {
		let value = value.trim().to_ascii_lowercase();

		if !value.is_empty() && !allowed.contains(&value) {
			allowed.push(value);
		}
	}

	cfg.ingest.allowed_content_types = allowed;
}
