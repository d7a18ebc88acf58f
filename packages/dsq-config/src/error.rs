use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Startup failures; each message names the file or key to correct.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read dataset-quality config {path:?}: {source}")]
	ReadConfig { path: PathBuf, source: std::io::Error },
	#[error("Invalid dataset-quality config {path:?}: {source}")]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error("Invalid dataset-quality config: {message}")]
	Validation { message: String },
}
