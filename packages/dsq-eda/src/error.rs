pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Csv(#[from] csv::Error),
	#[error("No columns to parse from file.")]
	NoColumns,
	#[error("Expected {expected} fields in line {line}, saw {found}.")]
	TooManyFields { line: u64, expected: usize, found: usize },
}
