use dsq_domain::{DatasetShape, FlagMap};
use dsq_eda::{DatasetSummary, MissingReport, Table};

use crate::{IngestError, QualityService};

/// Raw dataset as received from the caller.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
	/// Media type declared by the caller; `None` when it sent none.
	pub content_type: Option<&'a str>,
	pub bytes: &'a [u8],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDataset {
	pub summary: DatasetSummary,
	pub missing: MissingReport,
	pub flags_all: FlagMap,
	pub n_rows: u64,
	pub n_cols: u64,
}
impl ParsedDataset {
	pub fn shape(&self) -> DatasetShape {
		DatasetShape { n_rows: self.n_rows, n_cols: self.n_cols }
	}
}

impl QualityService {
	/// Validates, parses and analyzes an upload. The content type is checked before the bytes
	/// are looked at.
	pub fn ingest(&self, upload: &Upload<'_>) -> Result<ParsedDataset, IngestError> {
		if !self.accepts_content_type(upload.content_type) {
			return Err(IngestError::InvalidContentType {
				content_type: upload.content_type.map(ToString::to_string),
			});
		}

		let table = Table::from_csv(upload.bytes)
			.map_err(|err| IngestError::ParseFailure { detail: err.to_string() })?;

		if table.is_empty() {
			return Err(IngestError::EmptyDataset);
		}

		let summary = self.analyzer.summarize(&table);
		let missing = self.analyzer.missing_table(&table);
		let flags_all = self.analyzer.compute_flags(&summary, &missing, &table);
		let (n_rows, n_cols) = summary.dimensions().unwrap_or_else(|| {
			tracing::debug!("Summary has no dimensions. Falling back to the parsed table.");

			(table.n_rows(), table.n_cols())
		});

		Ok(ParsedDataset {
			summary,
			missing,
			flags_all,
			n_rows: n_rows as u64,
			n_cols: n_cols as u64,
		})
	}

	/// Compares the media type essence (parameters stripped, case-insensitive) to the allow-list.
	pub fn accepts_content_type(&self, content_type: Option<&str>) -> bool {
		let Some(content_type) = content_type else {
			return false;
		};
		let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();

		self.cfg.ingest.allowed_content_types.iter().any(|allowed| allowed == &essence)
	}
}
