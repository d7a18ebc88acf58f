//! RFC 3339 UTC timestamps truncated to microseconds, always with a `Z` suffix.

use serde::{Deserialize, Deserializer, Serializer, de, ser};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let utc = value.to_offset(UtcOffset::UTC);
	let truncated =
		utc.replace_nanosecond(utc.microsecond() * 1_000).map_err(ser::Error::custom)?;
	let formatted = truncated.format(&Rfc3339).map_err(ser::Error::custom)?;

	serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	OffsetDateTime::parse(&raw, &Rfc3339).map_err(de::Error::custom)
}
