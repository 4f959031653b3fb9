use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::RequestError;

/// RFC3339 instant. The source offset is kept; equality compares instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn parse(input: &str) -> Result<Self, RequestError> {
        OffsetDateTime::parse(input.trim(), &Rfc3339)
            .map(Self)
            .map_err(|_| RequestError::InvalidTimestamp {
                value: input.to_owned(),
            })
    }

    /// Like [`Timestamp::parse`], but also takes other ISO-8601 forms; a
    /// value without an offset is read as UTC.
    pub fn parse_iso8601(input: &str) -> Result<Self, RequestError> {
        let trimmed = input.trim();
        Self::parse(trimmed)
            .or_else(|_| OffsetDateTime::parse(trimmed, &Iso8601::DEFAULT).map(Self))
            .or_else(|_| {
                PrimitiveDateTime::parse(trimmed, &Iso8601::DEFAULT)
                    .map(|local| Self(local.assume_utc()))
            })
            .map_err(|_| RequestError::InvalidTimestamp {
                value: input.to_owned(),
            })
    }

    pub const fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value)
    }

    pub const fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub const fn offset(self) -> UtcOffset {
        self.0.offset()
    }

    /// Same instant expressed in UTC.
    pub fn to_utc(self) -> Self {
        Self(self.0.to_offset(UtcOffset::UTC))
    }

    pub fn unix_timestamp(self) -> i64 {
        self.0.unix_timestamp()
    }

    pub fn format_rfc3339(self) -> String {
        // Only years outside 0..=9999 fail to format, and parse never yields those.
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.0.unix_timestamp().to_string())
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_utc_timestamp() {
        let parsed = Timestamp::parse("2025-05-20T15:00:00Z").expect("must parse");
        assert_eq!(parsed.format_rfc3339(), "2025-05-20T15:00:00Z");
    }

    #[test]
    fn keeps_source_offset_and_compares_instants() {
        let local = Timestamp::parse("2025-05-20T11:00:00-04:00").expect("must parse");
        let utc = Timestamp::parse("2025-05-20T15:00:00Z").expect("must parse");

        assert_eq!(local.format_rfc3339(), "2025-05-20T11:00:00-04:00");
        assert_eq!(local, utc);
        assert_eq!(local.to_utc().format_rfc3339(), "2025-05-20T15:00:00Z");
    }

    #[test]
    fn iso8601_without_offset_reads_as_utc() {
        let parsed = Timestamp::parse_iso8601("2025-05-20T15:00:00").expect("must parse");
        assert_eq!(parsed.format_rfc3339(), "2025-05-20T15:00:00Z");

        let offset = Timestamp::parse_iso8601("2025-05-20T11:00:00-04:00").expect("must parse");
        assert_eq!(offset, parsed);

        assert!(Timestamp::parse("2025-05-20T15:00:00").is_err());
        assert!(Timestamp::parse_iso8601("20 May 2025").is_err());
    }

    #[test]
    fn rejects_non_rfc3339_input() {
        let err = Timestamp::parse("20 May 2025").expect_err("must fail");
        assert!(matches!(err, RequestError::InvalidTimestamp { .. }));
    }
}
