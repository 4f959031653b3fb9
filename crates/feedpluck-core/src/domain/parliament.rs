use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{RequestError, Timestamp};

/// Chamber display exposed by the annunciator API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Annunciator {
    CommonsMain,
    LordsMain,
}

impl Annunciator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommonsMain => "CommonsMain",
            Self::LordsMain => "LordsMain",
        }
    }
}

impl Display for Annunciator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Annunciator {
    type Err = RequestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "commonsmain" | "commons" => Ok(Self::CommonsMain),
            "lordsmain" | "lords" => Ok(Self::LordsMain),
            _ => Err(RequestError::UnknownAnnunciator {
                value: value.to_owned(),
            }),
        }
    }
}

/// Which message to ask for: the live one or the one shown at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnunciatorDate {
    Current,
    At(Timestamp),
}

impl AnnunciatorDate {
    /// Path segment for the message endpoint.
    pub fn to_segment(self) -> String {
        match self {
            Self::Current => String::from("current"),
            Self::At(timestamp) => timestamp.format_rfc3339(),
        }
    }
}

impl FromStr for AnnunciatorDate {
    type Err = RequestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("current") {
            return Ok(Self::Current);
        }
        Timestamp::parse_iso8601(value).map(Self::At)
    }
}

/// Member shown on an annunciator line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub name_full_title: String,
    pub id: u64,
}
