//! Request construction.
//!
//! A [`RequestDescriptor`] is the immutable description of one GET call: a
//! validated base endpoint, the path levels appended to it and the query
//! parameters, in insertion order. Nothing here performs I/O.
//!
//! ```rust
//! use feedpluck_core::RequestDescriptor;
//!
//! let descriptor = RequestDescriptor::build(
//!     "https://now-api.parliament.uk/api/",
//!     ["Message/message", "LordsMain", "2025-05-20T15:00:00Z"],
//!     None,
//! )
//! .expect("valid base");
//!
//! assert_eq!(
//!     descriptor.url().as_str(),
//!     "https://now-api.parliament.uk/api/Message/message/LordsMain/2025-05-20T15:00:00Z"
//! );
//! ```

use std::fmt::{Display, Formatter};

use url::Url;

use crate::http_client::HttpRequest;
use crate::RequestError;

/// Fully-qualified description of a GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    base: Url,
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Validates `base` and appends every segment and query pair.
    ///
    /// A `/` inside a segment separates path levels. Use
    /// [`RequestDescriptor::literal_segment`] for values whose `/` is data.
    pub fn build<I, S>(
        base: &str,
        segments: I,
        query: Option<&[(&str, &str)]>,
    ) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut descriptor = segments
            .into_iter()
            .try_fold(Self::new(base)?, |descriptor, segment| {
                descriptor.segment(segment.as_ref())
            })?;

        if let Some(pairs) = query {
            for (name, value) in pairs {
                descriptor = descriptor.query(*name, *value);
            }
        }

        Ok(descriptor)
    }

    /// Descriptor for `base` with no extra segments or query pairs.
    pub fn new(base: &str) -> Result<Self, RequestError> {
        let trimmed = base.trim();
        if trimmed.is_empty() {
            return Err(RequestError::EmptyBase);
        }

        let parsed = Url::parse(trimmed).map_err(|error| RequestError::InvalidBase {
            value: trimmed.to_owned(),
            reason: error.to_string(),
        })?;

        if parsed.cannot_be_a_base() {
            return Err(RequestError::OpaqueBase {
                value: trimmed.to_owned(),
            });
        }

        Ok(Self {
            base: parsed,
            segments: Vec::new(),
            query: Vec::new(),
        })
    }

    /// Appends one or more path levels, splitting on `/` and skipping empty levels.
    ///
    /// `.` and `..` levels are rejected: URL resolution would collapse them.
    pub fn segment(mut self, segment: &str) -> Result<Self, RequestError> {
        for level in segment.split('/').filter(|level| !level.is_empty()) {
            self.segments.push(check_level(level)?.to_owned());
        }
        Ok(self)
    }

    /// Appends a single path level; any `/` in `value` is percent-encoded.
    pub fn literal_segment(mut self, value: impl Into<String>) -> Result<Self, RequestError> {
        let value = value.into();
        check_level(&value)?;
        self.segments.push(value);
        Ok(self)
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// Unescaped path levels in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Resolved URL with every segment and query value escaped.
    pub fn url(&self) -> Url {
        let mut url = self.base.clone();

        if !self.segments.is_empty() {
            // `new` rejected cannot-be-a-base URLs, so this always succeeds.
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(&self.segments);
            }
        }

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }

        url
    }

    /// GET request for this descriptor.
    pub fn to_http_request(&self) -> HttpRequest {
        HttpRequest::get(self.url().as_str())
    }
}

/// Dot levels cannot be escaped either: `%2E` and `%2E%2E` are dot segments
/// to the URL parser too.
fn check_level(level: &str) -> Result<&str, RequestError> {
    match level {
        "." | ".." => Err(RequestError::DotSegment {
            segment: level.to_owned(),
        }),
        other => Ok(other),
    }
}

impl Display for RequestDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url().as_str())
    }
}
