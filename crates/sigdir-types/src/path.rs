use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of a discovered file relative to the basis directory.
///
/// Normalization rules are strict so that re-rooting reproduces the original nesting:
/// - segments are joined with forward slashes (`/`) in the stored form
/// - never empty, never absolute
/// - no `.`, `..` or empty segments
///
/// Segment contents are kept verbatim. No escaping is applied, so names containing
/// `%`, `#`, spaces or non-ASCII characters survive unchanged.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelativePath(String);

impl RelativePath {
    /// Build from individual path segments.
    ///
    /// Returns `None` when there are no segments or any segment is not a plain name.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for segment in segments {
            let segment = segment.as_ref();
            if !is_plain_segment(segment) {
                return None;
            }
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(segment);
        }
        if out.is_empty() { None } else { Some(Self(out)) }
    }

    /// Parse the stored `/`-separated form.
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_segments(s.split('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// The same path using the host separator, ready to be joined onto a root.
    pub fn to_host_path(&self) -> Utf8PathBuf {
        self.segments().collect()
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('/')
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RelativePath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RelativePath::parse(&value).ok_or_else(|| format!("not a plain relative path: {value:?}"))
    }
}

impl From<RelativePath> for String {
    fn from(value: RelativePath) -> Self {
        value.0
    }
}
