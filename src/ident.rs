//! Package identifiers as typed on the command line.
//!
//! Accepted forms:
//! - `requests`
//! - `requests/2.31.0`
//! - `https://pypi.org/pypi/requests`
//! - `https://test.pypi.org/pypi/requests/2.31.0`

use crate::error::PackageError;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<index>https?://[^/]+/pypi)/)?(?P<name>[-A-Za-z0-9._]+)(?:/(?P<version>[-A-Za-z0-9._+!]+))?$",
    )
    .expect("identifier regex")
});

/// A parsed `[index-url/]name[/version]` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    /// Index base URL when one was spelled out (e.g. `https://pypi.org/pypi`).
    pub index_url: Option<String>,
    pub name: String,
    pub version: Option<String>,
}

impl PackageRef {
    /// Index to query: the one embedded in the identifier, else `default_index`.
    pub fn index_or<'a>(&'a self, default_index: &'a str) -> &'a str {
        self.index_url.as_deref().unwrap_or(default_index)
    }
}

impl FromStr for PackageRef {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = IDENT_RE
            .captures(s.trim())
            .ok_or_else(|| PackageError::InvalidIdentifier(s.to_string()))?;
        Ok(Self {
            index_url: caps.name("index").map(|m| m.as_str().to_string()),
            name: caps["name"].to_string(),
            version: caps.name("version").map(|m| m.as_str().to_string()),
        })
    }
}
