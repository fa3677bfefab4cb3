use serde::{Deserialize, Serialize};

/// Top-level JSON document served at `{index}/{name}/json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackagePayload {
    #[serde(default)]
    pub info: PackageInfo,
    /// Releases in the order the index listed them.
    #[serde(default, deserialize_with = "de_releases_in_order")]
    pub releases: Vec<Release>,
}

/// The `info` section. Only the fields this crate reads are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackageInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub package_url: Option<String>,
    #[serde(default)]
    pub home_page: Option<String>,
    #[serde(default, deserialize_with = "de_windows_or_default")]
    pub downloads: DownloadWindows,
}

/// Last day/week/month download totals, passed through as reported upstream.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownloadWindows {
    #[serde(default, deserialize_with = "de_count")]
    pub last_day: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub last_week: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub last_month: u64,
}

/// One uploaded distribution file (sdist, wheel, ...) of a release.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReleaseFile {
    #[serde(default, deserialize_with = "de_count")]
    pub downloads: u64,
    #[serde(default)]
    pub upload_time: Option<String>,
}

/// A published version and the files uploaded for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Release {
    pub version: String,
    pub files: Vec<ReleaseFile>,
}

impl Release {
    pub fn new(version: impl Into<String>, files: Vec<ReleaseFile>) -> Self {
        Self {
            version: version.into(),
            files,
        }
    }
}

/// Serde helper: parse a download count from a JSON number or a string.
///
/// The index reports `-1` when it no longer tracks a counter; negative values
/// are normalized to `0`.
fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer download count")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(u64::try_from(v).unwrap_or(0))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let v = s.trim().parse::<i64>().map_err(E::custom)?;
            self.visit_i64(v)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

/// `info.downloads` is sometimes `null`; treat that like an absent section.
fn de_windows_or_default<'de, D>(deserializer: D) -> Result<DownloadWindows, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<DownloadWindows>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde helper: read the `releases` object into a `Vec`, keeping key order.
///
/// Release ordering ties are broken by the order the index listed them, which a
/// sorted map would lose.
fn de_releases_in_order<'de, D>(deserializer: D) -> Result<Vec<Release>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{MapAccess, Visitor};
    struct ReleasesVisitor;

    impl<'de> Visitor<'de> for ReleasesVisitor {
        type Value = Vec<Release>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "an object mapping versions to lists of files")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((version, files)) = map.next_entry::<String, Vec<ReleaseFile>>()? {
                out.push(Release { version, files });
            }
            Ok(out)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(ReleasesVisitor)
}
