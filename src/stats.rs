//! Release history aggregation: per-version totals, extremes, and averages.

use crate::error::{PackageError, Result};
use crate::models::{DownloadWindows, Release};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One release that has at least one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRecord {
    pub version: String,
    /// Upload time of the first listed file, if the index reported one.
    pub upload_time: Option<NaiveDateTime>,
    /// Sum of the download counts of all files in the release.
    pub downloads: u64,
}

/// A version paired with its download count.
///
/// `version` is `None` only for the sentinel returned by
/// [`ReleaseHistory::min_version`] / [`ReleaseHistory::max_version`] on an
/// empty history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionCount {
    pub version: Option<String>,
    pub downloads: u64,
}

impl VersionCount {
    pub fn is_sentinel(&self) -> bool {
        self.version.is_none()
    }
}

/// Releases ordered by the upload time of their first file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseHistory {
    records: Vec<ReleaseRecord>,
}

impl ReleaseHistory {
    /// Drop releases without files and sort the rest by first-file upload time.
    ///
    /// The sort is stable: releases uploaded at the same instant keep the order
    /// the index listed them in. Releases whose first file carries no
    /// timestamp go last.
    pub fn from_releases(releases: &[Release]) -> Result<Self> {
        let mut records = Vec::with_capacity(releases.len());
        for release in releases {
            let Some(first) = release.files.first() else {
                continue;
            };
            let upload_time = first
                .upload_time
                .as_deref()
                .map(|raw| {
                    parse_upload_time(raw).map_err(|source| PackageError::DateParse {
                        version: release.version.clone(),
                        value: raw.to_string(),
                        source,
                    })
                })
                .transpose()?;
            records.push(ReleaseRecord {
                version: release.version.clone(),
                upload_time,
                downloads: release.files.iter().map(|f| f.downloads).sum(),
            });
        }
        records.sort_by_key(|r| (r.upload_time.is_none(), r.upload_time));
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReleaseRecord> {
        self.records.iter()
    }

    /// Version -> download count, in history order.
    pub fn downloads_per_version(&self) -> Vec<(String, u64)> {
        self.records
            .iter()
            .map(|r| (r.version.clone(), r.downloads))
            .collect()
    }

    pub fn total_downloads(&self) -> u64 {
        self.records.iter().map(|r| r.downloads).sum()
    }

    /// Version with the fewest downloads; the earliest one wins a tie.
    pub fn min_version(&self) -> VersionCount {
        self.scan(|candidate, best| candidate < best)
    }

    /// Version with the most downloads; the earliest one wins a tie.
    pub fn max_version(&self) -> VersionCount {
        self.scan(|candidate, best| candidate > best)
    }

    fn scan(&self, better: impl Fn(u64, u64) -> bool) -> VersionCount {
        let mut iter = self.records.iter();
        let Some(first) = iter.next() else {
            return VersionCount::default();
        };
        let best = iter.fold(first, |best, r| {
            if better(r.downloads, best.downloads) { r } else { best }
        });
        VersionCount {
            version: Some(best.version.clone()),
            downloads: best.downloads,
        }
    }

    /// Mean downloads per distinct version, truncated toward zero.
    pub fn average_downloads(&self) -> Result<u64> {
        let mut versions: Vec<&str> = self.records.iter().map(|r| r.version.as_str()).collect();
        versions.sort_unstable();
        versions.dedup();
        self.total_downloads()
            .checked_div(versions.len() as u64)
            .ok_or(PackageError::DivisionByZero)
    }

    /// Version -> upload time of its first file, for releases that have one.
    pub fn version_dates(&self) -> Vec<(String, NaiveDateTime)> {
        self.records
            .iter()
            .filter_map(|r| r.upload_time.map(|t| (r.version.clone(), t)))
            .collect()
    }
}

/// Derived statistics for one package. Built once by [`aggregate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub history: ReleaseHistory,
    pub total_downloads: u64,
    pub min_version: VersionCount,
    pub max_version: VersionCount,
    pub average_downloads: u64,
    /// Upstream last day/week/month counts, not derived from `history`.
    pub windows: DownloadWindows,
}

impl Metrics {
    /// Compute metrics from an already-built history.
    ///
    /// An empty history is reported as [`PackageError::NoReleases`] before the
    /// average is attempted.
    pub fn from_history(history: ReleaseHistory, windows: DownloadWindows) -> Result<Self> {
        let min_version = history.min_version();
        let max_version = history.max_version();
        if min_version.is_sentinel() || max_version.is_sentinel() {
            return Err(PackageError::NoReleases);
        }
        let average_downloads = history.average_downloads()?;
        Ok(Self {
            total_downloads: history.total_downloads(),
            min_version,
            max_version,
            average_downloads,
            windows,
            history,
        })
    }
}

/// Build [`Metrics`] from the raw releases of a payload.
pub fn aggregate(releases: &[Release], windows: DownloadWindows) -> Result<Metrics> {
    let history = ReleaseHistory::from_releases(releases)?;
    Metrics::from_history(history, windows)
}

/// Parse an index upload timestamp.
///
/// Accepts RFC 3339 (offset is dropped after conversion to UTC), ISO 8601
/// without offset (`T` or space separated, optional fraction), and a bare date.
pub fn parse_upload_time(raw: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReleaseFile;

    fn file(downloads: u64, upload_time: &str) -> ReleaseFile {
        ReleaseFile {
            downloads,
            upload_time: Some(upload_time.into()),
        }
    }

    #[test]
    fn parses_supported_timestamp_shapes() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(parse_upload_time("2020-01-02T03:04:05").unwrap(), expected);
        assert_eq!(parse_upload_time("2020-01-02 03:04:05").unwrap(), expected);
        assert_eq!(parse_upload_time("2020-01-02T03:04:05Z").unwrap(), expected);
        assert_eq!(
            parse_upload_time("2020-01-02T05:04:05+02:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_upload_time("2020-01-02T03:04:05.123456").unwrap().date(),
            expected.date()
        );
        assert_eq!(
            parse_upload_time("2020-01-02").unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 2)
                .unwrap()
                .and_time(chrono::NaiveTime::MIN)
        );
        assert!(parse_upload_time("last tuesday").is_err());
    }

    #[test]
    fn only_first_file_orders_a_release() {
        let releases = vec![
            Release::new("b", vec![file(1, "2020-03-01"), file(1, "2019-01-01")]),
            Release::new("a", vec![file(1, "2020-02-01")]),
        ];
        let h = ReleaseHistory::from_releases(&releases).unwrap();
        let order: Vec<_> = h.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(order, ["a", "b"]);
    }

    #[test]
    fn undated_releases_sort_last_in_input_order() {
        let undated = |v: &str| {
            Release::new(
                v,
                vec![ReleaseFile {
                    downloads: 2,
                    upload_time: None,
                }],
            )
        };
        let releases = vec![
            undated("x"),
            Release::new("late", vec![file(1, "2021-01-01")]),
            undated("y"),
            Release::new("early", vec![file(1, "2020-01-01")]),
        ];
        let h = ReleaseHistory::from_releases(&releases).unwrap();
        let order: Vec<_> = h.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(order, ["early", "late", "x", "y"]);
        assert_eq!(h.version_dates().len(), 2);
        assert_eq!(h.total_downloads(), 6);
    }

    #[test]
    fn ties_pick_first_encountered() {
        let releases = vec![
            Release::new("1", vec![file(5, "2020-01-01")]),
            Release::new("2", vec![file(9, "2020-01-02")]),
            Release::new("3", vec![file(5, "2020-01-03")]),
            Release::new("4", vec![file(9, "2020-01-04")]),
        ];
        let h = ReleaseHistory::from_releases(&releases).unwrap();
        assert_eq!(h.min_version().version.as_deref(), Some("1"));
        assert_eq!(h.max_version().version.as_deref(), Some("2"));
    }

    #[test]
    fn empty_history_yields_sentinels_and_guarded_average() {
        let h = ReleaseHistory::from_releases(&[Release::new("0.1", vec![])]).unwrap();
        assert!(h.is_empty());
        assert_eq!(h.total_downloads(), 0);
        assert!(h.min_version().is_sentinel());
        assert_eq!(h.max_version(), VersionCount::default());
        assert!(matches!(
            h.average_downloads(),
            Err(PackageError::DivisionByZero)
        ));
        assert!(matches!(
            Metrics::from_history(h, DownloadWindows::default()),
            Err(PackageError::NoReleases)
        ));
    }
}
