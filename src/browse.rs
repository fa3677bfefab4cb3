//! `pypi browse`: pick a package URL and hand it to the system browser.

use crate::error::{PackageError, Result};
use crate::models::PackageInfo;
use std::process::{Command, Stdio};

/// Which page of a package to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseTarget {
    /// The package's page on the index.
    IndexPage,
    /// The homepage the package declares in its metadata.
    Homepage,
}

/// Pick the URL for `target` from the package metadata.
///
/// Blank URLs (the index reports `""` or `"UNKNOWN"` for unset homepages)
/// count as missing.
pub fn target_url(name: &str, info: &PackageInfo, target: BrowseTarget) -> Result<String> {
    let (url, what) = match target {
        BrowseTarget::IndexPage => (info.package_url.as_deref(), "package URL"),
        BrowseTarget::Homepage => (info.home_page.as_deref(), "homepage"),
    };
    url.map(str::trim)
        .filter(|u| !u.is_empty() && !u.eq_ignore_ascii_case("UNKNOWN"))
        .map(str::to_string)
        .ok_or_else(|| PackageError::MissingUrl {
            name: name.to_string(),
            what,
        })
}

#[cfg(target_os = "macos")]
fn opener() -> Command {
    Command::new("open")
}

#[cfg(target_os = "windows")]
fn opener() -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener() -> Command {
    Command::new("xdg-open")
}

/// Open `url` with the platform's default handler.
pub fn launch(url: &str) -> Result<()> {
    let mut cmd = opener();
    log::debug!("launching {:?} {url}", cmd.get_program());
    cmd.arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}
