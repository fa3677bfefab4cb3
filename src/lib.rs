//! pypi_rs
//!
//! A lightweight Rust library for retrieving and summarizing download statistics
//! of Python packages from a package index. Pairs with the `pypi` CLI.
//!
//! ### Features
//! - Fetch a package's release and download history from the index JSON API
//! - Aggregate per-version totals, min/max/average downloads
//! - Render a terminal bar chart of downloads by version
//! - Open a package's index page or homepage in the browser
//!
//! ### Example
//! ```no_run
//! use pypi_rs::{Client, chart, stats};
//!
//! let client = Client::default();
//! let payload = client.fetch("requests")?;
//! let metrics = stats::aggregate(&payload.releases, payload.info.downloads)?;
//! println!("{}", chart::version_chart(&metrics.history, 100, false));
//! println!("total: {}", metrics.total_downloads);
//! # Ok::<(), pypi_rs::PackageError>(())
//! ```

pub mod api;
pub mod browse;
pub mod chart;
pub mod error;
pub mod ident;
pub mod models;
pub mod report;
pub mod stats;
pub mod term;

pub use api::Client;
pub use error::PackageError;
pub use ident::PackageRef;
pub use models::{DownloadWindows, PackageInfo, PackagePayload, Release, ReleaseFile};
pub use stats::{Metrics, ReleaseHistory, aggregate};
