//! Plain-text statistics block printed by `pypi stat`.

use crate::chart;
use crate::stats::Metrics;
use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;

/// Presentation switches for [`render_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Include the downloads-by-version bar chart.
    pub graph: bool,
    /// Terminal width used to size the chart.
    pub width: usize,
    /// Emit ANSI styling (bold title, cyan versions).
    pub colored: bool,
}

fn num(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Build the full report for one package.
///
/// The whole block is produced before anything is printed so a failure never
/// leaves a half-written report on screen.
pub fn render_report(name: &str, metrics: &Metrics, opts: &ReportOptions) -> String {
    let title = format!("Download statistics for {name}");
    let mut out = if opts.colored {
        format!("\n{}\n", title.bold())
    } else {
        format!("\n{title}\n")
    };
    if opts.graph {
        out.push_str("\nDownloads by version\n");
        out.push_str(&chart::version_chart(&metrics.history, opts.width, opts.colored));
        out.push('\n');
    }

    let min_ver = metrics.min_version.version.as_deref().unwrap_or("-");
    let max_ver = metrics.max_version.version.as_deref().unwrap_or("-");
    let lines = [
        String::new(),
        format!("Min downloads:   {:>12} ({min_ver})", num(metrics.min_version.downloads)),
        format!("Max downloads:   {:>12} ({max_ver})", num(metrics.max_version.downloads)),
        format!("Avg downloads:   {:>12}", num(metrics.average_downloads)),
        format!("Total downloads: {:>12}", num(metrics.total_downloads)),
        String::new(),
        format!("Last day:    {:>12}", num(metrics.windows.last_day)),
        format!("Last week:   {:>12}", num(metrics.windows.last_week)),
        format!("Last month:  {:>12}", num(metrics.windows.last_month)),
    ];
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
