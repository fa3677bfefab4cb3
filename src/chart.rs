//! Horizontal ASCII bar charts sized to the terminal.
//!
//! ```
//! let rows = vec![("1.0".to_string(), 10), ("2.0".to_string(), 30)];
//! let chart = pypi_rs::chart::render(&rows, 40, pypi_rs::chart::DEFAULT_MAX_KEY_WIDTH);
//! assert_eq!(chart.lines().count(), 2);
//! ```

use crate::stats::ReleaseHistory;
use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;

/// Columns kept free at the right edge of the terminal.
pub const MARGIN: usize = 3;
/// Bar character.
pub const TICK: char = '*';
/// Default cap on rendered label width.
pub const DEFAULT_MAX_KEY_WIDTH: usize = 30;
/// Label cap for the per-version chart.
pub const VERSION_KEY_WIDTH: usize = 20;
/// Column the version is padded to before its upload date.
const VERSION_COLUMN: usize = 7;
const DATE_FORMAT: &str = "%y/%m/%d";

/// A laid-out chart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow {
    /// Label truncated to the key column width (not padded).
    pub label: String,
    pub value: u64,
    pub bar_length: usize,
}

/// Column widths shared by every row of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub key_width: usize,
    pub value_width: usize,
    pub bar_width: usize,
}

fn grouped(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Compute the column widths for `data` on a terminal `terminal_width` columns wide.
pub fn layout(data: &[(String, u64)], terminal_width: usize, max_key_width: usize) -> Layout {
    let longest_key = data.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let key_width = longest_key.min(max_key_width);
    let value_width = data
        .iter()
        .map(|(_, v)| grouped(*v).len())
        .max()
        .unwrap_or(0);
    let bar_width = terminal_width
        .saturating_sub(MARGIN)
        .saturating_sub(key_width + 3 + value_width + 3);
    Layout {
        key_width,
        value_width,
        bar_width,
    }
}

/// Scale each value against the largest one in `data`.
///
/// Bars are rounded up, so any non-zero value gets at least one tick when
/// there is room. An all-zero data set yields empty bars.
pub fn chart_rows(data: &[(String, u64)], layout: &Layout) -> Vec<ChartRow> {
    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(0);
    data.iter()
        .map(|(key, value)| {
            let bar_length = if max_value == 0 {
                0
            } else {
                let scaled = (layout.bar_width as u128 * u128::from(*value))
                    .div_ceil(u128::from(max_value));
                usize::try_from(scaled).unwrap_or(layout.bar_width)
            };
            ChartRow {
                label: key.chars().take(layout.key_width).collect(),
                value: *value,
                bar_length,
            }
        })
        .collect()
}

/// Render `data` as one line per entry, in input order.
pub fn render(data: &[(String, u64)], terminal_width: usize, max_key_width: usize) -> String {
    render_with(data, terminal_width, max_key_width, |label| label.to_string())
}

/// Like [`render`], but passes each padded label through `style_label`.
///
/// Styling is applied after padding and truncation, so escape sequences added
/// by `style_label` do not shift the value and bar columns.
pub fn render_with<F>(
    data: &[(String, u64)],
    terminal_width: usize,
    max_key_width: usize,
    style_label: F,
) -> String
where
    F: Fn(&str) -> String,
{
    let layout = layout(data, terminal_width, max_key_width);
    chart_rows(data, &layout)
        .iter()
        .map(|row| {
            let label = format!("{:<width$}", row.label, width = layout.key_width);
            format!(
                "{} [ {:>vw$} ] {}",
                style_label(&label),
                grouped(row.value),
                TICK.to_string().repeat(row.bar_length),
                vw = layout.value_width,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Downloads-by-version chart: `version  yy/mm/dd [ count ] ****`.
///
/// With `colored`, the version part of each label is shown in cyan.
pub fn version_chart(history: &ReleaseHistory, terminal_width: usize, colored: bool) -> String {
    let data: Vec<(String, u64)> = history
        .iter()
        .map(|r| {
            let date = r
                .upload_time
                .map(|t| t.format(DATE_FORMAT).to_string())
                .unwrap_or_default();
            (
                format!("{:<vc$} {}", r.version, date, vc = VERSION_COLUMN),
                r.downloads,
            )
        })
        .collect();
    render_with(&data, terminal_width, VERSION_KEY_WIDTH, |label| {
        if !colored {
            return label.to_string();
        }
        // Versions never contain spaces, so the first space ends the version.
        match label.split_once(' ') {
            Some((version, rest)) => format!("{} {}", version.cyan(), rest),
            None => label.cyan().to_string(),
        }
    })
}
