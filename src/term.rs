//! Terminal capabilities used when printing reports.

use std::io::{IsTerminal, stdout};
use terminal_size::{Width, terminal_size};

/// Width assumed when stdout is not a terminal (pipes, CI logs).
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Current width of the terminal attached to stdout, in columns.
pub fn terminal_width() -> usize {
    if stdout().is_terminal() {
        terminal_size().map_or(DEFAULT_TERMINAL_WIDTH, |(Width(w), _)| usize::from(w))
    } else {
        DEFAULT_TERMINAL_WIDTH
    }
}

/// Whether ANSI styling should be emitted on stdout.
///
/// Honors `NO_COLOR` (any value disables colour).
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && stdout().is_terminal()
}
