//! Colored, opt-in diagnostics on stderr.
//!
//! Generators call `log!("area"; ...)` at the points where they decide
//! something a site owner may want to trace: a dropped graph type, a
//! redirect, a duplicate node id. Nothing is printed until the host calls
//! [`set_verbose`]; stdout stays reserved for generated markup.
//!
//! ```ignore
//! logger::set_verbose(true);
//! log!("schema"; "dropped unknown graph type `{}`", name);
//! ```

use colored::{ColoredString, Colorize};
use crossterm::terminal::size;
use std::{
    io::{Write, stderr},
    sync::{
        OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Terminal columns, probed once.
static COLUMNS: OnceLock<usize> = OnceLock::new();

/// Used when stderr is not a terminal.
const FALLBACK_COLUMNS: usize = 120;

/// Print `message` under an `[area]` prefix when verbose.
///
/// ```ignore
/// log!("breadcrumb"; "{} crumbs for {}", crumbs.len(), url);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Backend of [`log!`]. Single-line messages are cut to the terminal width;
/// multi-line ones are printed whole.
pub fn log(module: &str, message: &str) {
    if !is_verbose() {
        return;
    }

    let prefix = colorize(module);
    let mut out = stderr().lock();
    if message.contains('\n') {
        writeln!(out, "{prefix} {message}").ok();
    } else {
        let room = columns().saturating_sub(prefix_width(module));
        writeln!(out, "{prefix} {}", fit(message, room)).ok();
    }
    out.flush().ok();
}

fn columns() -> usize {
    *COLUMNS.get_or_init(|| size().map_or(FALLBACK_COLUMNS, |(w, _)| w as usize))
}

/// Visible width of `[module] `.
const fn prefix_width(module: &str) -> usize {
    module.len() + 3
}

fn colorize(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "breadcrumb" => prefix.bright_blue().bold(),
        "schema" => prefix.bright_green().bold(),
        "head" => prefix.bright_cyan().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Longest prefix of `s` within `max` bytes that ends on a char boundary.
fn fit(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let end = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    &s[..end]
}
