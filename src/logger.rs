//! Terminal logging with colored `[module]` prefixes.
//!
//! ```ignore
//! log!("enhance"; "decorated {} elements", count);
//! debug!("registry"; "defining {}", name);   // only with --verbose
//! ```
//!
//! Everything goes to stderr: stdout carries documents and JSON. Tests can
//! divert the current thread's lines with [`start_capture`].

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    cell::RefCell,
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

thread_local! {
    static CAPTURE: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Enable or disable `debug!` output (set from `--verbose`).
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// `log!("module"; "format {}", args)`
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like `log!`, but only when verbose output is on.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Write one line for `module`.
pub fn log(module: &str, message: &str) {
    let line = CAPTURE.with_borrow_mut(|capture| match capture {
        Some(lines) => {
            lines.push(format!("[{module}] {message}"));
            None
        }
        None => Some(format!("{} {message}", colorize_prefix(module))),
    });

    if let Some(line) = line {
        let mut stderr = stderr().lock();
        writeln!(stderr, "{line}").ok();
        stderr.flush().ok();
    }
}

/// Prefix color by module family.
fn prefix_style(module: &str) -> Style {
    let style = Style::new().bold();
    match module.to_ascii_lowercase().as_str() {
        "enhance" => style.bright_blue(),
        "query" | "navigate" => style.bright_green(),
        "error" | "registry" => style.bright_red(),
        "config" | "warning" => style.bright_magenta(),
        _ => style.bright_yellow(),
    }
}

/// Honors `--color` through the owo-colors override.
fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    prefix
        .if_supports_color(Stream::Stderr, |p| p.style(prefix_style(module)))
        .to_string()
}

/// Redirect this thread's log lines into memory until [`take_captured`].
///
/// Captured lines are uncolored: `[module] message`.
pub fn start_capture() {
    CAPTURE.with_borrow_mut(|capture| *capture = Some(Vec::new()));
}

/// Stop capturing and return the lines logged since [`start_capture`].
pub fn take_captured() -> Vec<String> {
    CAPTURE.with_borrow_mut(Option::take).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_contains_module_name() {
        assert!(colorize_prefix("navigate").contains("[navigate]"));
    }

    #[test]
    fn test_capture_collects_plain_lines() {
        start_capture();
        crate::log!("capture-test"; "value {}", 42);
        let lines = take_captured();
        assert_eq!(lines, ["[capture-test] value 42"]);
    }

    #[test]
    fn test_capture_is_per_thread() {
        start_capture();
        std::thread::spawn(|| crate::log!("other-thread"; "not captured here"))
            .join()
            .unwrap();
        assert!(take_captured().is_empty());
    }

    #[test]
    fn test_take_without_capture_is_empty() {
        assert!(take_captured().is_empty());
    }
}
