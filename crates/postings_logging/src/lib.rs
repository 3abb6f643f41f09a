#![deny(missing_docs)]
//! Shared logging utilities for the postings workspace.
//!
//! This crate provides the `postings_*` logging macros used by the core,
//! engine and app crates, a helper for keeping request and response bodies
//! readable in log lines, and a minimal test initializer for the global logger.

use std::borrow::Cow;

/// Default number of characters kept by [`clip`] callers that log bodies.
pub const BODY_LOG_CHARS: usize = 160;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! postings_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! postings_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! postings_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! postings_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! postings_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Shortens `text` to at most `max_chars` characters for a single log line.
///
/// Newlines are flattened so multi-line CSV or JSON bodies stay on one line.
/// A trailing `…` marks text that was cut.
pub fn clip(text: &str, max_chars: usize) -> Cow<'_, str> {
    let needs_flatten = text.contains(['\n', '\r']);
    let char_count = text.chars().count();
    if !needs_flatten && char_count <= max_chars {
        return Cow::Borrowed(text);
    }

    let mut out: String = text
        .chars()
        .take(max_chars)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if char_count > max_chars {
        out.push('…');
    }
    Cow::Owned(out)
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
