//! Terminal escape-sequence removal
//!
//! ansible-lint writes colored, hyperlinked output even when piped. Everything
//! downstream (segmentation, line-number extraction) works on plain text, so
//! the raw stream is scrubbed exactly once, up front.

use regex::Regex;
use std::sync::OnceLock;

/// Matches CSI sequences (colors, styles, cursor movement) and OSC 8
/// hyperlink wrappers. Anything else passes through untouched.
fn ansi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]|\x1b\]8;[^\x1b]*\x1b\\")
            .expect("hardcoded ANSI pattern is valid")
    })
}

/// Strip all recognized terminal escape sequences from `text`.
///
/// Input with no escape sequences comes back unchanged; there is no
/// failure mode here.
pub fn strip_ansi_codes(text: &str) -> String {
    ansi_pattern().replace_all(text, "").into_owned()
}
