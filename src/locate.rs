//! Source-location recovery
//!
//! ansible-lint findings conventionally end with a `path:line` location, so
//! the line number is recovered from a trailing digit run anchored at the end
//! of the record. Anchoring keeps the extraction robust to arbitrary prefix
//! content, but a record that does not end in digits must fail explicitly —
//! guessing a line would patch the wrong place.

use anyhow::{anyhow, Context};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

fn trailing_digits() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)$").expect("hardcoded pattern is valid"))
}

/// Extract the 1-based line number from the end of an issue record.
///
/// Returns `None` when the record does not end with digits, or when the digit
/// run overflows `u32` (a run that long is never a real line number).
pub fn trailing_line_number(text: &str) -> Option<u32> {
    trailing_digits()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Fetch one line from `path` by 1-based number, trailing whitespace trimmed.
///
/// The file is re-read on every call so the result reflects the current
/// on-disk state. Fails with a descriptive error for an unreadable path or an
/// out-of-range line number; callers recover locally rather than aborting the
/// batch.
pub fn line_at(path: &Path, line_number: u32) -> anyhow::Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("file '{}' not found or unreadable", path.display()))?;

    let total = content.lines().count();
    if line_number == 0 || line_number as usize > total {
        return Err(anyhow!(
            "line number {} out of range (file has {} lines)",
            line_number,
            total
        ));
    }

    let line = content
        .lines()
        .nth(line_number as usize - 1)
        .unwrap_or_default();
    Ok(line.trim_end().to_string())
}
