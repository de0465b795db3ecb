//! Sparse line patching
//!
//! Rewrites only the lines a fix addresses and passes every other line through
//! byte-for-byte, terminators included. Malformed or unresolvable fixes are
//! skipped rather than raised: a bad fix must never corrupt or truncate the
//! playbook. The output line count always equals the input line count.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use regex::Regex;

use crate::fixes::FixMap;

/// Suffix marking a line as machine-generated.
pub const PROVENANCE_MARKER: &str = "  # Fixed by AI";

/// Patched line sequence plus counts for the skipped-fix report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Every line of the original file, addressed lines replaced.
    pub lines: Vec<String>,
    pub applied: usize,
    pub skipped: usize,
}

/// `path:line` addressing convention for fix entries.
fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\S+):(\d+)").expect("hardcoded pattern is valid"))
}

/// Parse the 1-based line number out of a `path:line` address.
///
/// Anything that does not match the convention is unaddressable, not an
/// error.
fn address_line(address: &str) -> Option<u32> {
    address_pattern()
        .captures(address)
        .and_then(|caps| caps.get(2))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Apply `fixes` to the file at `path`, returning the full patched sequence.
///
/// Entries without a parsable address, or addressing a line outside the file,
/// leave the corresponding lines untouched and are counted as skipped.
pub fn apply_fixes(path: &Path, fixes: &FixMap) -> anyhow::Result<PatchOutcome> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let mut lines: Vec<String> = content
        .split_inclusive('\n')
        .map(str::to_string)
        .collect();

    let mut applied = 0;
    let mut skipped = 0;

    for entry in fixes.iter() {
        let line_number = entry.address.as_deref().and_then(address_line);

        match line_number {
            Some(n) if n >= 1 && (n as usize) <= lines.len() => {
                let index = n as usize - 1;
                lines[index] = format!("{}{}\n", entry.text.trim(), PROVENANCE_MARKER);
                applied += 1;
            }
            _ => skipped += 1,
        }
    }

    Ok(PatchOutcome {
        lines,
        applied,
        skipped,
    })
}
