//! Output emission
//!
//! The original playbook is never touched: the patched sequence goes to a
//! sibling `<base>_fixed<ext>` file, the audit log to
//! `<base>_chat_output.txt`, and the issue dump to `<base>_issues.yml`. Each
//! write is independent so a failure in one still lets the others land.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::fixes::FixMap;
use crate::issues::IssueMap;

const AUDIT_SEPARATOR_WIDTH: usize = 80;

/// Derive a sibling path by suffixing the file stem: `tasks/main.yml` →
/// `tasks/main_fixed.yml`.
fn sibling_path(path: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    let ext = extension
        .map(str::to_string)
        .or_else(|| path.extension().map(|e| e.to_string_lossy().into_owned()));

    let file_name = match ext {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext),
        None => format!("{}{}", stem, suffix),
    };

    path.with_file_name(file_name)
}

/// `<base>_fixed<ext>` next to the original.
pub fn fixed_path(playbook: &Path) -> PathBuf {
    sibling_path(playbook, "_fixed", None)
}

/// `<base>_chat_output.txt` next to the original.
pub fn audit_path(playbook: &Path) -> PathBuf {
    sibling_path(playbook, "_chat_output", Some("txt"))
}

/// `<base>_issues.yml` next to the original.
pub fn issues_path(playbook: &Path) -> PathBuf {
    sibling_path(playbook, "_issues", Some("yml"))
}

/// Write the patched line sequence to the derived `_fixed` path.
pub fn write_patched(playbook: &Path, lines: &[String]) -> anyhow::Result<PathBuf> {
    let path = fixed_path(playbook);
    fs::write(&path, lines.concat())
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(path)
}

/// Write the audit log pairing every issue key with its fix, in issue order.
pub fn write_audit(playbook: &Path, fixes: &FixMap) -> anyhow::Result<PathBuf> {
    let path = audit_path(playbook);
    let mut out = String::new();
    for entry in fixes.iter() {
        out.push_str(&format!("❌ **Lint Issue:** {}\n", entry.key));
        out.push_str(&format!("💡 **Suggested Fix:**\n{}\n", entry.text));
        out.push_str(&"-".repeat(AUDIT_SEPARATOR_WIDTH));
        out.push('\n');
    }
    fs::write(&path, out)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(path)
}

/// Dump the issue mapping as YAML for inspection, overwriting any stale dump.
pub fn write_issue_dump(playbook: &Path, issues: &IssueMap) -> anyhow::Result<PathBuf> {
    let path = issues_path(playbook);
    let yaml = issues.to_yaml()?;
    fs::write(&path, yaml)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(path)
}
