//! Per-issue fix collection
//!
//! Walks the issue mapping in order and asks the model for a corrected line
//! for each issue that resolves to an addressable source line. Every issue
//! produces exactly one entry — success or an explicit placeholder — so no
//! finding silently disappears between the lint report and the audit log.

use std::path::Path;

use crate::llm::{build_fix_prompt, SuggestionSource, FIX_SYSTEM};
use crate::locate::{line_at, trailing_line_number};
use crate::issues::IssueMap;

/// Placeholder recorded when an issue has no recoverable source location.
pub const NO_ADDRESSABLE_LINE: &str = "cannot fix: no addressable line";

/// Placeholder recorded when the model call failed or returned no usable text.
pub const FIX_UNAVAILABLE: &str = "fix unavailable";

/// One collected fix, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixEntry {
    /// `issue_N` key from the issue mapping.
    pub key: String,
    /// `path:line` address, present only when the source line resolved and the
    /// model produced a suggestion. Placeholder entries stay unaddressed so
    /// the patch engine can never apply them.
    pub address: Option<String>,
    /// Suggested replacement line, or a placeholder string.
    pub text: String,
}

/// Ordered collection of fixes, one per issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixMap {
    entries: Vec<FixEntry>,
}

impl FixMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FixEntry> {
        self.entries.iter()
    }

    pub fn push(&mut self, entry: FixEntry) {
        self.entries.push(entry);
    }
}

/// Collect one fix per issue, strictly in issue order.
///
/// Resolution failures (no trailing line number, unreadable file, out-of-range
/// line) terminate that issue locally with a placeholder and never reach the
/// model. A model failure likewise becomes a placeholder; the batch always
/// runs to completion over every issue.
pub async fn collect_fixes<S: SuggestionSource>(
    source: &S,
    issues: &IssueMap,
    playbook: &Path,
) -> FixMap {
    let mut fixes = FixMap::default();

    for (key, issue_text) in issues.iter() {
        eprintln!("  🛠  {}", key);
        fixes.push(fix_for_issue(source, key, issue_text, playbook).await);
    }

    fixes
}

async fn fix_for_issue<S: SuggestionSource>(
    source: &S,
    key: &str,
    issue_text: &str,
    playbook: &Path,
) -> FixEntry {
    let Some(line_number) = trailing_line_number(issue_text) else {
        return placeholder(key, NO_ADDRESSABLE_LINE.to_string());
    };

    let line_content = match line_at(playbook, line_number) {
        Ok(line) => line,
        Err(err) => return placeholder(key, format!("cannot fix: {}", err)),
    };

    let prompt = build_fix_prompt(issue_text, &line_content);
    match source.suggest(FIX_SYSTEM, &prompt).await {
        Ok(suggestion) => FixEntry {
            key: key.to_string(),
            address: Some(format!("{}:{}", playbook.display(), line_number)),
            text: suggestion,
        },
        Err(err) => {
            eprintln!("  Warning: {} — {}", key, err);
            placeholder(key, FIX_UNAVAILABLE.to_string())
        }
    }
}

fn placeholder(key: &str, text: String) -> FixEntry {
    FixEntry {
        key: key.to_string(),
        address: None,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::segment_issues;
    use anyhow::anyhow;
    use std::io::Write;
    use tempfile::NamedTempFile;

    struct CannedSource(Option<String>);

    impl SuggestionSource for CannedSource {
        async fn suggest(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
            match &self.0 {
                Some(reply) => Ok(reply.clone()),
                None => Err(anyhow!("malformed reply")),
            }
        }
    }

    fn playbook() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"---\n- hosts: all\n  become: yes\n").unwrap();
        file
    }

    #[tokio::test]
    async fn test_addressable_issue_gets_suggestion_and_address() {
        let file = playbook();
        let issues = segment_issues("yaml[truthy]\nTruthy value\ntasks/main.yml:3", 3);
        let source = CannedSource(Some("  become: true".to_string()));

        let fixes = collect_fixes(&source, &issues, file.path()).await;
        assert_eq!(fixes.len(), 1);
        let entry = fixes.iter().next().unwrap();
        assert_eq!(entry.key, "issue_1");
        assert_eq!(entry.text, "  become: true");
        assert_eq!(
            entry.address.as_deref(),
            Some(format!("{}:3", file.path().display()).as_str())
        );
    }

    #[tokio::test]
    async fn test_issue_without_line_number_is_terminal() {
        let file = playbook();
        let issues = segment_issues("Warning: malformed block", 3);
        let source = CannedSource(Some("should never be called".to_string()));

        let fixes = collect_fixes(&source, &issues, file.path()).await;
        let entry = fixes.iter().next().unwrap();
        assert_eq!(entry.text, NO_ADDRESSABLE_LINE);
        assert!(entry.address.is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_line_is_terminal() {
        let file = playbook();
        let issues = segment_issues("yaml[truthy] at tasks/main.yml:99", 3);
        let source = CannedSource(Some("unused".to_string()));

        let fixes = collect_fixes(&source, &issues, file.path()).await;
        let entry = fixes.iter().next().unwrap();
        assert!(entry.text.contains("out of range"));
        assert!(entry.address.is_none());
    }

    #[tokio::test]
    async fn test_resolution_failures_share_cannot_fix_prefix() {
        // The audit log's grammar relies on every resolution failure starting
        // with the same prefix, whatever the underlying reason was.
        let file = playbook();
        let issues = segment_issues(
            "Warning: malformed block\nyaml[truthy] at tasks/main.yml:99",
            1,
        );
        let source = CannedSource(Some("unused".to_string()));

        let fixes = collect_fixes(&source, &issues, file.path()).await;
        assert_eq!(fixes.len(), 2);
        for entry in fixes.iter() {
            assert!(
                entry.text.starts_with("cannot fix:"),
                "unexpected placeholder: {}",
                entry.text
            );
            assert!(entry.address.is_none());
        }
    }

    #[tokio::test]
    async fn test_model_failure_records_placeholder() {
        let file = playbook();
        let issues = segment_issues("yaml[truthy] at main.yml:2", 3);
        let source = CannedSource(None);

        let fixes = collect_fixes(&source, &issues, file.path()).await;
        let entry = fixes.iter().next().unwrap();
        assert_eq!(entry.text, FIX_UNAVAILABLE);
        assert!(entry.address.is_none());
    }

    #[tokio::test]
    async fn test_every_issue_yields_exactly_one_entry() {
        let file = playbook();
        let issues = segment_issues("a\nb\nmain.yml:1\nno address here\nc\nd", 3);
        let source = CannedSource(Some("fixed".to_string()));

        let fixes = collect_fixes(&source, &issues, file.path()).await;
        assert_eq!(fixes.len(), issues.len());
        let keys: Vec<&str> = fixes.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["issue_1", "issue_2"]);
    }
}
