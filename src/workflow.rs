//! End-to-end repair run
//!
//! One lint invocation, strictly sequential per-issue fix collection, one
//! batch patch application, then the independent output writes. The original
//! playbook is read-only throughout; every artifact lands at a derived
//! sibling path.

use std::path::PathBuf;

use crate::emit::{write_audit, write_issue_dump, write_patched};
use crate::fixes::collect_fixes;
use crate::issues::segment_issues;
use crate::lint::run_lint;
use crate::llm::{ChatClient, SuggestionSource};
use crate::patch::apply_fixes;
use crate::sanitize::strip_ansi_codes;

pub struct RunOptions {
    pub playbook: PathBuf,
    pub lint_bin: String,
    pub host: String,
    pub model: String,
    pub group_size: usize,
    /// Stop after the issue dump: no model calls, no patching.
    pub dry_run: bool,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub issues: usize,
    pub applied: usize,
    pub skipped: usize,
    pub fixed_path: Option<PathBuf>,
    pub audit_path: Option<PathBuf>,
}

pub async fn run(opts: &RunOptions) -> anyhow::Result<RunSummary> {
    eprintln!("🔍 Running {} on {}...", opts.lint_bin, opts.playbook.display());
    let raw = run_lint(&opts.lint_bin, &opts.playbook)?;
    let sanitized = strip_ansi_codes(&raw);
    let issues = segment_issues(&sanitized, opts.group_size);
    eprintln!("  📋 {} issue(s) found", issues.len());

    match write_issue_dump(&opts.playbook, &issues) {
        Ok(path) => eprintln!("  📄 Issue dump written to {}", path.display()),
        Err(err) => eprintln!("  Warning: Failed to write issue dump: {}", err),
    }

    let mut summary = RunSummary {
        issues: issues.len(),
        ..Default::default()
    };

    if opts.dry_run || issues.is_empty() {
        return Ok(summary);
    }

    let client = ChatClient::new(opts.host.clone(), opts.model.clone());
    eprintln!("  🤖 Collecting fixes from {}...", client.model());
    run_with_source(&client, opts, issues, &mut summary).await?;
    Ok(summary)
}

async fn run_with_source<S: SuggestionSource>(
    source: &S,
    opts: &RunOptions,
    issues: crate::issues::IssueMap,
    summary: &mut RunSummary,
) -> anyhow::Result<()> {
    let fixes = collect_fixes(source, &issues, &opts.playbook).await;

    let outcome = apply_fixes(&opts.playbook, &fixes)?;
    summary.applied = outcome.applied;
    summary.skipped = outcome.skipped;
    if outcome.skipped > 0 {
        eprintln!(
            "  Warning: {} fix(es) had no addressable line and were skipped",
            outcome.skipped
        );
    }

    // The two writes are independent: a failure in one must not stop the other.
    match write_patched(&opts.playbook, &outcome.lines) {
        Ok(path) => summary.fixed_path = Some(path),
        Err(err) => eprintln!("  Warning: Failed to write patched playbook: {}", err),
    }
    match write_audit(&opts.playbook, &fixes) {
        Ok(path) => summary.audit_path = Some(path),
        Err(err) => eprintln!("  Warning: Failed to write audit log: {}", err),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct EchoSource;

    impl SuggestionSource for EchoSource {
        async fn suggest(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
            Ok("corrected: true".to_string())
        }
    }

    #[tokio::test]
    async fn test_full_run_patches_and_audits() {
        let dir = tempfile::tempdir().unwrap();
        let playbook = dir.path().join("main.yml");
        fs::write(&playbook, "one\ntwo\nthree\nfour\nfive\n").unwrap();

        let opts = RunOptions {
            playbook: playbook.clone(),
            lint_bin: "unused".to_string(),
            host: "unused".to_string(),
            model: "unused".to_string(),
            group_size: 3,
            dry_run: false,
        };

        // Diagnostic resolving to line 3, plus one with no location.
        let issues = segment_issues(
            "yaml[truthy]\nTruthy value\ntasks/main.yml:3\nWarning: malformed block",
            3,
        );
        let mut summary = RunSummary {
            issues: issues.len(),
            ..Default::default()
        };
        run_with_source(&EchoSource, &opts, issues, &mut summary)
            .await
            .unwrap();

        assert_eq!(summary.applied, 1);
        assert_eq!(summary.skipped, 1);

        let fixed = fs::read_to_string(summary.fixed_path.unwrap()).unwrap();
        let lines: Vec<&str> = fixed.split_inclusive('\n').collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "corrected: true  # Fixed by AI\n");
        assert_eq!(lines[0], "one\n");

        let audit = fs::read_to_string(summary.audit_path.unwrap()).unwrap();
        assert!(audit.contains("issue_1"));
        assert!(audit.contains("issue_2"));
        assert!(audit.contains("cannot fix: no addressable line"));

        // Original untouched.
        assert_eq!(
            fs::read_to_string(&playbook).unwrap(),
            "one\ntwo\nthree\nfour\nfive\n"
        );
    }
}
