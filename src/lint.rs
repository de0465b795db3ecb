//! External lint-tool invocation
//!
//! The tool is treated as an opaque capability: given a playbook path, it
//! produces diagnostic text on stdout. ansible-lint exits non-zero whenever it
//! finds something to report, so the exit status carries no signal here and is
//! deliberately ignored.

use std::path::Path;
use std::process::Command;

use anyhow::Context;

/// Default lint binary, overridable with `--lint-bin`.
pub const DEFAULT_LINT_BIN: &str = "ansible-lint";

/// Run the lint tool against `playbook` and capture its stdout.
///
/// The only failure here is being unable to start the process at all; once
/// the tool runs, whatever it printed is the result.
pub fn run_lint(lint_bin: &str, playbook: &Path) -> anyhow::Result<String> {
    let output = Command::new(lint_bin)
        .arg(playbook)
        .output()
        .with_context(|| format!("failed to run '{}'", lint_bin))?;

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
