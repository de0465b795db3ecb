use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use lintmend::config::Config;
use lintmend::workflow::{run, RunOptions};

#[derive(Parser, Debug)]
#[command(
    name = "lintmend",
    about = "AI-assisted repair for ansible-lint findings",
    version
)]
struct Args {
    /// Path to the playbook or task file to repair
    playbook: PathBuf,

    /// Raw lint-output lines grouped into one issue (default: 3)
    #[arg(short, long)]
    group_size: Option<usize>,

    /// Chat model to ask for fixes (default: llama3.2)
    #[arg(short, long)]
    model: Option<String>,

    /// Ollama endpoint (default: http://localhost:11434)
    #[arg(long)]
    host: Option<String>,

    /// Lint binary to invoke (default: ansible-lint)
    #[arg(long)]
    lint_bin: Option<String>,

    /// Only run the linter and write the issue dump; skip model calls and patching
    #[arg(short = 'n', long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load();

    let opts = RunOptions {
        playbook: args.playbook,
        lint_bin: args.lint_bin.unwrap_or_else(|| config.lint_bin()),
        host: args.host.unwrap_or_else(|| config.host()),
        model: args.model.unwrap_or_else(|| config.model()),
        group_size: args.group_size.unwrap_or_else(|| config.group_size()),
        dry_run: args.dry_run,
    };

    let summary = run(&opts).await?;

    println!();
    println!(
        "  {} issue(s), {} fix(es) applied, {} skipped",
        summary.issues, summary.applied, summary.skipped
    );
    if let Some(path) = &summary.fixed_path {
        println!("  The fixed playbook has been written to: {}", path.display());
    }
    if let Some(path) = &summary.audit_path {
        println!("  The chat history has been written to: {}", path.display());
    }

    Ok(())
}
