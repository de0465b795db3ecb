//! Configuration management for lintmend
//!
//! Reads settings from ~/.config/lintmend/config.json. Everything here is
//! optional: CLI flags win, then environment variables, then the config file,
//! then built-in defaults.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::lint::DEFAULT_LINT_BIN;
use crate::llm::{DEFAULT_HOST, DEFAULT_MODEL};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Ollama endpoint, e.g. "http://localhost:11434"
    pub ollama_host: Option<String>,
    /// Chat model name, e.g. "llama3.2"
    pub model: Option<String>,
    /// Lint binary to invoke
    pub lint_bin: Option<String>,
    /// Raw output lines per issue record
    pub group_size: Option<usize>,
}

impl Config {
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lintmend"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.json"))
    }

    /// Load config from disk, or return default
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(content) = fs::read_to_string(&path) {
                match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(err) => {
                        preserve_corrupt_config(&path, &content);
                        eprintln!(
                            "  Warning: Config file was corrupted ({}). A backup was saved and defaults were loaded.",
                            err
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Resolve the Ollama endpoint: `OLLAMA_HOST` env var, then config, then default.
    pub fn host(&self) -> String {
        std::env::var("OLLAMA_HOST")
            .ok()
            .or_else(|| self.ollama_host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    /// Resolve the model name: `LINTMEND_MODEL` env var, then config, then default.
    pub fn model(&self) -> String {
        std::env::var("LINTMEND_MODEL")
            .ok()
            .or_else(|| self.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Resolve the lint binary to invoke.
    pub fn lint_bin(&self) -> String {
        self.lint_bin
            .clone()
            .unwrap_or_else(|| DEFAULT_LINT_BIN.to_string())
    }

    /// Resolve the issue group size.
    pub fn group_size(&self) -> usize {
        self.group_size
            .unwrap_or(crate::issues::DEFAULT_GROUP_SIZE)
    }
}

fn preserve_corrupt_config(path: &std::path::Path, content: &str) {
    let corrupt_path = path.with_extension("json.corrupt");
    if fs::rename(path, &corrupt_path).is_err() {
        let _ = fs::write(&corrupt_path, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_resolution() {
        let config = Config::default();
        assert_eq!(config.lint_bin(), "ansible-lint");
        assert_eq!(config.group_size(), 3);
    }

    #[test]
    fn test_config_parses_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"model": "mistral", "group_size": 2}"#).unwrap();
        assert_eq!(config.model.as_deref(), Some("mistral"));
        assert_eq!(config.group_size(), 2);
        assert_eq!(config.lint_bin(), "ansible-lint");
    }

    #[test]
    fn test_explicit_values_win_over_defaults() {
        let config = Config {
            lint_bin: Some("/usr/local/bin/ansible-lint".to_string()),
            group_size: Some(4),
            ..Default::default()
        };
        assert_eq!(config.lint_bin(), "/usr/local/bin/ansible-lint");
        assert_eq!(config.group_size(), 4);
    }
}
