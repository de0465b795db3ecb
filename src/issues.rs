//! Lint-output segmentation
//!
//! ansible-lint prints each finding as a fixed three-line block: rule name and
//! summary, an optional detail line, then the `path:line` location. That
//! layout is a structural assumption about the tool's output format, not a
//! parsed grammar; if the format changes, adjust [`DEFAULT_GROUP_SIZE`] (or
//! pass `--group-size`) rather than touching the segmentation logic.

use anyhow::Context;
use serde_yaml::Mapping;

/// Raw output lines grouped into one issue record.
pub const DEFAULT_GROUP_SIZE: usize = 3;

/// Ordered `issue_N` → record-text mapping.
///
/// Insertion order mirrors the tool's scan order and is semantically
/// meaningful: the audit log and the YAML dump must list issues in the order
/// the tool reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueMap {
    entries: Vec<(String, String)>,
}

impl IssueMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize to a YAML mapping, preserving insertion order.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        let mut map = Mapping::new();
        for (key, text) in &self.entries {
            map.insert(key.as_str().into(), text.as_str().into());
        }
        serde_yaml::to_string(&map).context("failed to serialize issue mapping")
    }

    /// Read back a mapping produced by [`IssueMap::to_yaml`].
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let map: Mapping =
            serde_yaml::from_str(text).context("failed to parse issue mapping")?;
        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let key = key
                .as_str()
                .context("issue mapping key is not a string")?
                .to_string();
            let value = value
                .as_str()
                .context("issue mapping value is not a string")?
                .to_string();
            entries.push((key, value));
        }
        Ok(Self { entries })
    }
}

/// Partition sanitized lint output into issue records.
///
/// Lines are grouped into consecutive windows of `group_size`, each window
/// joined with single spaces and trimmed. A trailing partial window is still
/// emitted as its own record. Empty input yields an empty mapping.
pub fn segment_issues(sanitized: &str, group_size: usize) -> IssueMap {
    let group_size = group_size.max(1);
    let lines: Vec<&str> = sanitized.lines().collect();

    let mut entries = Vec::with_capacity(lines.len().div_ceil(group_size));
    for (index, group) in lines.chunks(group_size).enumerate() {
        let key = format!("issue_{}", index + 1);
        let text = group.join(" ").trim().to_string();
        entries.push((key, text));
    }

    IssueMap { entries }
}
