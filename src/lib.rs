//! lintmend library crate
//!
//! Exposes the diagnostic-extraction and line-patch engine so tests and
//! external tooling can exercise it without going through CLI startup.

pub mod config;
pub mod emit;
pub mod fixes;
pub mod issues;
pub mod lint;
pub mod llm;
pub mod locate;
pub mod patch;
pub mod sanitize;
pub mod workflow;
