pub mod client;
pub mod prompts;

pub use client::{ChatClient, SuggestionSource, DEFAULT_HOST, DEFAULT_MODEL};
pub use prompts::{build_fix_prompt, FIX_SYSTEM};
