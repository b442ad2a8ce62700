//! Explanation enhancement: rewrite the rule-impact explanations of affected
//! bills with a chat-completions model, over a CSV export of the bill table.

pub mod client;
pub mod enhance;
pub mod error;
pub mod prompt;

pub use client::{ChatClient, ChatConfig, Completer, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use enhance::{EnhanceStats, process_csv};
pub use error::AiError;
pub use prompt::{BillContext, SYSTEM_PROMPT, build_prompt, product, underwriting_rules};
