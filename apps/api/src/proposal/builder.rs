//! Prompt builder: renders the (system, user) instruction pair.
//!
//! Pure: the same composed fields and author always yield the same payload.

use crate::proposal::composer::ComposedFields;
use crate::proposal::prompts::{
    FORMAT_INSTRUCTIONS, SYSTEM_PROMPT, USER_PROMPT_CHECKLIST_TEMPLATE, USER_PROMPT_HEADER,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload {
    pub system: String,
    pub user: String,
}

pub fn system_instruction() -> String {
    format!("{SYSTEM_PROMPT}\n\n{FORMAT_INSTRUCTIONS}\n")
}

pub fn build_payload(fields: &ComposedFields, author: &str) -> PromptPayload {
    // Client text goes in last so it is never re-scanned for placeholders.
    let checklist = USER_PROMPT_CHECKLIST_TEMPLATE
        .replace("{author}", author.trim())
        .replace("{client_name}", fields.client_name());

    PromptPayload {
        system: system_instruction(),
        user: format!("{USER_PROMPT_HEADER}\n\n{}\n\n{checklist}\n", fields.render()),
    }
}
