//! HR assistant chat modes and prompt assembly.
//!
//! Policy drafting is an admin capability: only roles that pass
//! [`Role::can_use_admin_chat`] may select it, and an unrecognized role
//! string never does.

#[cfg(test)]
#[path = "assistant_test.rs"]
mod assistant_test;

use session::Role;

use crate::net::types::LlmInvokeRequest;

/// How many earlier turns are replayed into each prompt.
const HISTORY_TURNS: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatMode {
    /// Employee-facing Q&A about policies, leave and benefits.
    #[default]
    General,
    /// Drafting and revising company policy text.
    PolicyDrafting,
}

impl ChatMode {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "Ask HR",
            Self::PolicyDrafting => "Policy drafting",
        }
    }

    fn system_prompt(self) -> &'static str {
        match self {
            Self::General => {
                "You are IAKWE HR's assistant for employers in the Marshall Islands. \
                 Answer questions about leave, workplace policies and employment practice clearly and briefly."
            }
            Self::PolicyDrafting => {
                "You help HR administrators in the Marshall Islands draft workplace policies. \
                 Produce complete policy text with headings, consistent with Marshall Islands labor law."
            }
        }
    }
}

/// Modes offered to a user with `role`.
#[must_use]
pub fn available_modes(role: Option<Role>) -> Vec<ChatMode> {
    if role.is_some_and(Role::can_use_admin_chat) {
        vec![ChatMode::General, ChatMode::PolicyDrafting]
    } else {
        vec![ChatMode::General]
    }
}

/// `requested` if the role allows it, otherwise [`ChatMode::General`].
#[must_use]
pub fn effective_mode(requested: ChatMode, role: Option<Role>) -> ChatMode {
    if available_modes(role).contains(&requested) { requested } else { ChatMode::General }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { speaker: Speaker::User, text: text.into() }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { speaker: Speaker::Assistant, text: text.into() }
    }
}

/// Build the integration request for `input`, replaying recent history as a
/// transcript. Returns `None` for blank input.
#[must_use]
pub fn build_request(mode: ChatMode, history: &[ChatMessage], input: &str) -> Option<LlmInvokeRequest> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let mut prompt = String::new();
    let skip = history.len().saturating_sub(HISTORY_TURNS);
    for message in &history[skip..] {
        let who = match message.speaker {
            Speaker::User => "User",
            Speaker::Assistant => "Assistant",
        };
        prompt.push_str(who);
        prompt.push_str(": ");
        prompt.push_str(message.text.trim());
        prompt.push_str("\n\n");
    }
    prompt.push_str("User: ");
    prompt.push_str(input);
    Some(LlmInvokeRequest { prompt, system: Some(mode.system_prompt().to_owned()), response_json_schema: None })
}
