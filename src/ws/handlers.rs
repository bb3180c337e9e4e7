//! Inbound message dispatch
//!
//! Classifies each text frame from a client as a device command or chat and
//! routes it. Split out from the socket loop so tests can drive a session
//! without a network.

use crate::device;
use crate::protocol::{render, Origin};
use crate::registry::ConnectionId;
use crate::state::AppState;
use std::sync::Arc;

/// Classification of one inbound text frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A device command with the prefix stripped, to be answered privately
    Command(String),
    /// Plain chat, to be broadcast to everyone else
    Chat(String),
}

/// Classify a frame: a trimmed, case-insensitive `prefix` at the start marks
/// a device command, whose remainder is passed on to the responder.
pub fn classify(text: &str, prefix: &str) -> Inbound {
    let trimmed = text.trim();
    let is_command = trimmed
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
    if is_command {
        Inbound::Command(trimmed[prefix.len()..].trim().to_string())
    } else {
        Inbound::Chat(text.to_string())
    }
}

/// Handle one inbound frame from `sender`.
///
/// Device commands return `Some(reply)` for the caller to deliver to the
/// originating connection only; chat is broadcast (excluding the sender) and
/// returns `None`.
pub async fn handle_inbound(
    state: &Arc<AppState>,
    sender: &ConnectionId,
    text: &str,
) -> Option<String> {
    match classify(text, &state.config.command_prefix) {
        Inbound::Command(command) => {
            tracing::debug!(connection = %sender, "device command");
            Some(render(Origin::Device, &device::handle_command(&command)))
        }
        Inbound::Chat(message) => {
            let delivered = state
                .hub
                .broadcast(&render(Origin::Chat, &message), Some(sender))
                .await;
            tracing::debug!(connection = %sender, delivered, "chat broadcast");
            None
        }
    }
}
