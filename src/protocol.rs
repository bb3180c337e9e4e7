//! Wire formatting
//!
//! Frames are plain UTF-8 text with no envelope. The only structure is a
//! display prefix derived from the message's origin, so client UIs can tell
//! chat, device responses, and sensor readings apart.

/// Where an outbound message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Another user's chat message
    Chat,
    /// A device responder reply (private to the issuing client)
    Device,
    /// A periodic sensor reading (broadcast to everyone)
    Sensor,
}

/// Render a payload with its origin prefix.
pub fn render(origin: Origin, text: &str) -> String {
    match origin {
        Origin::Chat => format!("User ➤ {text}"),
        Origin::Device => format!("Device ➤ {text}"),
        Origin::Sensor => format!("Sensor reading: {text}"),
    }
}
