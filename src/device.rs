//! Simulated device responder
//!
//! Stateless command-to-text collaborator standing in for a real device. Each
//! call is independent; the session loop sends the reply only to the issuing
//! client. Swappable without touching the relay core.

use rand::Rng;

/// A recognized device command, parsed from raw chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    Status,
    Start,
    Stop,
    /// Bare prefix with nothing after it
    Empty,
    /// Anything else, carrying the normalized text for the error reply
    Unknown(String),
}

impl DeviceCommand {
    /// Parse a raw command string. A leading `/device` prefix is stripped if
    /// present; matching is case-insensitive on the trimmed remainder.
    pub fn parse(raw: &str) -> Self {
        let mut cmd = raw.trim();
        let prefixed = cmd
            .get(.."/device".len())
            .is_some_and(|head| head.eq_ignore_ascii_case("/device"));
        if prefixed {
            cmd = &cmd["/device".len()..];
        }
        let cmd = cmd.trim().to_lowercase();

        match cmd.as_str() {
            "status" => Self::Status,
            "start" => Self::Start,
            "stop" => Self::Stop,
            "" => Self::Empty,
            _ => Self::Unknown(cmd),
        }
    }
}

/// Handle a raw command and produce a human-readable response.
///
/// Never fails: unrecognized input becomes an error-describing string.
pub fn handle_command(raw: &str) -> String {
    match DeviceCommand::parse(raw) {
        DeviceCommand::Status => {
            let value: u32 = rand::rng().random_range(0..=100);
            format!("Current sensor reading is {value}.")
        }
        DeviceCommand::Start => "Device has been started.".to_string(),
        DeviceCommand::Stop => "Device has been stopped.".to_string(),
        DeviceCommand::Empty => "No command provided. Try '/device status'.".to_string(),
        DeviceCommand::Unknown(cmd) => format!("Unknown device command: '{cmd}'."),
    }
}
