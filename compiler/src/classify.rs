use serde::Serialize;

use crate::types::MessageSchema;

/// Name suffix of user-editable command messages.
pub const CONTROL_SUFFIX: &str = "Ctl";
/// Name suffix of read-only telemetry messages.
pub const TELEMETRY_SUFFIX: &str = "Tlm";

/// Generation behaviour for one message, decided once from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    /// Edited by the user and sent to the device.
    Outgoing,
    /// Received from the device and displayed.
    Incoming,
    /// Neither suffix; contributes nothing.
    Unclassified,
}

pub fn classify(message: &MessageSchema) -> Role {
    classify_name(&message.name)
}

pub fn classify_name(name: &str) -> Role {
    if name.ends_with(CONTROL_SUFFIX) {
        Role::Outgoing
    } else if name.ends_with(TELEMETRY_SUFFIX) {
        Role::Incoming
    } else {
        Role::Unclassified
    }
}
