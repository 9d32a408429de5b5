//! Notifications sent to actors. Text lookup is the host's job; a
//! notification only carries a message key and positional arguments.

use serde::{Deserialize, Serialize};

/// Messages the automation overlay can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    /// Args: version.
    Init,
    /// Args: door name, actor name.
    ClosedDoor,
    /// Args: "shown" or "hidden".
    ToggleGroundContainer,
    /// Args: item name.
    PaddleEngaged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MessageType {
    #[default]
    None,
    Good,
}

/// What caused the message, for hosts that filter by source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageSource {
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub key: MessageKey,
    pub message_type: MessageType,
    pub source: Option<MessageSource>,
    pub args: Vec<String>,
}

impl Notification {
    pub fn new(key: MessageKey) -> Self {
        Self {
            key,
            message_type: MessageType::None,
            source: None,
            args: Vec::new(),
        }
    }

    pub fn with_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    pub fn with_source(mut self, source: MessageSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}
