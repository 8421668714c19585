use std::time::Instant;

use crate::{Message, RequestId};

/// Key name that dismisses the sidebar.
pub const ESCAPE_KEY: &str = "Escape";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMsg {
    /// User edited the chat input.
    InputChanged(String),
    /// User submitted the chat form.
    Submitted,
    /// Engine delivered the message and the server answered.
    ReplyReceived {
        request_id: RequestId,
        messages: Vec<Message>,
    },
    /// Delivery failed at the HTTP or transport level, or the body was unreadable.
    DeliveryFailed {
        request_id: RequestId,
        reason: Option<String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarMsg {
    /// A generic toggle control was clicked.
    TogglePressed,
    /// A close control was clicked.
    ClosePressed,
    /// The backdrop behind the overlay panel was clicked.
    BackdropClicked,
    /// A key went down anywhere in the window.
    KeyPressed(String),
    /// The viewport changed width.
    Resized { width: u32, at: Instant },
    /// Timer tick; settles a pending resize once its deadline has passed.
    Tick { now: Instant },
}
