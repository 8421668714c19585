use std::time::Instant;

use crate::{RequestId, SidebarViewModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEffect {
    /// Bring the newest thread entry into view.
    ScrollToBottom,
    /// POST the message text to the configured endpoint.
    PostMessage { request_id: RequestId, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEffect {
    /// Show or hide the panel and backdrop, lock or unlock document scroll.
    Apply(SidebarViewModel),
    /// A resize is pending; the host should tick no later than `deadline`.
    ScheduleSettle { deadline: Instant },
}
