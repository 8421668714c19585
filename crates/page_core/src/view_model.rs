use crate::ThreadNode;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub input: String,
    pub submit_enabled: bool,
    pub thread: Vec<ThreadNode>,
    pub pending_requests: usize,
    pub dirty: bool,
}

/// What the page shows for the sidebar after the last applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SidebarViewModel {
    pub open: bool,
    pub panel_visible: bool,
    pub backdrop_visible: bool,
    pub scroll_locked: bool,
}
