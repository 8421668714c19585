//! Page core: pure chat and sidebar state machines plus message rendering.
mod chat;
mod config;
mod debounce;
mod effect;
mod message;
mod msg;
mod render;
mod sidebar;
mod update;
mod view_model;

pub use chat::{ChatState, RequestId, DELIVERY_FALLBACK_TEXT};
pub use config::{ChatConfig, SidebarConfig, DEFAULT_BREAKPOINT_PX, DEFAULT_USER_INITIALS};
pub use debounce::Debouncer;
pub use effect::{ChatEffect, SidebarEffect};
pub use message::{Message, Role};
pub use msg::{ChatMsg, SidebarMsg, ESCAPE_KEY};
pub use render::{
    escape_html, format_content, Avatar, ErrorNode, MessageNode, MessageRenderer, ThreadNode,
};
pub use sidebar::Sidebar;
pub use update::{update_chat, update_sidebar};
pub use view_model::{ChatViewModel, SidebarViewModel};
