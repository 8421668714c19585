//! Pure message-to-markup rendering.
//!
//! Nodes are structured descriptions of what the thread shows; [`MessageNode::to_html`]
//! and [`ErrorNode::to_html`] produce the page markup for hosts that need it.
use crate::message::{Message, Role};

const ASSISTANT_WRAPPER_CLASS: &str = "flex gap-4";
const USER_WRAPPER_CLASS: &str = "flex flex-row-reverse gap-4";
const ASSISTANT_AVATAR_CLASS: &str = "flex h-8 w-8 shrink-0 items-center justify-center rounded-lg bg-gradient-to-br from-blue-600 to-indigo-600 shadow-lg shadow-blue-500/20";
const USER_AVATAR_CLASS: &str =
    "flex h-8 w-8 shrink-0 items-center justify-center rounded-full bg-zinc-700 text-xs text-white";
const ASSISTANT_BUBBLE_CLASS: &str = "max-w-2xl rounded-2xl rounded-tl-none border border-white/10 bg-white/5 px-5 py-3 text-sm leading-relaxed text-zinc-100 backdrop-blur-sm";
const USER_BUBBLE_CLASS: &str = "bg-gradient-to-br max-w-2xl rounded-2xl rounded-tr-none from-blue-600 to-indigo-600 px-5 py-3 text-sm leading-relaxed text-white shadow-lg shadow-blue-900/20";
const ERROR_CLASS: &str =
    "rounded-2xl border border-red-500/30 bg-red-500/10 px-5 py-3 text-sm text-red-200";
const ASSISTANT_ICON: &str = r#"<svg class="h-5 w-5 text-white" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 10V3L4 14h7v7l9-11h-7z" /></svg>"#;

/// Escapes the five markup-significant characters. `&` goes first so that
/// the entities produced for the others are not escaped twice.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes `raw`, then turns newlines into `<br>`.
pub fn format_content(raw: &str) -> String {
    escape_html(raw).replace('\n', "<br>")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// Gradient badge with the lightning icon.
    AssistantBadge,
    /// Round badge showing the (escaped) user initials.
    Initials(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageNode {
    pub role: Role,
    pub wrapper_class: &'static str,
    pub avatar: Avatar,
    pub bubble_class: &'static str,
    /// Escaped content with `<br>` line breaks.
    pub body_html: String,
}

impl MessageNode {
    pub fn to_html(&self) -> String {
        let avatar = match &self.avatar {
            Avatar::AssistantBadge => {
                format!(r#"<div class="{ASSISTANT_AVATAR_CLASS}">{ASSISTANT_ICON}</div>"#)
            }
            Avatar::Initials(initials) => {
                format!(r#"<div class="{USER_AVATAR_CLASS}">{initials}</div>"#)
            }
        };
        format!(
            r#"<div class="{}">{avatar}<div class="space-y-1"><div class="{}">{}</div></div></div>"#,
            self.wrapper_class, self.bubble_class, self.body_html
        )
    }
}

/// Inline delivery failure. `text` is plain text, never markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNode {
    pub class: &'static str,
    pub text: String,
}

impl ErrorNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            class: ERROR_CLASS,
            text: text.into(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(r#"<div class="{}">{}</div>"#, self.class, escape_html(&self.text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadNode {
    Message(MessageNode),
    Error(ErrorNode),
}

impl ThreadNode {
    pub fn to_html(&self) -> String {
        match self {
            ThreadNode::Message(node) => node.to_html(),
            ThreadNode::Error(node) => node.to_html(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            ThreadNode::Message(node) => Some(node.role),
            ThreadNode::Error(_) => None,
        }
    }
}

/// Renders messages for one page; holds the user avatar label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRenderer {
    user_initials: String,
}

impl MessageRenderer {
    pub fn new(user_initials: &str) -> Self {
        Self {
            user_initials: escape_html(user_initials),
        }
    }

    pub fn render(&self, role: Role, content: &str) -> MessageNode {
        let body_html = format_content(content);
        match role {
            Role::Assistant => MessageNode {
                role,
                wrapper_class: ASSISTANT_WRAPPER_CLASS,
                avatar: Avatar::AssistantBadge,
                bubble_class: ASSISTANT_BUBBLE_CLASS,
                body_html,
            },
            Role::User => MessageNode {
                role,
                wrapper_class: USER_WRAPPER_CLASS,
                avatar: Avatar::Initials(self.user_initials.clone()),
                bubble_class: USER_BUBBLE_CLASS,
                body_html,
            },
        }
    }

    pub fn render_message(&self, message: &Message) -> MessageNode {
        self.render(message.role, &message.content)
    }
}
