use std::io::{self, Write};

use page_core::{SidebarViewModel, ThreadNode};

/// One line of terminal input, standing in for a page interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellInput {
    Chat(String),
    Toggle,
    Close,
    Backdrop,
    Key(String),
    Resize(u32),
    Quit,
    Unknown(String),
}

/// Lines starting with `/` are commands; anything else is a chat message in
/// which a literal `\n` stands for a line break.
pub(crate) fn parse_line(line: &str) -> ShellInput {
    let Some(command) = line.trim().strip_prefix('/') else {
        return ShellInput::Chat(line.replace("\\n", "\n"));
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("toggle"), None) => ShellInput::Toggle,
        (Some("close"), None) => ShellInput::Close,
        (Some("backdrop"), None) => ShellInput::Backdrop,
        (Some("key"), Some(key)) => ShellInput::Key(key.to_string()),
        (Some("resize"), Some(width)) => match width.parse() {
            Ok(width) => ShellInput::Resize(width),
            Err(_) => ShellInput::Unknown(line.to_string()),
        },
        (Some("quit"), None) => ShellInput::Quit,
        _ => ShellInput::Unknown(line.to_string()),
    }
}

pub(crate) fn thread_line(node: &ThreadNode) -> String {
    match node {
        ThreadNode::Message(message) => format!("{:>9} | {}", message.role, message.body_html),
        ThreadNode::Error(error) => format!("{:>9} | {}", "error", error.text),
    }
}

pub(crate) fn sidebar_line(view: SidebarViewModel) -> String {
    let state = if view.open { "open" } else { "closed" };
    let backdrop = if view.backdrop_visible { "shown" } else { "hidden" };
    let scroll = if view.scroll_locked { "locked" } else { "free" };
    format!("[sidebar {state}; backdrop {backdrop}; scroll {scroll}]")
}

/// Prints thread entries as they appear; `printed` is the scroll position.
pub(crate) struct Console<W: Write> {
    out: W,
    printed: usize,
}

impl<W: Write> Console<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out, printed: 0 }
    }

    pub(crate) fn scroll_to_bottom(&mut self, thread: &[ThreadNode]) -> io::Result<()> {
        for node in thread.iter().skip(self.printed) {
            writeln!(self.out, "{}", thread_line(node))?;
        }
        self.printed = self.printed.max(thread.len());
        self.out.flush()
    }

    pub(crate) fn show_sidebar(&mut self, view: SidebarViewModel) -> io::Result<()> {
        writeln!(self.out, "{}", sidebar_line(view))?;
        self.out.flush()
    }

    pub(crate) fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "({text})")?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
