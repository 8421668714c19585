use crate::render::{ErrorNode, MessageRenderer, ThreadNode};
use crate::{ChatConfig, ChatViewModel, Message, Role, DEFAULT_USER_INITIALS};

pub type RequestId = u64;

/// Error text shown when a failed delivery carries no message of its own.
pub const DELIVERY_FALLBACK_TEXT: &str = "Unable to reach the AI service.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    renderer: MessageRenderer,
    input: String,
    submit_enabled: bool,
    thread: Vec<ThreadNode>,
    next_request_id: RequestId,
    pending_requests: usize,
    dirty: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            renderer: MessageRenderer::new(DEFAULT_USER_INITIALS),
            input: String::new(),
            submit_enabled: true,
            thread: Vec::new(),
            next_request_id: 1,
            pending_requests: 0,
            dirty: false,
        }
    }
}

impl ChatState {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            renderer: MessageRenderer::new(config.initials()),
            ..Self::default()
        }
    }

    pub fn view(&self) -> ChatViewModel {
        ChatViewModel {
            input: self.input.clone(),
            submit_enabled: self.submit_enabled,
            thread: self.thread.clone(),
            pending_requests: self.pending_requests,
            dirty: self.dirty,
        }
    }

    pub fn thread(&self) -> &[ThreadNode] {
        &self.thread
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn pending_requests(&self) -> usize {
        self.pending_requests
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    /// Takes the input for delivery: clears it, disables submit and renders
    /// the user's message. Blank input or a disabled control yields `None`.
    pub(crate) fn begin_submission(&mut self) -> Option<(RequestId, String)> {
        if !self.submit_enabled || self.input.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.submit_enabled = false;
        self.thread.push(ThreadNode::Message(
            self.renderer.render(Role::User, &text),
        ));

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_requests += 1;
        self.dirty = true;
        Some((request_id, text))
    }

    pub(crate) fn append_message(&mut self, message: &Message) {
        self.thread
            .push(ThreadNode::Message(self.renderer.render_message(message)));
        self.dirty = true;
    }

    pub(crate) fn append_error(&mut self, reason: Option<String>) {
        let text = reason
            .filter(|reason| !reason.is_empty())
            .unwrap_or_else(|| DELIVERY_FALLBACK_TEXT.to_string());
        self.thread.push(ThreadNode::Error(ErrorNode::new(text)));
        self.dirty = true;
    }

    /// Re-enables submit once a delivery resolves, whatever its outcome.
    pub(crate) fn finish_request(&mut self) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
        self.submit_enabled = true;
        self.dirty = true;
    }
}
