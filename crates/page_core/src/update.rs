use crate::{ChatEffect, ChatMsg, ChatState, Role, Sidebar, SidebarEffect, SidebarMsg, ESCAPE_KEY};

/// Pure chat update: applies a message to state and returns any effects.
pub fn update_chat(mut state: ChatState, msg: ChatMsg) -> (ChatState, Vec<ChatEffect>) {
    let effects = match msg {
        ChatMsg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        ChatMsg::Submitted => match state.begin_submission() {
            // The user's message is already in the thread before the request leaves.
            Some((request_id, text)) => vec![
                ChatEffect::ScrollToBottom,
                ChatEffect::PostMessage { request_id, text },
            ],
            None => Vec::new(),
        },
        ChatMsg::ReplyReceived {
            request_id: _,
            messages,
        } => {
            if let Some(reply) = messages
                .iter()
                .find(|message| message.role == Role::Assistant)
            {
                state.append_message(reply);
            }
            state.finish_request();
            vec![ChatEffect::ScrollToBottom]
        }
        ChatMsg::DeliveryFailed {
            request_id: _,
            reason,
        } => {
            state.append_error(reason);
            state.finish_request();
            vec![ChatEffect::ScrollToBottom]
        }
        ChatMsg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Pure sidebar update: applies a message to state and returns any effects.
pub fn update_sidebar(mut state: Sidebar, msg: SidebarMsg) -> (Sidebar, Vec<SidebarEffect>) {
    let applied = match msg {
        SidebarMsg::TogglePressed => state.toggle(),
        SidebarMsg::ClosePressed | SidebarMsg::BackdropClicked => state.close(),
        SidebarMsg::KeyPressed(key) if key == ESCAPE_KEY => state.close(),
        SidebarMsg::KeyPressed(_) => None,
        SidebarMsg::Resized { width, at } => {
            let deadline = state.record_resize(width, at);
            return (state, vec![SidebarEffect::ScheduleSettle { deadline }]);
        }
        SidebarMsg::Tick { now } => state.settle(now),
    };

    let effects = applied.map(SidebarEffect::Apply).into_iter().collect();
    (state, effects)
}
