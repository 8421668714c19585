use page_core::{update_chat, ChatMsg, ChatState};

#[test]
fn update_is_noop() {
    let state = ChatState::default();
    let (next, effects) = update_chat(state.clone(), ChatMsg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
