use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let first = state.push(ToastKind::Success, "Book added successfully");
    let second = state.push(ToastKind::Error, "Failed to add book");
    assert!(second > first);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[1].kind, ToastKind::Error);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let first = state.push(ToastKind::Success, "a");
    state.push(ToastKind::Success, "b");
    state.dismiss(first);
    state.dismiss(999);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].message, "b");
}

#[test]
fn queue_drops_oldest_beyond_limit() {
    let mut state = ToastState::default();
    for n in 0..=MAX_TOASTS {
        state.push(ToastKind::Success, format!("t{n}"));
    }
    assert_eq!(state.items.len(), MAX_TOASTS);
    assert_eq!(state.items[0].message, "t1");
}

#[test]
fn helpers_write_into_signal() {
    let toasts = RwSignal::new(ToastState::default());
    show_success(toasts, "ok");
    show_error(toasts, "nope");
    let kinds: Vec<ToastKind> = toasts.get_untracked().items.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Error]);
}

#[test]
fn kinds_map_to_modifier_classes() {
    assert_eq!(ToastKind::Success.class(), "toast toast--success");
    assert_eq!(ToastKind::Error.class(), "toast toast--error");
}
