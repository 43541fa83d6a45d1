use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::store::{KeyValueStore, MemoryStore, TOKEN_KEY, USER_KEY};
use crate::test_support::member;

fn signed_in() -> SessionState {
    let mut state = SessionState::default();
    state.login_succeeded(member(), "acc".into(), "ref".into());
    state
}

// =============================================================
// Restore
// =============================================================

#[test]
fn restore_from_empty_store_is_anonymous() {
    let state = SessionState::restore(&TokenStore::new(MemoryStore::new()));
    assert!(!state.is_authenticated());
    assert_eq!(state.phase(), AuthPhase::Anonymous);
    assert!(state.user().is_none());
}

#[test]
fn restore_picks_up_persisted_login() {
    let tokens = TokenStore::new(MemoryStore::new());
    tokens.save_login(&member(), "acc", "ref");
    let state = SessionState::restore(&tokens);
    assert!(state.is_authenticated());
    assert_eq!(state.user(), Some(&member()));
    assert_eq!(state.access_token(), Some("acc"));
    assert_eq!(state.refresh_token(), Some("ref"));
}

#[test]
fn restore_discards_token_without_profile() {
    let backend = MemoryStore::new();
    backend.set(TOKEN_KEY, "acc");
    backend.set(USER_KEY, "corrupt");
    let state = SessionState::restore(&TokenStore::new(backend.clone()));
    assert!(!state.is_authenticated());
    assert!(backend.is_empty());
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn begin_enters_authenticating_and_clears_error() {
    let mut state = SessionState::default();
    state.failed("bad");
    state.begin();
    assert_eq!(state.phase(), AuthPhase::Authenticating);
    assert!(state.is_loading());
    assert_eq!(state.error(), None);
}

#[test]
fn login_success_authenticates() {
    let mut state = SessionState::default();
    state.begin();
    state.login_succeeded(member(), "acc".into(), "ref".into());
    assert_eq!(state.phase(), AuthPhase::Authenticated);
    assert!(!state.is_loading());
    assert_eq!(state.role(), Some(Role::Member));
}

#[test]
fn failure_sets_error_without_authenticating() {
    let mut state = SessionState::default();
    state.begin();
    state.failed("Invalid credentials, please try again.");
    assert_eq!(state.phase(), AuthPhase::Error);
    assert!(!state.is_authenticated());
    assert_eq!(state.error(), Some("Invalid credentials, please try again."));
}

#[test]
fn register_success_does_not_authenticate() {
    let mut state = SessionState::default();
    state.begin();
    state.register_succeeded();
    assert_eq!(state.phase(), AuthPhase::Anonymous);
    assert!(!state.is_authenticated());
}

#[test]
fn logout_clears_identity_and_tokens() {
    let mut state = signed_in();
    state.logged_out();
    assert!(!state.is_authenticated());
    assert!(state.user().is_none());
    assert!(state.refresh_token().is_none());
}

#[test]
fn logout_discards_pending_error() {
    let mut state = signed_in();
    state.begin();
    state.failed("Network error. Please try again.");
    state.logged_out();
    assert_eq!(state.error(), None);
    assert_eq!(state.phase(), AuthPhase::Anonymous);
}

#[test]
fn clear_error_only_touches_error() {
    let mut state = signed_in();
    state.failed("x");
    state.clear_error();
    assert_eq!(state.error(), None);
    assert!(state.is_authenticated());
}

#[test]
fn authenticated_iff_access_token_present_across_transitions() {
    let mut state = SessionState::default();
    let steps: [fn(&mut SessionState); 7] = [
        SessionState::begin,
        |s| s.failed("e"),
        SessionState::clear_error,
        |s| s.login_succeeded(member(), "a".into(), "r".into()),
        SessionState::begin,
        SessionState::logged_out,
        SessionState::register_succeeded,
    ];
    for step in steps {
        step(&mut state);
        assert_eq!(state.is_authenticated(), state.access_token().is_some());
    }
}

// =============================================================
// SessionContext
// =============================================================

#[test]
fn context_clones_share_state() {
    let ctx = SessionContext::new(SessionState::default());
    let other = ctx.clone();
    other.apply(|s| s.login_succeeded(member(), "a".into(), "r".into()));
    assert!(ctx.snapshot().is_authenticated());
}

#[test]
fn listeners_see_every_transition() {
    let ctx = SessionContext::new(SessionState::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    ctx.subscribe(Arc::new(move |_state: &SessionState| {
        seen.fetch_add(1, Ordering::SeqCst);
    }));

    ctx.apply(SessionState::begin);
    ctx.apply(|s| s.failed("nope"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn listener_may_read_snapshot_without_deadlock() {
    let ctx = SessionContext::new(SessionState::default());
    let reader = ctx.clone();
    let observed = Arc::new(Mutex::new(None));
    let sink = observed.clone();
    ctx.subscribe(Arc::new(move |_state: &SessionState| {
        *sink.lock().unwrap() = Some(reader.snapshot().phase());
    }));
    ctx.apply(SessionState::begin);
    assert_eq!(*observed.lock().unwrap(), Some(AuthPhase::Authenticating));
}
