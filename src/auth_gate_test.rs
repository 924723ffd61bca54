use crate::auth_gate::{decide, GateDecision, RedirectLatch};

#[test]
fn initializing_always_defers() {
    assert_eq!(decide(true, false, false), GateDecision::Pending);
    assert_eq!(decide(true, true, false), GateDecision::Pending);
    assert_eq!(decide(true, false, true), GateDecision::Pending);
}

#[test]
fn authenticated_always_renders() {
    assert_eq!(decide(false, true, false), GateDecision::Allow);
    assert_eq!(decide(false, true, true), GateDecision::Allow);
}

#[test]
fn unauthenticated_on_auth_flow_passes_through() {
    assert_eq!(decide(false, false, true), GateDecision::PassThrough);
}

#[test]
fn unauthenticated_on_protected_path_redirects() {
    assert_eq!(decide(false, false, false), GateDecision::Redirect);
}

#[test]
fn latch_fires_once_per_redirect_entry() {
    let mut latch = RedirectLatch::new();

    assert!(latch.observe(GateDecision::Redirect));
    assert!(!latch.observe(GateDecision::Redirect));
    assert!(!latch.observe(GateDecision::Redirect));
}

#[test]
fn latch_rearms_on_any_other_decision() {
    let mut latch = RedirectLatch::new();

    assert!(latch.observe(GateDecision::Redirect));
    assert!(!latch.observe(GateDecision::Allow));
    assert!(latch.observe(GateDecision::Redirect));

    assert!(!latch.observe(GateDecision::Pending));
    assert!(latch.observe(GateDecision::Redirect));
}

#[test]
fn latch_never_fires_without_a_redirect() {
    let mut latch = RedirectLatch::new();

    assert!(!latch.observe(GateDecision::Pending));
    assert!(!latch.observe(GateDecision::Allow));
    assert!(!latch.observe(GateDecision::PassThrough));
}
