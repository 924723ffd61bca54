//! Render-or-redirect gate for protected content.
//!
//! The gate re-evaluates whenever the session snapshot or the current path
//! changes, and nothing else. The decision itself is a pure function; the
//! redirect side effect goes through a latch so repeated evaluations with
//! the same outcome fire at most one navigation.

use dioxus::prelude::*;

use crate::auth_session::SessionContext;
use crate::components::SuspenseBoundary;
use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session still initializing: show a placeholder, decide later.
    Pending,
    /// Authenticated: render the protected content.
    Allow,
    /// Unauthenticated on an auth-flow path: the auth page renders itself.
    PassThrough,
    /// Unauthenticated on a protected path: send to the login entry point.
    Redirect,
}

pub fn decide(loading: bool, authenticated: bool, on_auth_flow: bool) -> GateDecision {
    if loading {
        GateDecision::Pending
    } else if authenticated {
        GateDecision::Allow
    } else if on_auth_flow {
        GateDecision::PassThrough
    } else {
        GateDecision::Redirect
    }
}

/// Fires once per entry into the redirect state. Any non-redirect decision
/// re-arms it, so a later session expiry redirects again.
#[derive(Debug, Default)]
pub struct RedirectLatch {
    holding: bool,
}

impl RedirectLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, decision: GateDecision) -> bool {
        match decision {
            GateDecision::Redirect if !self.holding => {
                self.holding = true;
                true
            }
            GateDecision::Redirect => false,
            _ => {
                self.holding = false;
                false
            }
        }
    }
}

#[component]
pub fn AuthGate(children: Element) -> Element {
    let ctx = use_context::<SessionContext>();
    let nav = use_navigator();
    let route = use_route::<Route>();
    let on_auth_flow = route.is_auth_flow();

    // Track the path dimension in a signal so the effect below re-runs on
    // navigation, not just on session changes.
    let mut auth_flow_flag = use_signal(|| on_auth_flow);
    if auth_flow_flag() != on_auth_flow {
        auth_flow_flag.set(on_auth_flow);
    }

    let snapshot = ctx.snapshot;
    let mut latch = use_signal(RedirectLatch::new);

    use_effect(move || {
        let snap = snapshot();
        let decision = decide(snap.loading, snap.identity.is_some(), auth_flow_flag());
        if latch.write().observe(decision) {
            nav.replace(Route::Login {});
        }
    });

    let snap = snapshot();
    match decide(snap.loading, snap.identity.is_some(), on_auth_flow) {
        GateDecision::Pending => rsx! {
            SuspenseBoundary { pending: true, {children} }
        },
        GateDecision::Allow | GateDecision::PassThrough => children,
        // Render nothing while the navigation is in flight.
        GateDecision::Redirect => rsx! {},
    }
}
