//! Local identity provider.
//!
//! The dashboard delegates token issuance to the auth endpoints; what the
//! client owns is the *change stream*: whoever is signed in right now, and
//! notifications when that changes. [`LocalIdentityProvider`] is that
//! stream, backed by persistent storage so a reload restores the session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::session::{Identity, IdentityProvider, IdentitySubscription};
use crate::storage;

const SESSION_KEY: &str = "opsboard_session";

/// What survives a reload: who is signed in and the bearer token proving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub identity: Identity,
    pub token: String,
}

struct ProviderState {
    current: Option<StoredSession>,
    listeners: HashMap<u64, Rc<dyn Fn(Option<Identity>)>>,
    next_listener: u64,
}

/// Process-wide identity provider instance. Consumers subscribe through the
/// [`IdentityProvider`] trait; only `sign_in`/`sign_out` mutate it.
pub struct LocalIdentityProvider {
    state: Rc<RefCell<ProviderState>>,
}

impl LocalIdentityProvider {
    /// Provider with whatever session storage still holds.
    pub fn restore() -> Self {
        Self::with_session(storage::load::<StoredSession>(SESSION_KEY))
    }

    pub fn with_session(current: Option<StoredSession>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ProviderState {
                current,
                listeners: HashMap::new(),
                next_listener: 1,
            })),
        }
    }

    /// Record a fresh sign-in and broadcast it.
    pub fn sign_in(&self, session: StoredSession) {
        storage::save(SESSION_KEY, &session);
        self.set_current(Some(session));
    }

    /// Clear the session (explicit logout or unauthorized reconciliation)
    /// and broadcast the sign-out.
    pub fn sign_out(&self) {
        storage::remove(SESSION_KEY);
        self.set_current(None);
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state
            .borrow()
            .current
            .as_ref()
            .map(|s| s.identity.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().current.as_ref().map(|s| s.token.clone())
    }

    fn set_current(&self, session: Option<StoredSession>) {
        let (identity, listeners) = {
            let mut state = self.state.borrow_mut();
            state.current = session;
            let identity = state.current.as_ref().map(|s| s.identity.clone());
            let listeners: Vec<Rc<dyn Fn(Option<Identity>)>> =
                state.listeners.values().cloned().collect();
            (identity, listeners)
        };
        for listener in listeners {
            listener(identity.clone());
        }
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn subscribe(&self, listener: Box<dyn Fn(Option<Identity>)>) -> IdentitySubscription {
        let listener: Rc<dyn Fn(Option<Identity>)> = Rc::from(listener);
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_listener;
            state.next_listener += 1;
            state.listeners.insert(id, Rc::clone(&listener));
            id
        };

        // A restored session is known synchronously, so the subscriber gets
        // its initial report right away.
        listener(self.identity());

        let state = Rc::clone(&self.state);
        IdentitySubscription::new(move || {
            state.borrow_mut().listeners.remove(&id);
        })
    }
}
