//! Session state machine.
//!
//! A [`Session`] mirrors what the identity provider reports and nothing
//! else: consumers read it, only the provider's change notifications write
//! it. It starts in the Initializing phase and leaves it exactly once, on
//! the provider's first report; after that `loading` never returns to true
//! for the lifetime of the subscription.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub type ListenerId = u64;

/// Opaque authenticated-user record supplied by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub handle: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// What consumers see: the identity (if any) and whether the provider has
/// reported yet. While `loading` is true, `identity` is not authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl SessionSnapshot {
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Initializing
        } else if self.identity.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The provider has not reported yet.
    Initializing,
    Authenticated,
    Unauthenticated,
}

/// Source of identity change notifications.
///
/// Providers report the current identity to a new subscriber and every
/// change thereafter (sign-in, sign-out, token refresh). A provider that
/// fails internally reports `None`, degrading the session to
/// Unauthenticated; there is no separate error channel.
pub trait IdentityProvider {
    fn subscribe(&self, listener: Box<dyn Fn(Option<Identity>)>) -> IdentitySubscription;
}

/// Cancellable provider subscription. The disposer runs at most once, on
/// explicit [`IdentitySubscription::cancel`] or on drop.
pub struct IdentitySubscription {
    disposer: Option<Box<dyn FnOnce()>>,
}

impl IdentitySubscription {
    pub fn new(disposer: impl FnOnce() + 'static) -> Self {
        Self {
            disposer: Some(Box::new(disposer)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl Drop for IdentitySubscription {
    fn drop(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

struct SessionInner {
    identity: Option<Identity>,
    loading: bool,
    listeners: HashMap<ListenerId, Rc<dyn Fn(SessionSnapshot)>>,
    next_listener: ListenerId,
}

/// Process-wide session: one logical session per client instance, shared by
/// every consumer through `Rc`.
pub struct Session {
    inner: Rc<RefCell<SessionInner>>,
    subscription: RefCell<Option<IdentitySubscription>>,
}

impl Session {
    /// Acquire the provider subscription and start mirroring its reports.
    pub fn connect(provider: &dyn IdentityProvider) -> Rc<Self> {
        let inner = Rc::new(RefCell::new(SessionInner {
            identity: None,
            loading: true,
            listeners: HashMap::new(),
            next_listener: 1,
        }));

        let session = Rc::new(Self {
            inner: Rc::clone(&inner),
            subscription: RefCell::new(None),
        });

        let subscription = provider.subscribe(Box::new(move |identity| {
            let (snapshot, listeners) = {
                let mut state = inner.borrow_mut();
                state.identity = identity;
                // Forward-only: the first report ends Initializing for good.
                state.loading = false;
                let snapshot = SessionSnapshot {
                    identity: state.identity.clone(),
                    loading: state.loading,
                };
                let listeners: Vec<Rc<dyn Fn(SessionSnapshot)>> =
                    state.listeners.values().cloned().collect();
                (snapshot, listeners)
            };
            for listener in listeners {
                listener(snapshot.clone());
            }
        }));
        *session.subscription.borrow_mut() = Some(subscription);
        session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.borrow();
        SessionSnapshot {
            identity: inner.identity.clone(),
            loading: inner.loading,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.snapshot().phase()
    }

    /// Register a change listener, called with the fresh snapshot after
    /// every provider report.
    pub fn subscribe(&self, listener: impl Fn(SessionSnapshot) + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.insert(id, Rc::new(listener));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner.borrow_mut().listeners.remove(&id);
    }

    /// Release the provider subscription and stop all notification. Safe to
    /// call more than once; the disposer runs only the first time.
    pub fn disconnect(&self) {
        if let Some(subscription) = self.subscription.borrow_mut().take() {
            subscription.cancel();
        }
        self.inner.borrow_mut().listeners.clear();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}
