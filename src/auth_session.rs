//! Session context for the component tree.
//!
//! [`AuthProvider`] owns the process-wide session: it connects the
//! [`Session`] state machine to the local identity provider, mirrors
//! snapshots into a signal for reactive consumers, and tears the
//! subscription down when it unmounts.

use std::rc::Rc;

use dioxus::prelude::*;

use crate::api_client::ApiClient;
use crate::identity::{LocalIdentityProvider, StoredSession};
use crate::session::{Identity, Session, SessionSnapshot};
use crate::store::{DocumentStore, HttpDocumentStore};

/// Handle to the session, provided to every component below [`AuthProvider`].
#[derive(Clone)]
pub struct SessionContext {
    pub session: Rc<Session>,
    pub provider: Rc<LocalIdentityProvider>,
    /// Reactive mirror of [`Session::snapshot`].
    pub snapshot: Signal<SessionSnapshot>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.snapshot.read().identity.is_some()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.snapshot.read().identity.clone()
    }

    /// API client carrying the current session token.
    pub fn client(&self) -> ApiClient {
        ApiClient::new().with_bearer(self.provider.token())
    }

    /// Document store bound to the current session token.
    pub fn store(&self) -> Rc<dyn DocumentStore> {
        Rc::new(HttpDocumentStore::new(self.client()))
    }

    pub fn sign_in(&self, session: StoredSession) {
        self.provider.sign_in(session);
    }

    pub fn sign_out(&self) {
        self.provider.sign_out();
    }
}

/// Provider component that sets up the session context.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let ctx = use_hook(|| {
        let provider = Rc::new(LocalIdentityProvider::restore());
        let session = Session::connect(provider.as_ref());
        let snapshot = Signal::new(session.snapshot());
        session.subscribe(move |snap| {
            // Signal is Copy; rebinding keeps the capture immutable so the
            // closure stays Fn.
            let mut snapshot = snapshot;
            snapshot.set(snap);
        });
        SessionContext {
            session,
            provider,
            snapshot,
        }
    });

    use_drop({
        let session = ctx.session.clone();
        move || session.disconnect()
    });

    use_context_provider(|| ctx.clone());

    children
}
