//! Opsboard - a Dioxus dashboard over a remote document store.
//!
//! The interesting parts are the two state machines everything else leans
//! on: per-collection data synchronization ([`collection`], surfaced by
//! [`hooks::use_collection`]) and the session/authorization gate
//! ([`session`], [`auth_gate`]). Both are plain single-threaded cores with
//! thin Dioxus wrappers.

pub mod api_client;
pub mod app;
pub mod auth_gate;
pub mod auth_session;
pub mod collection;
pub mod components;
pub mod error;
pub mod hooks;
pub mod identity;
pub mod logging;
pub mod models;
pub mod routes;
pub mod session;
pub mod storage;
pub mod store;
pub mod views;

pub use api_client::ApiClient;
pub use auth_session::{AuthProvider, SessionContext};
pub use collection::{Collection, CollectionSnapshot};
pub use error::StoreError;
pub use routes::Route;
pub use session::{Identity, Session, SessionPhase, SessionSnapshot};

#[cfg(test)]
mod auth_gate_test;
#[cfg(test)]
mod collection_test;
#[cfg(test)]
pub(crate) mod test_support;
