//! Custom hooks.

pub mod use_collection;

pub use use_collection::{use_collection, UseCollection};
