//! Shared components.

pub mod suspense;
pub mod ui;

pub use suspense::SuspenseBoundary;
