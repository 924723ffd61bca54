//! UI primitives (Button, Card, Input).

pub mod button;
pub mod card;
pub mod input;

pub use button::*;
pub use card::*;
pub use input::*;
