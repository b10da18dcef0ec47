//! Session setup: the form players fill in, its validation, and the
//! handoff object the round engine starts from.

pub mod form;
pub mod handoff;
pub mod validate;

pub use form::{SetupForm, MAX_PLAYERS};
pub use handoff::SessionHandoff;
pub use validate::{validate_players, MIN_PLAYERS};
