//! Platform abstraction layer
//!
//! Maps raw key events to logical actions and samples them once per frame.
//! The browser shell feeds it from keyboard listeners; tests and the native
//! demo drive it directly.

pub mod input;

pub use input::{Action, InputState, key_binding};
