//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing form state, keystroke routing, and focus-change evaluation.

pub mod state;

pub use state::*;
