//! calcform - Formula Field Library
//!
//! A terminal form with formula-capable currency fields, built in Rust.
//! Typing `=2+3*4` into a currency field and moving focus away replaces the
//! text with the computed result.

pub mod domain;
pub mod application;
pub mod presentation;

pub use domain::*;
pub use application::*;
