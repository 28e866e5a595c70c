//! Event types and observers.
//!
//! Submodules:
//! - [`picture`] – commands and answers for the picture loader thread
//! - [`portrait`] – damage hook, enable toggle and script command parsing
pub mod picture;
pub mod portrait;
