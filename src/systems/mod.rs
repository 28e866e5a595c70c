//! Portrait systems and the pure engines behind them.
//!
//! Submodules overview
//! - [`motion`] – per-frame displacement of each motion
//! - [`picture`] – picture loader thread and its message bridge
//! - [`portrait`] – scene hooks and the per-tick portrait update
//! - [`resolver`] – rule cascade that picks a picture for an actor
//! - [`timeline`] – playback of scripted battle cues

pub mod motion;
pub mod picture;
pub mod portrait;
pub mod resolver;
pub mod timeline;
