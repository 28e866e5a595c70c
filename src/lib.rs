//! Battle portrait library.
//!
//! A standing-picture overlay for turn-based battles: picks a character
//! picture for whoever is choosing a command, taking damage or celebrating
//! the win, then fades and animates it. Exposes the ECS components,
//! resources, systems and events for the demo binary and integration tests.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
