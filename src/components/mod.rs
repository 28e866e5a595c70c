//! ECS components for the battle portrait.
//!
//! Submodules overview:
//! - [`motion`] – the named motions and their frame lengths
//! - [`portrait`] – the portrait sprite, its layer marker and [`portrait::Vector2`]
//! - [`zindex`] – draw order of the battle scene layers

pub mod motion;
pub mod portrait;
pub mod zindex;
