//! Z-index component for battle scene layering.
//!
//! The portrait sits above the battlefield spriteset and below every command
//! window; the host renderer sorts by this value.

use bevy_ecs::prelude::Component;

/// Rendering order hint; higher values are drawn on top.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const PORTRAIT: ZIndex = ZIndex(10);
}
