//! Process-wide portrait settings.
//!
//! [`PortraitSettings`] holds the one runtime switch the host may flip: the
//! overlay's enabled flag. It is inserted once at startup and, unlike the
//! [`PortraitDirector`](crate::resources::director::PortraitDirector), is
//! not reset when a battle scene is created or torn down, so a disabled
//! overlay stays disabled across battles until re-enabled.

use bevy_ecs::prelude::Resource;

use crate::error::PortraitError;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortraitSettings {
    pub enabled: bool,
}

impl Default for PortraitSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl PortraitSettings {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

/// Parse a command argument as a boolean.
///
/// Only the literals `true` and `false` are accepted.
pub fn parse_bool_literal(value: &str) -> Result<bool, PortraitError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(PortraitError::InvalidBool(other.to_string())),
    }
}
