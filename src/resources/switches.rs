//! Global game switches.
//!
//! [`GameSwitches`] stores the host's boolean switches by numeric id. Like
//! world flags, presence in the set means ON. Picture rules can require a
//! switch to be ON before they apply.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashSet;

use crate::resources::picturerules::SwitchId;

#[derive(Resource, Debug, Clone, Default)]
pub struct GameSwitches {
    on: FxHashSet<SwitchId>,
}

impl GameSwitches {
    pub fn new() -> Self {
        Self::default()
    }
    /// Set a switch ON or OFF.
    pub fn set(&mut self, id: SwitchId, value: bool) {
        if value {
            self.on.insert(id);
        } else {
            self.on.remove(&id);
        }
    }
    /// Current value of a switch; unknown switches are OFF.
    pub fn value(&self, id: SwitchId) -> bool {
        self.on.contains(&id)
    }
}
