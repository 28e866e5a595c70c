//! Registry for dynamically addressable systems.
//!
//! Scene hooks such as
//! [`create_battle_portrait`](crate::systems::portrait::create_battle_portrait)
//! are registered once under a string key and run on demand through their
//! [`SystemId`] when the battle timeline reaches a scene change.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

/// Key of the battle scene construction hook.
pub const CREATE_BATTLE_PORTRAIT: &str = "create_battle_portrait";
/// Key of the battle scene teardown hook.
pub const DESTROY_BATTLE_PORTRAIT: &str = "destroy_battle_portrait";

/// Map of string names to system IDs.
#[derive(Resource, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&SystemId> {
        self.map.get(name.as_ref())
    }
}
