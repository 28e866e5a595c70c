//! Party roster resource.
//!
//! [`Party`] is the host's view of the player party: every actor with its
//! HP and active status conditions, plus the ordered member list used to
//! pick battle members. The portrait overlay only reads it.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::resources::picturerules::{ActorId, StateId};

/// Status condition that marks an actor as knocked out.
pub const DEATH_STATE_ID: StateId = 1;
/// Upper bound on simultaneous battle members.
pub const MAX_BATTLE_MEMBERS: usize = 8;
/// Default number of party members that fight.
pub const DEFAULT_BATTLE_MEMBERS: usize = 4;

/// Living battle members, in party order.
pub type BattleMembers = ArrayVec<ActorId, MAX_BATTLE_MEMBERS>;

/// One party member.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub hp: i32,
    pub mhp: i32,
    /// Active status conditions, in the order they were added.
    pub states: SmallVec<[StateId; 4]>,
    /// Whether the actor is present in the battle.
    pub appeared: bool,
}

impl Actor {
    pub fn new(id: ActorId, name: impl Into<String>, mhp: i32) -> Self {
        Self {
            id,
            name: name.into(),
            hp: mhp,
            mhp,
            states: SmallVec::new(),
            appeared: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.appeared && !self.states.contains(&DEATH_STATE_ID)
    }

    /// HP as a percentage of max HP; 0 when max HP is 0.
    pub fn hp_rate(&self) -> f32 {
        if self.mhp > 0 {
            self.hp as f32 / self.mhp as f32 * 100.0
        } else {
            0.0
        }
    }

    pub fn add_state(&mut self, state: StateId) {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
    }

    pub fn remove_state(&mut self, state: StateId) {
        self.states.retain(|s| *s != state);
    }

    /// Apply damage, adding the death state at 0 HP.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).clamp(0, self.mhp.max(0));
        if self.hp == 0 {
            self.add_state(DEATH_STATE_ID);
        }
    }
}

/// The player party.
#[derive(Resource, Debug, Clone)]
pub struct Party {
    actors: FxHashMap<ActorId, Actor>,
    /// Party order; the first `max_battle_members` fight.
    members: Vec<ActorId>,
    pub max_battle_members: usize,
}

impl Default for Party {
    fn default() -> Self {
        Self {
            actors: FxHashMap::default(),
            members: Vec::new(),
            max_battle_members: DEFAULT_BATTLE_MEMBERS,
        }
    }
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_battle_members(mut self, max: usize) -> Self {
        self.max_battle_members = max;
        self
    }

    /// Add an actor at the end of the party order.
    pub fn add_actor(&mut self, actor: Actor) {
        if !self.members.contains(&actor.id) {
            self.members.push(actor.id);
        }
        self.actors.insert(actor.id, actor);
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn members(&self) -> &[ActorId] {
        &self.members
    }

    /// Battle members that are appeared and alive, in party order.
    pub fn alive_battle_members(&self) -> BattleMembers {
        let limit = self.max_battle_members.min(MAX_BATTLE_MEMBERS);
        self.members
            .iter()
            .take(limit)
            .filter_map(|id| self.actors.get(id))
            .filter(|actor| actor.is_alive())
            .map(|actor| actor.id)
            .collect()
    }

    /// True when no battle member is left standing.
    pub fn is_all_dead(&self) -> bool {
        self.alive_battle_members().is_empty()
    }
}
