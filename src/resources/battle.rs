//! Battle trigger signals.
//!
//! [`BattleStatus`] carries the per-frame facts the host battle manager
//! exposes: the current [`BattlePhase`], who is choosing a command, who is
//! acting and whether the party escaped. [`BattleSnapshot`] bundles it with
//! the [`Party`] and [`GameSwitches`] into the read-only [`BattleView`] the
//! portrait director consumes each tick.

use bevy_ecs::prelude::Resource;

use crate::resources::party::{BattleMembers, Party};
use crate::resources::picturerules::{ActorId, StateId, SwitchId};
use crate::resources::switches::GameSwitches;
use crate::systems::resolver::StateView;

/// Combat phase as reported by the battle manager.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BattlePhase {
    /// Start of battle, turn end, aborting, or any phase the overlay ignores.
    #[default]
    Other,
    /// Party command input.
    Input,
    /// Turn in progress, between actions.
    Turn,
    /// An action is being executed.
    Action,
    /// Battle is over (victory, escape or defeat).
    BattleEnd,
}

/// Host battle manager state.
#[derive(Resource, Debug, Clone, Default)]
pub struct BattleStatus {
    pub phase: BattlePhase,
    /// The party escaped.
    pub escaped: bool,
    /// Actor currently choosing a command.
    pub command_actor: Option<ActorId>,
    /// Party member performing the current action (enemies are `None`).
    pub action_subject: Option<ActorId>,
}

impl BattleStatus {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything the portrait director reads from the host each tick.
pub trait BattleView: StateView {
    fn phase(&self) -> BattlePhase;
    fn is_escaped(&self) -> bool;
    fn is_all_dead(&self) -> bool;
    fn command_actor(&self) -> Option<ActorId>;
    fn action_subject(&self) -> Option<ActorId>;
    /// HP percentage of an actor; 0 for unknown actors or max HP 0.
    fn hp_rate(&self, actor: ActorId) -> f32;
    /// Appeared and alive battle members, in party order.
    fn alive_battle_members(&self) -> BattleMembers;
}

/// Borrowed view over the host resources.
#[derive(Clone, Copy)]
pub struct BattleSnapshot<'a> {
    pub status: &'a BattleStatus,
    pub party: &'a Party,
    pub switches: &'a GameSwitches,
}

impl<'a> BattleSnapshot<'a> {
    pub fn new(status: &'a BattleStatus, party: &'a Party, switches: &'a GameSwitches) -> Self {
        Self {
            status,
            party,
            switches,
        }
    }
}

impl StateView for BattleSnapshot<'_> {
    fn actor_states(&self, actor: ActorId) -> &[StateId] {
        self.party
            .actor(actor)
            .map(|a| a.states.as_slice())
            .unwrap_or(&[])
    }

    fn switch_on(&self, switch: SwitchId) -> bool {
        self.switches.value(switch)
    }
}

impl BattleView for BattleSnapshot<'_> {
    fn phase(&self) -> BattlePhase {
        self.status.phase
    }
    fn is_escaped(&self) -> bool {
        self.status.escaped
    }
    fn is_all_dead(&self) -> bool {
        self.party.is_all_dead()
    }
    fn command_actor(&self) -> Option<ActorId> {
        self.status.command_actor
    }
    fn action_subject(&self) -> Option<ActorId> {
        self.status.action_subject
    }
    fn hp_rate(&self, actor: ActorId) -> f32 {
        self.party.actor(actor).map_or(0.0, |a| a.hp_rate())
    }
    fn alive_battle_members(&self) -> BattleMembers {
        self.party.alive_battle_members()
    }
}
