//! Scripted battle timeline.
//!
//! A [`BattleTimeline`] is a list of [`BattleCue`]s keyed by frame number.
//! The timeline system plays them back against the host resources, standing
//! in for a battle manager: it moves the phase along, picks who is choosing
//! a command, deals damage and issues script commands.

use bevy_ecs::prelude::Resource;
use std::collections::VecDeque;

use crate::resources::battle::BattlePhase;
use crate::resources::picturerules::{ActorId, StateId, SwitchId};

/// One scripted change to the battle.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCue {
    /// Build a fresh battle scene.
    BeginBattle,
    /// Tear the battle scene down.
    EndBattle,
    Phase(BattlePhase),
    CommandActor(Option<ActorId>),
    ActionSubject(Option<ActorId>),
    /// Damage a battler; `None` is an enemy.
    Damage { actor: Option<ActorId>, amount: i32 },
    AddState { actor: ActorId, state: StateId },
    RemoveState { actor: ActorId, state: StateId },
    Switch { id: SwitchId, value: bool },
    Escape,
    /// Script command line for the portrait overlay, e.g. `setEnabled false`.
    Command(String),
}

#[derive(Resource, Debug, Clone, Default)]
pub struct BattleTimeline {
    frame: u64,
    cues: VecDeque<(u64, BattleCue)>,
}

impl BattleTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `cue` at `frame`. Cues on the same frame keep their order.
    pub fn at(mut self, frame: u64, cue: BattleCue) -> Self {
        let index = self.cues.partition_point(|(f, _)| *f <= frame);
        self.cues.insert(index, (frame, cue));
        self
    }

    /// Current frame number.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Remove and return the cues due this frame, then move to the next one.
    pub fn advance(&mut self) -> Vec<BattleCue> {
        let mut due = Vec::new();
        while self.cues.front().is_some_and(|(f, _)| *f <= self.frame) {
            if let Some((_, cue)) = self.cues.pop_front() {
                due.push(cue);
            }
        }
        self.frame += 1;
        due
    }

    pub fn is_finished(&self) -> bool {
        self.cues.is_empty()
    }
}
