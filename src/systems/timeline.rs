//! Battle timeline playback.
//!
//! [`battle_timeline_system`] applies the cues due this frame to the host
//! resources. Scene changes run the hooks registered in the
//! [`SystemsStore`]; damage triggers [`ActorDamagedEvent`] and script
//! commands are parsed into [`PortraitCommand`]s.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::events::portrait::{ActorDamagedEvent, PortraitCommand};
use crate::resources::battle::{BattlePhase, BattleStatus};
use crate::resources::party::Party;
use crate::resources::switches::GameSwitches;
use crate::resources::systemsstore::{
    CREATE_BATTLE_PORTRAIT, DESTROY_BATTLE_PORTRAIT, SystemsStore,
};
use crate::resources::timeline::{BattleCue, BattleTimeline};

fn run_hook(commands: &mut Commands, store: &SystemsStore, name: &str) {
    match store.get(name) {
        Some(id) => {
            commands.run_system(*id);
        }
        None => warn!("No system registered as '{}'", name),
    }
}

pub fn battle_timeline_system(
    mut commands: Commands,
    mut timeline: ResMut<BattleTimeline>,
    mut status: ResMut<BattleStatus>,
    mut party: ResMut<Party>,
    mut switches: ResMut<GameSwitches>,
    store: Res<SystemsStore>,
) {
    let frame = timeline.frame();
    for cue in timeline.advance() {
        match cue {
            BattleCue::BeginBattle => {
                info!("[{}] Battle begins", frame);
                *status = BattleStatus::new();
                run_hook(&mut commands, &store, CREATE_BATTLE_PORTRAIT);
            }
            BattleCue::EndBattle => {
                info!("[{}] Battle scene closed", frame);
                *status = BattleStatus::new();
                run_hook(&mut commands, &store, DESTROY_BATTLE_PORTRAIT);
            }
            BattleCue::Phase(phase) => {
                if phase == BattlePhase::BattleEnd {
                    info!("[{}] Battle over", frame);
                }
                status.phase = phase;
            }
            BattleCue::CommandActor(actor) => status.command_actor = actor,
            BattleCue::ActionSubject(actor) => status.action_subject = actor,
            BattleCue::Damage { actor, amount } => {
                if let Some(target) = actor.and_then(|id| party.actor_mut(id)) {
                    target.take_damage(amount);
                    info!(
                        "[{}] {} takes {} damage ({}/{})",
                        frame, target.name, amount, target.hp, target.mhp
                    );
                }
                commands.trigger(ActorDamagedEvent { actor });
            }
            BattleCue::AddState { actor, state } => {
                if let Some(target) = party.actor_mut(actor) {
                    target.add_state(state);
                }
            }
            BattleCue::RemoveState { actor, state } => {
                if let Some(target) = party.actor_mut(actor) {
                    target.remove_state(state);
                }
            }
            BattleCue::Switch { id, value } => switches.set(id, value),
            BattleCue::Escape => status.escaped = true,
            BattleCue::Command(line) => match PortraitCommand::parse(&line) {
                Ok(command) => command.apply(&mut commands),
                Err(e) => warn!("[{}] Ignoring command '{}': {}", frame, line, e),
            },
        }
    }
}
