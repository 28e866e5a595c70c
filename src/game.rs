//! Headless battle simulation.
//!
//! Wires the portrait overlay into a `bevy_ecs` world the way a battle
//! scene would: host resources, observers, the registered scene hooks and a
//! per-frame schedule. A [`BattleTimeline`] plays the part of the battle
//! manager, and [`portrait_report_system`] logs every portrait state change
//! so a run can be followed from the log alone.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::portrait::PortraitSprite;
use crate::events::picture::{PictureCmd, PictureMessage};
use crate::events::portrait::{on_actor_damaged, on_set_portrait_enabled};
use crate::resources::battle::{BattlePhase, BattleStatus};
use crate::resources::director::{PortraitDirector, PortraitState};
use crate::resources::gameconfig::GameConfig;
use crate::resources::party::{Actor, Party};
use crate::resources::picturerules::PictureRules;
use crate::resources::settings::PortraitSettings;
use crate::resources::switches::GameSwitches;
use crate::resources::systemsstore::{
    CREATE_BATTLE_PORTRAIT, DESTROY_BATTLE_PORTRAIT, SystemsStore,
};
use crate::resources::timeline::{BattleCue, BattleTimeline};
use crate::systems::picture::{
    forward_picture_cmds, poll_picture_messages, update_picture_cmds, update_picture_messages,
};
use crate::systems::portrait::{
    apply_loaded_pictures, create_battle_portrait, destroy_battle_portrait,
    portrait_update_system,
};
use crate::systems::timeline::battle_timeline_system;

/// State id the demo rules use for poison.
pub const POISON_STATE_ID: u32 = 4;
/// Switch the demo rules use for the "after the festival" outfits.
pub const FESTIVAL_SWITCH_ID: u32 = 12;

/// Build a world holding every resource, observer and scene hook the
/// portrait needs. The picture loader is not started here.
pub fn build_world(
    config: GameConfig,
    rules: PictureRules,
    party: Party,
    timeline: BattleTimeline,
    director: PortraitDirector,
) -> World {
    let mut world = World::new();
    world.insert_resource(PortraitSettings::new(config.enabled));
    world.insert_resource(party.with_max_battle_members(config.max_battle_members));
    world.insert_resource(config);
    world.insert_resource(rules);
    world.insert_resource(GameSwitches::new());
    world.insert_resource(BattleStatus::new());
    world.insert_resource(director);
    world.insert_resource(timeline);
    init_picture_messages(&mut world);

    world.add_observer(on_actor_damaged);
    world.add_observer(on_set_portrait_enabled);

    let mut systems_store = SystemsStore::new();
    let create_id = world.register_system(create_battle_portrait);
    systems_store.insert(CREATE_BATTLE_PORTRAIT, create_id);
    let destroy_id = world.register_system(destroy_battle_portrait);
    systems_store.insert(DESTROY_BATTLE_PORTRAIT, destroy_id);
    world.insert_resource(systems_store);

    world.flush();
    world
}

/// Make sure both picture message queues exist.
pub fn init_picture_messages(world: &mut World) {
    world.init_resource::<Messages<PictureCmd>>();
    world.init_resource::<Messages<PictureMessage>>();
}

/// Per-frame schedule.
///
/// With `threaded_loader` the loader bridge systems wrap the portrait
/// systems; without it the caller answers [`PictureCmd`]s itself by
/// draining and writing the message queues.
pub fn build_schedule(threaded_loader: bool) -> Schedule {
    let mut update = Schedule::default();
    if threaded_loader {
        update.add_systems(
            (
                battle_timeline_system,
                // pull loader answers first so they apply this frame
                poll_picture_messages,
                update_picture_messages,
                apply_loaded_pictures,
                portrait_update_system,
                portrait_report_system,
                forward_picture_cmds,
                update_picture_cmds,
            )
                .chain(),
        );
    } else {
        update.add_systems(
            (
                battle_timeline_system,
                update_picture_messages,
                apply_loaded_pictures,
                portrait_update_system,
                portrait_report_system,
            )
                .chain(),
        );
    }
    update
}

/// Log the portrait state whenever it changes.
pub fn portrait_report_system(
    director: Res<PortraitDirector>,
    timeline: Res<BattleTimeline>,
    sprites: Query<&PortraitSprite>,
    mut last: Local<Option<PortraitState>>,
) {
    let Ok(sprite) = sprites.single() else {
        *last = None;
        return;
    };
    let state = director.state(sprite);
    if *last == Some(state) {
        return;
    }
    *last = Some(state);
    info!(
        "[{}] portrait {:?}: picture={} opacity={} pos=({:.0}, {:.0}) motion={}",
        timeline.frame().saturating_sub(1),
        state,
        sprite.picture.as_deref().unwrap_or("-"),
        sprite.display_opacity(),
        sprite.pos.x,
        sprite.pos.y,
        director.motion()
    );
}

/// The four-member demo party.
pub fn demo_party() -> Party {
    let mut party = Party::new();
    party.add_actor(Actor::new(1, "Reid", 420));
    party.add_actor(Actor::new(2, "Priscilla", 310));
    party.add_actor(Actor::new(3, "Gale", 380));
    party.add_actor(Actor::new(4, "Harold", 290));
    party
}

/// One scripted battle: command input for every member, two actions with
/// damage on both sides, a poisoned member, a disabled stretch and a win.
pub fn demo_timeline() -> BattleTimeline {
    BattleTimeline::new()
        .at(0, BattleCue::BeginBattle)
        .at(10, BattleCue::Phase(BattlePhase::Input))
        .at(10, BattleCue::CommandActor(Some(1)))
        .at(70, BattleCue::CommandActor(Some(2)))
        .at(100, BattleCue::AddState {
            actor: 3,
            state: POISON_STATE_ID,
        })
        .at(130, BattleCue::CommandActor(Some(3)))
        .at(190, BattleCue::CommandActor(Some(4)))
        .at(250, BattleCue::CommandActor(None))
        .at(250, BattleCue::Phase(BattlePhase::Turn))
        .at(260, BattleCue::Phase(BattlePhase::Action))
        .at(260, BattleCue::ActionSubject(Some(1)))
        .at(275, BattleCue::Damage {
            actor: None,
            amount: 120,
        })
        .at(320, BattleCue::Phase(BattlePhase::Turn))
        .at(320, BattleCue::ActionSubject(None))
        .at(330, BattleCue::Phase(BattlePhase::Action))
        .at(345, BattleCue::Damage {
            actor: Some(4),
            amount: 230,
        })
        .at(400, BattleCue::Phase(BattlePhase::Turn))
        .at(405, BattleCue::RemoveState {
            actor: 3,
            state: POISON_STATE_ID,
        })
        .at(410, BattleCue::Switch {
            id: FESTIVAL_SWITCH_ID,
            value: true,
        })
        .at(420, BattleCue::Command("setEnabled false".to_string()))
        .at(420, BattleCue::Phase(BattlePhase::Input))
        .at(420, BattleCue::CommandActor(Some(4)))
        .at(470, BattleCue::Command("setEnabled true".to_string()))
        .at(520, BattleCue::CommandActor(None))
        .at(520, BattleCue::Phase(BattlePhase::Turn))
        .at(530, BattleCue::Phase(BattlePhase::Action))
        .at(530, BattleCue::ActionSubject(Some(2)))
        .at(545, BattleCue::Damage {
            actor: None,
            amount: 999,
        })
        .at(590, BattleCue::Phase(BattlePhase::BattleEnd))
        .at(710, BattleCue::EndBattle)
}

/// Run `frames` ticks, sleeping `frame_time` between them.
pub fn run(world: &mut World, schedule: &mut Schedule, frames: u64, frame_time: std::time::Duration) {
    for _ in 0..frames {
        schedule.run(world);
        world.clear_trackers();
        if !frame_time.is_zero() {
            std::thread::sleep(frame_time);
        }
    }
}
