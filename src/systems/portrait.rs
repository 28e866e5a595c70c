//! Battle portrait systems.
//!
//! - [`create_battle_portrait`] is the scene construction hook: it spawns
//!   the portrait layer with the sprite as its child and starts a fresh
//!   battle in the [`PortraitDirector`].
//! - [`destroy_battle_portrait`] tears the layer (and the sprite) down.
//! - [`portrait_update_system`] runs the director once per tick and writes
//!   a [`PictureCmd::Load`] whenever a new show needs its picture.
//! - [`apply_loaded_pictures`] hands finished loads back to the director.
//!
//! Run `apply_loaded_pictures` before `portrait_update_system` so a picture
//! that arrives this frame starts fading in on the same tick.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::portrait::{PortraitLayer, PortraitSprite};
use crate::components::zindex::ZIndex;
use crate::events::picture::{PictureCmd, PictureMessage};
use crate::resources::battle::{BattleSnapshot, BattleStatus};
use crate::resources::director::PortraitDirector;
use crate::resources::party::Party;
use crate::resources::picturerules::PictureRules;
use crate::resources::settings::PortraitSettings;
use crate::resources::switches::GameSwitches;

/// Build the portrait for a new battle scene.
///
/// Any layer left over from a previous scene is despawned first. Only the
/// director is reset; [`PortraitSettings`] survives across battles.
pub fn create_battle_portrait(
    mut commands: Commands,
    mut director: ResMut<PortraitDirector>,
    layers: Query<Entity, With<PortraitLayer>>,
) {
    for layer in layers.iter() {
        commands.entity(layer).despawn();
    }
    director.begin_battle();

    let layer = commands.spawn((PortraitLayer, ZIndex::PORTRAIT)).id();
    commands.spawn((PortraitSprite::new(), ChildOf(layer)));
    info!("Battle portrait created");
}

/// Despawn the portrait layer and its sprite.
pub fn destroy_battle_portrait(mut commands: Commands, layers: Query<Entity, With<PortraitLayer>>) {
    for layer in layers.iter() {
        commands.entity(layer).despawn();
    }
}

/// Advance the portrait director by one tick.
#[allow(clippy::too_many_arguments)]
pub fn portrait_update_system(
    mut director: ResMut<PortraitDirector>,
    mut sprites: Query<&mut PortraitSprite>,
    status: Res<BattleStatus>,
    party: Res<Party>,
    switches: Res<GameSwitches>,
    rules: Res<PictureRules>,
    settings: Res<PortraitSettings>,
    mut writer: MessageWriter<PictureCmd>,
) {
    let Ok(mut sprite) = sprites.single_mut() else {
        return;
    };

    let view = BattleSnapshot::new(&status, &party, &switches);
    if let Some(load) = director.update(&mut sprite, &view, &rules, settings.enabled) {
        debug!("Requesting picture '{}' (ticket {})", load.picture, load.ticket);
        writer.write(PictureCmd::Load {
            ticket: load.ticket,
            name: load.picture,
        });
    }
}

/// Forward finished picture loads to the director.
pub fn apply_loaded_pictures(
    mut reader: MessageReader<PictureMessage>,
    mut director: ResMut<PortraitDirector>,
    mut sprites: Query<&mut PortraitSprite>,
) {
    for msg in reader.read() {
        match msg {
            PictureMessage::Loaded {
                ticket,
                width,
                height,
                ..
            } => {
                let Ok(mut sprite) = sprites.single_mut() else {
                    continue;
                };
                director.image_loaded(&mut sprite, *ticket, *width, *height);
            }
            PictureMessage::LoadFailed {
                ticket,
                name,
                error,
            } => {
                debug!(
                    "Portrait picture '{}' failed to load (ticket {}): {}",
                    name, ticket, error
                );
            }
        }
    }
}
