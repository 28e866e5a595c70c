//! Portrait host events and observers.
//!
//! - [`ActorDamagedEvent`] is the damage hook: the battle system triggers it
//!   whenever a battler takes damage, and [`on_actor_damaged`] latches it in
//!   the [`PortraitDirector`]; an enemy hit latches `None`.
//! - [`SetPortraitEnabledEvent`] is the runtime toggle, handled by
//!   [`on_set_portrait_enabled`]. Scripts reach it through
//!   [`PortraitCommand::parse`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::error::PortraitError;
use crate::resources::director::PortraitDirector;
use crate::resources::picturerules::ActorId;
use crate::resources::settings::{PortraitSettings, parse_bool_literal};

/// A battler took damage. Enemies carry no actor id.
#[derive(Event, Debug, Clone, Copy)]
pub struct ActorDamagedEvent {
    pub actor: Option<ActorId>,
}

/// Enable or disable the portrait overlay.
#[derive(Event, Debug, Clone, Copy)]
pub struct SetPortraitEnabledEvent {
    pub enabled: bool,
}

/// Latch the damaged battler for the next director tick.
pub fn on_actor_damaged(trigger: On<ActorDamagedEvent>, mut director: ResMut<PortraitDirector>) {
    let actor = trigger.event().actor;
    match actor {
        Some(id) => debug!("Actor {} damaged", id),
        None => debug!("Enemy damaged"),
    }
    director.notify_damage(actor);
}

pub fn on_set_portrait_enabled(
    trigger: On<SetPortraitEnabledEvent>,
    mut settings: ResMut<PortraitSettings>,
) {
    let enabled = trigger.event().enabled;
    if settings.enabled != enabled {
        info!(
            "Battle portrait {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }
    settings.enabled = enabled;
}

/// Script command addressed to the portrait overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortraitCommand {
    SetEnabled(bool),
}

impl PortraitCommand {
    /// Parse a command line such as `setEnabled false`.
    ///
    /// A missing argument to `setEnabled` means `true`.
    pub fn parse(line: &str) -> Result<Self, PortraitError> {
        let mut args = line.split_whitespace();
        match args.next() {
            Some("setEnabled") => {
                let enabled = match args.next() {
                    Some(arg) => parse_bool_literal(arg)?,
                    None => true,
                };
                Ok(PortraitCommand::SetEnabled(enabled))
            }
            _ => Err(PortraitError::UnknownCommand(line.trim().to_string())),
        }
    }

    /// Trigger the event this command stands for.
    pub fn apply(self, commands: &mut Commands) {
        match self {
            PortraitCommand::SetEnabled(enabled) => {
                commands.trigger(SetPortraitEnabledEvent { enabled });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_enabled() {
        assert_eq!(
            PortraitCommand::parse("setEnabled false").unwrap(),
            PortraitCommand::SetEnabled(false)
        );
        assert_eq!(
            PortraitCommand::parse("  setEnabled   true ").unwrap(),
            PortraitCommand::SetEnabled(true)
        );
        assert_eq!(
            PortraitCommand::parse("setEnabled").unwrap(),
            PortraitCommand::SetEnabled(true)
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            PortraitCommand::parse("setEnabled maybe"),
            Err(PortraitError::InvalidBool(_))
        ));
        assert!(matches!(
            PortraitCommand::parse("setVisible true"),
            Err(PortraitError::UnknownCommand(_))
        ));
        assert!(matches!(
            PortraitCommand::parse(""),
            Err(PortraitError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_observers_update_resources() {
        let mut world = World::new();
        world.insert_resource(PortraitSettings::default());
        world.insert_resource(PortraitDirector::with_seed(1));
        world.add_observer(on_set_portrait_enabled);
        world.add_observer(on_actor_damaged);
        world.flush();

        world.trigger(SetPortraitEnabledEvent { enabled: false });
        world.flush();
        assert!(!world.resource::<PortraitSettings>().enabled);

        world.trigger(ActorDamagedEvent { actor: Some(2) });
        world.flush();
        assert_eq!(world.resource::<PortraitDirector>().damaged_actor(), Some(2));

        // an enemy hit replaces the party member
        world.trigger(ActorDamagedEvent { actor: None });
        world.flush();
        assert_eq!(world.resource::<PortraitDirector>().damaged_actor(), None);
    }
}
