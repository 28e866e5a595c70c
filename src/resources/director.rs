//! Portrait director resource.
//!
//! The [`PortraitDirector`] owns the lifecycle of the battle portrait:
//!
//! ```text
//! Hidden -> Loading -> FadingIn -> Steady -> FadingOut -> Hidden
//! ```
//!
//! Every tick [`PortraitDirector::update`] looks at the battle state,
//! resolves a picture for each trigger (victory, then damage, then command;
//! the last one evaluated wins the shared sprite), starts a new show when
//! the triggering identity changed, and then advances the fade and the
//! motion. Picture loads are asynchronous: `update` hands back a
//! [`PictureLoad`] request and the host answers later through
//! [`PortraitDirector::image_loaded`]. Each request carries a ticket, and a
//! completion for anything but the latest ticket is ignored.
//!
//! All state that used to be global to a battle lives here, so a fresh
//! battle only needs [`PortraitDirector::begin_battle`].

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use log::debug;
use std::borrow::Cow;

use crate::components::motion::Motion;
use crate::components::portrait::{OPACITY_MAX, PortraitSprite, Vector2};
use crate::resources::battle::{BattlePhase, BattleView};
use crate::resources::picturerules::{
    ActorId, Origin, PictureCategory, PictureRule, PictureRules, VictoryActorPolicy,
};
use crate::systems::motion::advance;
use crate::systems::resolver::resolve;

/// Opacity change per tick while fading.
pub const FADE_STEP: u8 = 24;

/// Identifies one picture load request.
pub type LoadTicket = u64;

/// Request for the host to load a picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureLoad {
    pub ticket: LoadTicket,
    pub picture: String,
}

/// Coarse lifecycle state, derived from the director and its sprite.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortraitState {
    Hidden,
    Loading,
    FadingIn,
    Steady,
    FadingOut,
}

#[derive(Debug, Clone)]
struct PendingShow {
    ticket: LoadTicket,
    rule: PictureRule,
}

/// Battle portrait state machine.
#[derive(Resource, Debug)]
pub struct PortraitDirector {
    motion: Motion,
    frame_counter: i32,
    /// A new show was started and its picture still has to be requested.
    refresh_pending: bool,
    /// Battler hit most recently during the current action, `None` for an
    /// enemy; cleared outside actions.
    damaged_actor: Option<ActorId>,
    active_command_actor: Option<ActorId>,
    active_damage_actor: Option<ActorId>,
    last_action_actor: Option<ActorId>,
    battle_end: bool,
    first_actor: Option<ActorId>,
    random_actor: Option<ActorId>,
    next_ticket: LoadTicket,
    pending: Option<PendingShow>,
    rng: Rng,
}

impl Default for PortraitDirector {
    fn default() -> Self {
        Self::with_rng(Rng::new())
    }
}

impl PortraitDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Director with a deterministic random victory actor draw.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Rng::with_seed(seed))
    }

    fn with_rng(rng: Rng) -> Self {
        Self {
            motion: Motion::None,
            frame_counter: 0,
            refresh_pending: false,
            damaged_actor: None,
            active_command_actor: None,
            active_damage_actor: None,
            last_action_actor: None,
            battle_end: false,
            first_actor: None,
            random_actor: None,
            next_ticket: 0,
            pending: None,
            rng,
        }
    }

    /// Forget everything about the previous battle.
    ///
    /// Ticket numbering continues so that loads issued during the previous
    /// battle can never complete into this one.
    pub fn begin_battle(&mut self) {
        let next_ticket = self.next_ticket;
        let rng = std::mem::replace(&mut self.rng, Rng::with_seed(0));
        *self = Self::with_rng(rng);
        self.next_ticket = next_ticket;
    }

    /// Latch the battler that just took damage. Damage to an enemy
    /// (`None`) replaces any party member latched before it.
    pub fn notify_damage(&mut self, actor: Option<ActorId>) {
        self.damaged_actor = actor;
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn frame_counter(&self) -> i32 {
        self.frame_counter
    }

    pub fn active_command_actor(&self) -> Option<ActorId> {
        self.active_command_actor
    }

    pub fn active_damage_actor(&self) -> Option<ActorId> {
        self.active_damage_actor
    }

    pub fn damaged_actor(&self) -> Option<ActorId> {
        self.damaged_actor
    }

    pub fn last_action_actor(&self) -> Option<ActorId> {
        self.last_action_actor
    }

    pub fn is_battle_end(&self) -> bool {
        self.battle_end
    }

    /// Ticket of the load the director is waiting for, if any.
    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    /// Actor the victory portrait uses under `policy`.
    pub fn victory_actor(&self, policy: VictoryActorPolicy) -> Option<ActorId> {
        match policy {
            VictoryActorPolicy::LastActor => self.last_action_actor,
            VictoryActorPolicy::FirstActor => self.first_actor,
            VictoryActorPolicy::RandomActor => self.random_actor,
        }
    }

    pub fn state(&self, sprite: &PortraitSprite) -> PortraitState {
        if self.pending.is_some() {
            PortraitState::Loading
        } else if !sprite.showing || sprite.opacity == 0 {
            PortraitState::Hidden
        } else if sprite.closing {
            PortraitState::FadingOut
        } else if sprite.opacity == OPACITY_MAX {
            PortraitState::Steady
        } else {
            PortraitState::FadingIn
        }
    }

    /// Advance the portrait by one tick.
    ///
    /// Returns a load request when a new show needs its picture. While
    /// `enabled` is false nothing advances and the sprite is only marked as
    /// suppressed, so the fade resumes where it stopped once re-enabled.
    pub fn update<V: BattleView + ?Sized>(
        &mut self,
        sprite: &mut PortraitSprite,
        view: &V,
        rules: &PictureRules,
        enabled: bool,
    ) -> Option<PictureLoad> {
        sprite.suppressed = !enabled;
        if !enabled {
            return None;
        }

        let phase = view.phase();
        if let Some(subject) = view.action_subject() {
            self.last_action_actor = Some(subject);
        }

        let mut picture: Option<Cow<'_, PictureRule>> = None;

        if phase == BattlePhase::BattleEnd {
            if !view.is_escaped() && !view.is_all_dead() {
                if !self.battle_end {
                    self.draw_victory_candidates(view);
                }
                let actor = self.victory_actor(rules.victory_actor);
                picture = resolve(actor, rules.list(PictureCategory::Victory), view)
                    .map(Cow::Borrowed);
                if !self.battle_end {
                    if let Some(rule) = &picture {
                        self.begin_show(sprite, PictureCategory::Victory, actor, rule.motion);
                    }
                }
            }
            self.battle_end = true;
        }

        if let Some(damaged) = self.damaged_actor {
            if phase == BattlePhase::Action {
                picture = resolve(Some(damaged), rules.list(PictureCategory::Damage), view)
                    .map(Cow::Borrowed);
                if let Some(rule) = &picture {
                    if self.active_damage_actor != Some(damaged) {
                        self.active_damage_actor = Some(damaged);
                        self.begin_show(sprite, PictureCategory::Damage, Some(damaged), rule.motion);
                    }
                }
            } else {
                self.damaged_actor = None;
                picture = None;
            }
        }

        if matches!(phase, BattlePhase::Input | BattlePhase::Turn) {
            if let Some(actor) = view.command_actor() {
                picture = resolve(Some(actor), rules.list(PictureCategory::Command), view)
                    .map(Cow::Borrowed);
                if self.active_command_actor != Some(actor) {
                    if let Some(rule) = picture.take() {
                        self.active_command_actor = Some(actor);
                        picture = Some(self.begin_command_show(sprite, view, actor, rule));
                    }
                }
            }
        }

        let mut load = None;
        match &picture {
            Some(rule) => {
                if self.refresh_pending {
                    load = Some(self.refresh(sprite, rule));
                    self.refresh_pending = false;
                }
                fade_in(sprite);
            }
            None => self.fade_out(sprite),
        }

        if self.frame_counter > 0 && sprite.showing {
            self.frame_counter = advance(&mut sprite.pos, self.motion, self.frame_counter);
        }

        load
    }

    /// Host callback: the picture for `ticket` finished loading.
    ///
    /// Returns false when the ticket was superseded by a newer show.
    pub fn image_loaded(
        &mut self,
        sprite: &mut PortraitSprite,
        ticket: LoadTicket,
        width: u32,
        height: u32,
    ) -> bool {
        let Some(PendingShow { rule, .. }) = self.pending.take_if(|p| p.ticket == ticket) else {
            debug!("Ignoring stale portrait load (ticket {})", ticket);
            return false;
        };

        let scale = Vector2::new(rule.scale_x / 100.0, rule.scale_y / 100.0);
        let pos = match rule.origin {
            Origin::TopLeft => Vector2::new(rule.x, rule.y),
            Origin::Center => Vector2::new(
                rule.x - width as f32 * scale.x / 2.0,
                rule.y - height as f32 * scale.y / 2.0,
            ),
        };
        debug!(
            "Portrait '{}' loaded ({}x{}) at ({}, {})",
            rule.image_name, width, height, pos.x, pos.y
        );

        sprite.pos = pos;
        sprite.origin = pos;
        sprite.scale = scale;
        sprite.size = Vector2::new(width as f32, height as f32);
        sprite.picture = Some(rule.image_name);
        sprite.showing = true;
        true
    }

    fn draw_victory_candidates<V: BattleView + ?Sized>(&mut self, view: &V) {
        let alive = view.alive_battle_members();
        self.first_actor = alive.first().copied();
        self.random_actor = if alive.is_empty() {
            None
        } else {
            Some(alive[self.rng.usize(..alive.len())])
        };
        debug!(
            "Victory candidates: last={:?} first={:?} random={:?}",
            self.last_action_actor, self.first_actor, self.random_actor
        );
    }

    /// New command show, swapping in the pinch picture at low HP.
    fn begin_command_show<'r, V: BattleView + ?Sized>(
        &mut self,
        sprite: &mut PortraitSprite,
        view: &V,
        actor: ActorId,
        rule: Cow<'r, PictureRule>,
    ) -> Cow<'r, PictureRule> {
        let in_pinch = rule
            .pinch_percentage
            .is_some_and(|threshold| view.hp_rate(actor) <= threshold);
        if !in_pinch {
            self.begin_show(sprite, PictureCategory::Command, Some(actor), rule.motion);
            return rule;
        }

        let motion = rule.pinch_motion.unwrap_or(rule.motion);
        self.begin_show(sprite, PictureCategory::Command, Some(actor), motion);
        match rule.pinch_image_name.clone() {
            Some(image_name) => {
                let mut rule = rule.into_owned();
                rule.image_name = image_name;
                Cow::Owned(rule)
            }
            None => rule,
        }
    }

    fn begin_show(
        &mut self,
        sprite: &mut PortraitSprite,
        category: PictureCategory,
        actor: Option<ActorId>,
        motion: Motion,
    ) {
        debug!(
            "New {} portrait for actor {:?} (motion {})",
            category, actor, motion
        );
        self.refresh_pending = true;
        self.motion = motion;
        self.frame_counter = motion.frame_length();
        sprite.opacity = 0;
        sprite.opening = false;
        sprite.closing = false;
    }

    fn refresh(&mut self, sprite: &mut PortraitSprite, rule: &PictureRule) -> PictureLoad {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.pending = Some(PendingShow {
            ticket,
            rule: rule.clone(),
        });
        sprite.picture = None;
        sprite.showing = false;
        PictureLoad {
            ticket,
            picture: rule.image_name.clone(),
        }
    }

    fn fade_out(&mut self, sprite: &mut PortraitSprite) {
        if sprite.opacity == 0 {
            self.active_command_actor = None;
            self.active_damage_actor = None;
            sprite.closing = false;
            return;
        }
        sprite.closing = true;
        sprite.opacity = sprite.opacity.saturating_sub(FADE_STEP);
    }
}

fn fade_in(sprite: &mut PortraitSprite) {
    if !sprite.showing {
        return;
    }
    if sprite.opacity >= OPACITY_MAX {
        sprite.opening = false;
        sprite.opacity = OPACITY_MAX;
        return;
    }
    sprite.opening = true;
    sprite.closing = false;
    sprite.opacity = sprite.opacity.saturating_add(FADE_STEP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::battle::{BattleSnapshot, BattleStatus};
    use crate::resources::party::{Actor, Party};
    use crate::resources::switches::GameSwitches;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    struct Host {
        status: BattleStatus,
        party: Party,
        switches: GameSwitches,
        rules: PictureRules,
        director: PortraitDirector,
        sprite: PortraitSprite,
        enabled: bool,
    }

    impl Host {
        fn new() -> Self {
            let mut party = Party::new();
            party.add_actor(Actor::new(1, "Reid", 100));
            party.add_actor(Actor::new(2, "Priscilla", 100));
            party.add_actor(Actor::new(3, "Gale", 100));
            let rules = PictureRules {
                command: vec![
                    PictureRule::new(1, "reid").with_pinch(
                        25.0,
                        Some("reid_pinch"),
                        Some(Motion::Breathing),
                    ),
                    PictureRule::new(2, "priscilla").with_motion(Motion::Yes),
                    PictureRule::new(3, "gale").with_pinch(50.0, None, Some(Motion::Jump)),
                ],
                damage: vec![
                    PictureRule::new(1, "reid_hurt").with_motion(Motion::Damage),
                    PictureRule::new(2, "priscilla_hurt"),
                ],
                victory: vec![
                    PictureRule::new(1, "reid_win"),
                    PictureRule::new(2, "priscilla_win"),
                    PictureRule::new(3, "gale_win"),
                ],
                victory_actor: VictoryActorPolicy::LastActor,
            };
            Self {
                status: BattleStatus::new(),
                party,
                switches: GameSwitches::new(),
                rules,
                director: PortraitDirector::with_seed(7),
                sprite: PortraitSprite::new(),
                enabled: true,
            }
        }

        fn tick(&mut self) -> Option<PictureLoad> {
            let view = BattleSnapshot::new(&self.status, &self.party, &self.switches);
            self.director
                .update(&mut self.sprite, &view, &self.rules, self.enabled)
        }

        fn load(&mut self, request: &PictureLoad) -> bool {
            self.director
                .image_loaded(&mut self.sprite, request.ticket, 200, 400)
        }

        fn command(&mut self, actor: Option<ActorId>) {
            self.status.phase = BattlePhase::Input;
            self.status.command_actor = actor;
        }

        /// Select `actor`, complete its load and fade fully in.
        fn show_command(&mut self, actor: ActorId) -> PictureLoad {
            self.command(Some(actor));
            let request = self.tick().expect("load request");
            assert!(self.load(&request));
            for _ in 0..12 {
                assert_eq!(self.tick(), None);
            }
            request
        }
    }

    #[test]
    fn test_command_show_requests_picture_once() {
        let mut host = Host::new();
        host.command(Some(1));
        let request = host.tick().unwrap();
        assert_eq!(request.picture, "reid");
        assert_eq!(host.director.state(&host.sprite), PortraitState::Loading);
        assert_eq!(host.sprite.opacity, 0);
        assert_eq!(host.director.active_command_actor(), Some(1));

        // still loading: nothing fades, nothing is requested again
        assert_eq!(host.tick(), None);
        assert_eq!(host.sprite.opacity, 0);
        assert!(!host.sprite.showing);
    }

    #[test]
    fn test_fade_in_is_monotonic_and_clamps() {
        let mut host = Host::new();
        host.command(Some(1));
        let request = host.tick().unwrap();
        assert!(host.load(&request));
        assert!(host.sprite.showing);
        assert!(approx_eq(host.sprite.pos.x, 464.0));
        assert!(approx_eq(host.sprite.pos.y, 96.0));

        let mut last = host.sprite.opacity;
        let mut ticks = 0;
        while host.sprite.opacity < OPACITY_MAX {
            host.tick();
            assert!(host.sprite.opacity >= last);
            last = host.sprite.opacity;
            ticks += 1;
            assert!(ticks <= 11);
        }
        assert_eq!(ticks, 11);
        assert_eq!(host.sprite.opacity, 255);
        assert!(host.sprite.opening);
        host.tick();
        assert_eq!(host.sprite.opacity, 255);
        assert!(!host.sprite.opening);
        assert_eq!(host.director.state(&host.sprite), PortraitState::Steady);
    }

    #[test]
    fn test_fade_out_then_identity_clears() {
        let mut host = Host::new();
        host.show_command(1);
        host.command(None);

        let mut last = host.sprite.opacity;
        let mut ticks = 0;
        while host.sprite.opacity > 0 {
            host.tick();
            assert!(host.sprite.opacity <= last);
            assert!(host.sprite.closing || host.sprite.opacity == 0);
            last = host.sprite.opacity;
            ticks += 1;
        }
        assert_eq!(ticks, 11);
        assert_eq!(host.director.active_command_actor(), Some(1));
        host.tick();
        assert_eq!(host.director.active_command_actor(), None);
        assert!(!host.sprite.closing);
        assert_eq!(host.director.state(&host.sprite), PortraitState::Hidden);
    }

    #[test]
    fn test_same_actor_does_not_retrigger() {
        let mut host = Host::new();
        host.show_command(1);
        host.status.phase = BattlePhase::Turn;
        assert_eq!(host.tick(), None);
        assert_eq!(host.sprite.opacity, 255);
    }

    #[test]
    fn test_actor_change_starts_new_show() {
        let mut host = Host::new();
        let first = host.show_command(1);
        host.command(Some(2));
        let second = host.tick().unwrap();
        assert_eq!(second.picture, "priscilla");
        assert!(second.ticket > first.ticket);
        assert_eq!(host.sprite.opacity, 0);
        assert!(!host.sprite.showing);
        assert_eq!(host.director.motion(), Motion::Yes);
        assert_eq!(host.director.frame_counter(), 24);
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut host = Host::new();
        host.command(Some(1));
        let stale = host.tick().unwrap();
        host.command(Some(2));
        let fresh = host.tick().unwrap();

        assert!(!host.load(&stale));
        assert!(!host.sprite.showing);
        assert_eq!(host.director.pending_ticket(), Some(fresh.ticket));
        assert!(host.load(&fresh));
        assert_eq!(host.sprite.picture.as_deref(), Some("priscilla"));
        assert!(!host.load(&fresh));
    }

    #[test]
    fn test_center_origin_and_flip() {
        let mut host = Host::new();
        host.rules.command[0] = PictureRule::new(1, "reid")
            .with_position(Origin::Center, 400.0, 300.0)
            .with_scale(-50.0, 100.0);
        host.command(Some(1));
        let request = host.tick().unwrap();
        assert!(host.load(&request));
        // x - 200 * -0.5 / 2, y - 400 * 1.0 / 2
        assert!(approx_eq(host.sprite.pos.x, 450.0));
        assert!(approx_eq(host.sprite.pos.y, 100.0));
        assert!(approx_eq(host.sprite.scale.x, -0.5));
        assert!(host.sprite.flip_h());
        assert_eq!(host.sprite.origin, host.sprite.pos);
    }

    #[test]
    fn test_pinch_boundary_is_inclusive() {
        let mut host = Host::new();
        host.party.actor_mut(1).unwrap().hp = 25;
        host.command(Some(1));
        let request = host.tick().unwrap();
        assert_eq!(request.picture, "reid_pinch");
        assert_eq!(host.director.motion(), Motion::Breathing);
        assert_eq!(host.director.frame_counter(), 96);
    }

    #[test]
    fn test_above_pinch_uses_normal_picture() {
        let mut host = Host::new();
        host.party.actor_mut(1).unwrap().hp = 26;
        host.command(Some(1));
        let request = host.tick().unwrap();
        assert_eq!(request.picture, "reid");
        assert_eq!(host.director.motion(), Motion::None);
    }

    #[test]
    fn test_pinch_without_image_keeps_picture() {
        let mut host = Host::new();
        host.party.actor_mut(3).unwrap().hp = 10;
        host.command(Some(3));
        let request = host.tick().unwrap();
        assert_eq!(request.picture, "gale");
        assert_eq!(host.director.motion(), Motion::Jump);
    }

    #[test]
    fn test_zero_max_hp_counts_as_pinch() {
        let mut host = Host::new();
        host.party.actor_mut(1).unwrap().mhp = 0;
        host.command(Some(1));
        assert_eq!(host.tick().unwrap().picture, "reid_pinch");
    }

    #[test]
    fn test_damage_show_during_action() {
        let mut host = Host::new();
        host.show_command(1);
        host.status.phase = BattlePhase::Action;
        host.status.command_actor = None;
        host.director.notify_damage(Some(2));
        let request = host.tick().unwrap();
        assert_eq!(request.picture, "priscilla_hurt");
        assert_eq!(host.director.active_damage_actor(), Some(2));
        // the command track is untouched
        assert_eq!(host.director.active_command_actor(), Some(1));

        // same victim again does not restart
        host.director.notify_damage(Some(2));
        assert_eq!(host.tick(), None);
    }

    #[test]
    fn test_damage_latch_clears_outside_action() {
        let mut host = Host::new();
        host.director.notify_damage(Some(1));
        host.status.phase = BattlePhase::Turn;
        assert_eq!(host.tick(), None);
        assert_eq!(host.director.damaged_actor(), None);
    }

    #[test]
    fn test_command_wins_over_stale_damage_latch() {
        let mut host = Host::new();
        host.director.notify_damage(Some(1));
        host.command(Some(2));
        let request = host.tick().unwrap();
        assert_eq!(request.picture, "priscilla");
        assert_eq!(host.director.damaged_actor(), None);
        assert_eq!(host.director.active_damage_actor(), None);
    }

    #[test]
    fn test_damage_without_rule_fades_out() {
        let mut host = Host::new();
        host.show_command(1);
        host.status.phase = BattlePhase::Action;
        host.status.command_actor = None;
        host.director.notify_damage(Some(3));
        assert_eq!(host.tick(), None);
        assert_eq!(host.sprite.opacity, 255 - FADE_STEP);
        assert!(host.sprite.closing);
    }

    #[test]
    fn test_enemy_damage_replaces_latch_and_fades_out() {
        let mut host = Host::new();
        host.status.phase = BattlePhase::Action;
        host.director.notify_damage(Some(1));
        let request = host.tick().unwrap();
        assert_eq!(request.picture, "reid_hurt");
        assert!(host.load(&request));
        for _ in 0..12 {
            assert_eq!(host.tick(), None);
        }
        assert_eq!(host.sprite.opacity, 255);

        // counter-attack lands on the enemy
        host.director.notify_damage(None);
        assert_eq!(host.director.damaged_actor(), None);
        assert_eq!(host.tick(), None);
        assert_eq!(host.sprite.opacity, 255 - FADE_STEP);
        assert!(host.sprite.closing);
    }

    #[test]
    fn test_victory_last_actor() {
        let mut host = Host::new();
        host.status.phase = BattlePhase::Action;
        host.status.action_subject = Some(3);
        host.tick();
        host.status.action_subject = None;
        host.status.phase = BattlePhase::BattleEnd;
        let request = host.tick().unwrap();
        assert_eq!(request.picture, "gale_win");
        assert!(host.director.is_battle_end());
        assert_eq!(host.director.motion(), Motion::None);
    }

    #[test]
    fn test_victory_fires_once() {
        let mut host = Host::new();
        host.rules.victory_actor = VictoryActorPolicy::FirstActor;
        host.status.phase = BattlePhase::BattleEnd;
        let request = host.tick().unwrap();
        assert_eq!(request.picture, "reid_win");
        assert!(host.load(&request));
        for _ in 0..20 {
            assert_eq!(host.tick(), None);
        }
        assert_eq!(host.sprite.opacity, 255);
    }

    #[test]
    fn test_victory_first_actor_skips_dead() {
        let mut host = Host::new();
        host.rules.victory_actor = VictoryActorPolicy::FirstActor;
        host.party.actor_mut(1).unwrap().take_damage(999);
        host.status.phase = BattlePhase::BattleEnd;
        assert_eq!(host.tick().unwrap().picture, "priscilla_win");
    }

    #[test]
    fn test_victory_random_single_survivor() {
        for seed in 0..10 {
            let mut host = Host::new();
            host.director = PortraitDirector::with_seed(seed);
            host.rules.victory_actor = VictoryActorPolicy::RandomActor;
            host.party.actor_mut(1).unwrap().take_damage(999);
            host.party.actor_mut(2).unwrap().take_damage(999);
            host.status.phase = BattlePhase::BattleEnd;
            assert_eq!(host.tick().unwrap().picture, "gale_win");
            assert_eq!(
                host.director.victory_actor(VictoryActorPolicy::RandomActor),
                Some(3)
            );
        }
    }

    #[test]
    fn test_victory_random_is_cached() {
        let mut host = Host::new();
        host.rules.victory_actor = VictoryActorPolicy::RandomActor;
        host.status.phase = BattlePhase::BattleEnd;
        host.tick().unwrap();
        let chosen = host.director.victory_actor(VictoryActorPolicy::RandomActor);
        assert!(chosen.is_some());
        for _ in 0..10 {
            host.tick();
            assert_eq!(
                host.director.victory_actor(VictoryActorPolicy::RandomActor),
                chosen
            );
        }
    }

    #[test]
    fn test_escape_shows_no_victory_but_latches() {
        let mut host = Host::new();
        host.rules.victory_actor = VictoryActorPolicy::FirstActor;
        host.status.phase = BattlePhase::BattleEnd;
        host.status.escaped = true;
        assert_eq!(host.tick(), None);
        assert!(host.director.is_battle_end());
        // escape flag dropping later does not fire a late victory show
        host.status.escaped = false;
        assert_eq!(host.tick(), None);
    }

    #[test]
    fn test_all_dead_shows_nothing() {
        let mut host = Host::new();
        host.rules.victory_actor = VictoryActorPolicy::FirstActor;
        for id in 1..=3 {
            host.party.actor_mut(id).unwrap().take_damage(999);
        }
        host.status.phase = BattlePhase::BattleEnd;
        assert_eq!(host.tick(), None);
    }

    #[test]
    fn test_disable_mid_fade_preserves_bookkeeping() {
        let mut host = Host::new();
        host.command(Some(1));
        let request = host.tick().unwrap();
        host.load(&request);
        for _ in 0..3 {
            host.tick();
        }
        assert_eq!(host.sprite.opacity, 72);

        host.enabled = false;
        assert_eq!(host.tick(), None);
        assert_eq!(host.sprite.display_opacity(), 0);
        assert_eq!(host.sprite.opacity, 72);
        assert_eq!(host.director.active_command_actor(), Some(1));
        host.tick();
        assert_eq!(host.sprite.opacity, 72);

        host.enabled = true;
        host.tick();
        assert_eq!(host.sprite.opacity, 96);
        assert_eq!(host.sprite.display_opacity(), 96);
    }

    #[test]
    fn test_motion_waits_for_load() {
        let mut host = Host::new();
        host.command(Some(2));
        let request = host.tick().unwrap();
        assert_eq!(host.director.frame_counter(), 24);
        host.tick();
        assert_eq!(host.director.frame_counter(), 24);
        host.load(&request);
        host.tick();
        assert_eq!(host.director.frame_counter(), 23);
        assert!(approx_eq(host.sprite.pos.y, 98.0));
        for _ in 0..30 {
            host.tick();
        }
        assert_eq!(host.director.frame_counter(), 0);
        assert!(approx_eq(host.sprite.pos.y, 96.0));
    }

    #[test]
    fn test_finished_motion_keeps_offset_until_next_show() {
        let mut host = Host::new();
        host.rules.command[1] = PictureRule::new(2, "priscilla").with_motion(Motion::RunRight);
        host.show_command(2);
        for _ in 0..120 {
            host.tick();
        }
        assert_eq!(host.director.frame_counter(), 0);
        // 464 + 97 * 16, first step past the run limit
        assert!(approx_eq(host.sprite.pos.x, 2016.0));
        assert!(approx_eq(host.sprite.pos.y, 96.0));

        host.command(None);
        for _ in 0..12 {
            host.tick();
        }
        assert_eq!(host.director.state(&host.sprite), PortraitState::Hidden);
        assert_eq!(host.director.active_command_actor(), None);
        assert!(approx_eq(host.sprite.pos.x, 2016.0));

        host.command(Some(2));
        let request = host.tick().unwrap();
        assert!(approx_eq(host.sprite.pos.x, 2016.0));
        assert!(host.load(&request));
        assert!(approx_eq(host.sprite.pos.x, 464.0));
        assert!(approx_eq(host.sprite.pos.y, 96.0));
    }

    #[test]
    fn test_new_show_drops_offset_of_interrupted_motion() {
        let mut host = Host::new();
        host.rules.command[1] =
            PictureRule::new(2, "priscilla").with_motion(Motion::FloatRightFast);
        host.command(Some(2));
        let request = host.tick().unwrap();
        assert!(host.load(&request));
        host.tick();
        host.tick();
        assert!(approx_eq(host.sprite.pos.x, 484.0));
        assert_eq!(host.director.frame_counter(), 10);

        host.command(Some(1));
        let request = host.tick().unwrap();
        assert_eq!(request.picture, "reid");
        assert!(host.load(&request));
        assert!(approx_eq(host.sprite.pos.x, 464.0));
        assert!(approx_eq(host.sprite.pos.y, 96.0));
        assert_eq!(host.director.motion(), Motion::None);
    }

    #[test]
    fn test_looping_motion_keeps_running() {
        let mut host = Host::new();
        host.party.actor_mut(1).unwrap().hp = 5;
        host.command(Some(1));
        let request = host.tick().unwrap();
        host.load(&request);
        for _ in 0..300 {
            host.tick();
            assert!(host.director.frame_counter() > 0);
        }
    }

    #[test]
    fn test_begin_battle_resets_but_keeps_tickets() {
        let mut host = Host::new();
        host.command(Some(1));
        let old = host.tick().unwrap();
        host.director.notify_damage(Some(2));
        host.director.begin_battle();
        assert_eq!(host.director.active_command_actor(), None);
        assert_eq!(host.director.damaged_actor(), None);
        assert_eq!(host.director.pending_ticket(), None);
        assert!(!host.load(&old));

        let new = host.tick().unwrap();
        assert!(new.ticket > old.ticket);
    }
}
