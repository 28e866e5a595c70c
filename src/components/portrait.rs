//! Battle portrait sprite component.
//!
//! [`PortraitSprite`] holds everything a renderer needs to draw the battle
//! portrait: which picture is bound, where it sits, how it is scaled and how
//! opaque it is. The component is spawned once per battle scene by
//! [`create_battle_portrait`](crate::systems::portrait::create_battle_portrait)
//! and mutated only by the
//! [`PortraitDirector`](crate::resources::director::PortraitDirector).

use bevy_ecs::prelude::Component;

/// Plain 2D vector in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    pub const ONE: Vector2 = Vector2 { x: 1.0, y: 1.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Battle scene layer entity the portrait sprite is parented to.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PortraitLayer;

/// Maximum portrait opacity.
pub const OPACITY_MAX: u8 = 255;

/// The single battle portrait sprite.
///
/// `opacity` is the director's bookkeeping value. What should actually be
/// drawn is [`PortraitSprite::display_opacity`], which is forced to zero
/// while the overlay is switched off.
#[derive(Component, Clone, Debug)]
pub struct PortraitSprite {
    /// Picture currently bound to the sprite, once its load completed.
    pub picture: Option<String>,
    /// Top-left draw position in screen pixels (motions move this).
    pub pos: Vector2,
    /// Position computed at load time, before any motion offset.
    pub origin: Vector2,
    /// Draw scale; negative components flip the picture.
    pub scale: Vector2,
    /// Pixel size of the bound picture.
    pub size: Vector2,
    /// Fade bookkeeping opacity.
    pub opacity: u8,
    /// Fade-in in progress.
    pub opening: bool,
    /// Fade-out in progress.
    pub closing: bool,
    /// Picture loaded and positioned; fades and motions only run when set.
    pub showing: bool,
    /// Overlay disabled; draw nothing but keep the bookkeeping.
    pub suppressed: bool,
}

impl Default for PortraitSprite {
    fn default() -> Self {
        Self {
            picture: None,
            pos: Vector2::ZERO,
            origin: Vector2::ZERO,
            scale: Vector2::ONE,
            size: Vector2::ZERO,
            opacity: OPACITY_MAX,
            opening: false,
            closing: false,
            showing: false,
            suppressed: false,
        }
    }
}

impl PortraitSprite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opacity the renderer should use this frame.
    pub fn display_opacity(&self) -> u8 {
        if self.suppressed { 0 } else { self.opacity }
    }

    /// Whether anything would be drawn this frame.
    pub fn is_visible(&self) -> bool {
        self.showing && self.display_opacity() > 0
    }

    /// Horizontal flip implied by a negative X scale.
    pub fn flip_h(&self) -> bool {
        self.scale.x < 0.0
    }

    /// Vertical flip implied by a negative Y scale.
    pub fn flip_v(&self) -> bool {
        self.scale.y < 0.0
    }
}
