//! Picture rule configuration.
//!
//! A [`PictureRule`] says "show this picture for this actor", optionally
//! restricted to one active status condition and/or one ON switch. Rules are
//! grouped in three ordered lists, one per [`PictureCategory`], and stored
//! in the [`PictureRules`] resource together with the
//! [`VictoryActorPolicy`].
//!
//! # File Format
//!
//! ```json
//! {
//!   "winActorType": "lastActor",
//!   "command": [
//!     { "actorId": 1, "imageName": "reid", "x": 464, "y": 96,
//!       "motion": "floatrightfast", "pinchPercentage": 25,
//!       "pinchImageName": "reid_pinch", "pinchMotion": "breathing" },
//!     { "actorId": 1, "stateId": 4, "imageName": "reid_poison" }
//!   ],
//!   "damage": [ { "actorId": 1, "imageName": "reid_hurt", "motion": "damage" } ],
//!   "victory": [ { "actorId": 1, "imageName": "reid_win", "origin": "center" } ]
//! }
//! ```
//!
//! Entries may also be JSON-encoded strings (the way plugin parameters are
//! stored). Numeric fields accept numbers or numeric strings; anything else
//! coerces to 0, and an id of 0 means "no restriction". Keys that are absent
//! take the parameter defaults listed on [`PictureRule`].

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::components::motion::Motion;
use crate::error::PortraitError;

pub type ActorId = u32;
pub type StateId = u32;
pub type SwitchId = u32;

const DEFAULT_X: f32 = 464.0;
const DEFAULT_Y: f32 = 96.0;
const DEFAULT_SCALE: f32 = 100.0;
const DEFAULT_PINCH_PERCENTAGE: f32 = 25.0;

/// Anchor used to place the picture at `(x, y)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Origin {
    /// `(x, y)` is the picture's top-left corner.
    #[default]
    TopLeft,
    /// `(x, y)` is the picture's centre.
    Center,
}

/// Which trigger a rule list serves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PictureCategory {
    Command,
    Damage,
    Victory,
}

impl PictureCategory {
    fn default_motion(self) -> Motion {
        match self {
            PictureCategory::Command => Motion::FloatRightFast,
            PictureCategory::Damage => Motion::Damage,
            PictureCategory::Victory => Motion::FloatRight,
        }
    }
}

impl fmt::Display for PictureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PictureCategory::Command => "command",
            PictureCategory::Damage => "damage",
            PictureCategory::Victory => "victory",
        })
    }
}

/// One configured portrait entry.
///
/// Parameter defaults for absent keys: origin top-left, `x = 464`,
/// `y = 96`, scale 100/100, motion by category, pinch threshold 25 % and
/// pinch motion `floatrightfast` for command rules.
#[derive(Clone, Debug, PartialEq)]
pub struct PictureRule {
    /// Actor the rule belongs to. A rule without one never matches.
    pub actor_id: Option<ActorId>,
    /// Status condition that must be among the actor's active states.
    pub state_id: Option<StateId>,
    /// Switch that must be ON.
    pub switch_id: Option<SwitchId>,
    pub image_name: String,
    pub origin: Origin,
    pub x: f32,
    pub y: f32,
    /// Horizontal scale in percent; negative flips.
    pub scale_x: f32,
    /// Vertical scale in percent; negative flips.
    pub scale_y: f32,
    pub motion: Motion,
    /// HP percentage at or below which the pinch picture is used.
    pub pinch_percentage: Option<f32>,
    pub pinch_image_name: Option<String>,
    pub pinch_motion: Option<Motion>,
}

impl PictureRule {
    /// Default picture for `actor_id` with parameter defaults.
    pub fn new(actor_id: ActorId, image_name: impl Into<String>) -> Self {
        Self {
            actor_id: Some(actor_id),
            state_id: None,
            switch_id: None,
            image_name: image_name.into(),
            origin: Origin::TopLeft,
            x: DEFAULT_X,
            y: DEFAULT_Y,
            scale_x: DEFAULT_SCALE,
            scale_y: DEFAULT_SCALE,
            motion: Motion::None,
            pinch_percentage: None,
            pinch_image_name: None,
            pinch_motion: None,
        }
    }
    pub fn with_state(mut self, state_id: StateId) -> Self {
        self.state_id = Some(state_id);
        self
    }
    pub fn with_switch(mut self, switch_id: SwitchId) -> Self {
        self.switch_id = Some(switch_id);
        self
    }
    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }
    pub fn with_position(mut self, origin: Origin, x: f32, y: f32) -> Self {
        self.origin = origin;
        self.x = x;
        self.y = y;
        self
    }
    pub fn with_scale(mut self, scale_x: f32, scale_y: f32) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }
    pub fn with_pinch(
        mut self,
        percentage: f32,
        image_name: Option<&str>,
        motion: Option<Motion>,
    ) -> Self {
        self.pinch_percentage = (percentage > 0.0).then_some(percentage);
        self.pinch_image_name = image_name.map(str::to_string);
        self.pinch_motion = motion;
        self
    }

    /// Build a rule from one JSON entry, coercing malformed values.
    pub fn from_json(category: PictureCategory, entry: &Value) -> Self {
        let field = |key: &str| entry.get(key);
        let number_or = |key: &str, default: f32| field(key).map_or(default, coerce_number);

        let origin = match field("origin") {
            Some(Value::String(s)) if s == "center" => Origin::Center,
            Some(v) if coerce_number(v) == 1.0 => Origin::Center,
            _ => Origin::TopLeft,
        };
        let motion = field("motion").map_or(category.default_motion(), |v| {
            Motion::from_config(&coerce_string(v).unwrap_or_default())
        });

        let (pinch_percentage, pinch_image_name, pinch_motion) = match category {
            PictureCategory::Command => {
                let percentage = number_or("pinchPercentage", DEFAULT_PINCH_PERCENTAGE);
                let motion = match field("pinchMotion") {
                    None => Some(Motion::FloatRightFast),
                    Some(v) => coerce_string(v).map(|s| Motion::from_config(&s)),
                };
                (
                    (percentage > 0.0).then_some(percentage),
                    field("pinchImageName").and_then(coerce_string),
                    motion,
                )
            }
            _ => (None, None, None),
        };

        Self {
            actor_id: field("actorId").and_then(coerce_id),
            state_id: field("stateId").and_then(coerce_id),
            switch_id: field("switchId").and_then(coerce_id),
            image_name: field("imageName").and_then(coerce_string).unwrap_or_default(),
            origin,
            x: number_or("x", DEFAULT_X),
            y: number_or("y", DEFAULT_Y),
            scale_x: number_or("scaleX", DEFAULT_SCALE),
            scale_y: number_or("scaleY", DEFAULT_SCALE),
            motion,
            pinch_percentage,
            pinch_image_name,
            pinch_motion,
        }
    }
}

/// Coerce a JSON value to a number the way plugin parameters are read:
/// numbers pass through, numeric strings parse, booleans become 1/0 and
/// everything else is 0.
pub fn coerce_number(value: &Value) -> f32 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0) as f32,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().map_or(0.0, |n| n as f32)
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Coerce an id field; 0, negatives and garbage mean "no restriction".
fn coerce_id(value: &Value) -> Option<u32> {
    let n = coerce_number(value);
    (n >= 1.0 && n.fract() == 0.0).then_some(n as u32)
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// How the victory portrait picks its actor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VictoryActorPolicy {
    /// The last party member who acted this battle.
    #[default]
    LastActor,
    /// The first living battle member.
    FirstActor,
    /// A uniformly random living battle member.
    RandomActor,
}

impl VictoryActorPolicy {
    /// Lenient parse used for configuration: unknown values fall back to
    /// [`VictoryActorPolicy::FirstActor`].
    pub fn from_config(value: &str) -> Self {
        value.parse().unwrap_or_else(|e: PortraitError| {
            warn!("{}, using firstActor", e);
            VictoryActorPolicy::FirstActor
        })
    }
}

impl FromStr for VictoryActorPolicy {
    type Err = PortraitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "lastActor" => Ok(VictoryActorPolicy::LastActor),
            "firstActor" => Ok(VictoryActorPolicy::FirstActor),
            "randomActor" => Ok(VictoryActorPolicy::RandomActor),
            other => Err(PortraitError::InvalidVictoryPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for VictoryActorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VictoryActorPolicy::LastActor => "lastActor",
            VictoryActorPolicy::FirstActor => "firstActor",
            VictoryActorPolicy::RandomActor => "randomActor",
        })
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct PictureRulesFile {
    #[serde(default)]
    command: Vec<Value>,
    #[serde(default)]
    damage: Vec<Value>,
    #[serde(default)]
    victory: Vec<Value>,
    #[serde(default)]
    win_actor_type: Option<String>,
}

/// The three ordered rule lists and the victory actor policy.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Resource, Clone, Debug, Default)]
pub struct PictureRules {
    pub command: Vec<PictureRule>,
    pub damage: Vec<PictureRule>,
    pub victory: Vec<PictureRule>,
    pub victory_actor: VictoryActorPolicy,
}

impl PictureRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered rules of one category.
    pub fn list(&self, category: PictureCategory) -> &[PictureRule] {
        match category {
            PictureCategory::Command => &self.command,
            PictureCategory::Damage => &self.damage,
            PictureCategory::Victory => &self.victory,
        }
    }

    /// Parse a rule file from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, PortraitError> {
        let file: PictureRulesFile = serde_json::from_str(json)?;
        let parse_list = |category: PictureCategory, entries: &[Value]| {
            entries
                .iter()
                .filter_map(|entry| match entry {
                    // plugin parameters store each struct as a JSON string
                    Value::String(s) => match serde_json::from_str::<Value>(s) {
                        Ok(inner) => Some(inner),
                        Err(e) => {
                            warn!("Skipping malformed {} picture entry: {}", category, e);
                            None
                        }
                    },
                    Value::Null => None,
                    other => Some(other.clone()),
                })
                .map(|entry| PictureRule::from_json(category, &entry))
                .collect::<Vec<_>>()
        };
        let rules = Self {
            command: parse_list(PictureCategory::Command, &file.command),
            damage: parse_list(PictureCategory::Damage, &file.damage),
            victory: parse_list(PictureCategory::Victory, &file.victory),
            victory_actor: file
                .win_actor_type
                .as_deref()
                .map_or(VictoryActorPolicy::LastActor, VictoryActorPolicy::from_config),
        };
        for (category, list) in [
            (PictureCategory::Command, &rules.command),
            (PictureCategory::Damage, &rules.damage),
            (PictureCategory::Victory, &rules.victory),
        ] {
            for rule in list.iter().filter(|r| r.actor_id.is_none()) {
                warn!(
                    "{} picture '{}' has no actor and will never be shown",
                    category, rule.image_name
                );
            }
        }
        Ok(rules)
    }

    /// Load a rule file from disk.
    pub fn load_from_file(path: &str) -> Result<Self, PortraitError> {
        let content = std::fs::read_to_string(path).map_err(|source| PortraitError::Io {
            path: path.to_string(),
            source,
        })?;
        let rules = Self::from_json_str(&content)?;
        info!(
            "Loaded picture rules from {}: {} command, {} damage, {} victory, victory actor = {}",
            path,
            rules.command.len(),
            rules.damage.len(),
            rules.victory.len(),
            rules.victory_actor
        );
        Ok(rules)
    }
}
