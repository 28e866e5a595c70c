//! Portrait motion definitions.
//!
//! A [`Motion`] is a named procedural animation that nudges the portrait
//! sprite a few pixels per frame. Each motion has a fixed frame length (the
//! value the frame counter is loaded with when a new picture is shown) and
//! may loop forever until the portrait fades out.
//!
//! The per-frame displacement rules live in [`crate::systems::motion`].

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of portrait motions.
///
/// The serialized names match the motion names used in picture rule files
/// (`"floatrightfast"`, `"breathing"`, ...).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motion {
    /// Nod once.
    Yes,
    /// Nod twice.
    YesYes,
    /// Shake the head once.
    No,
    /// Shake the head slowly.
    NoSlow,
    /// Hop once.
    Jump,
    /// Hop twice.
    JumpJump,
    /// Hop forever.
    JumpLoop,
    /// Short shudder.
    Shake,
    /// Shudder forever.
    ShakeLoop,
    /// Run off the left edge.
    RunLeft,
    /// Run off the right edge.
    RunRight,
    /// Hit reaction shudder.
    Damage,
    /// Slide in quickly from the right.
    FloatRightFast,
    /// Slide in slowly from the right.
    FloatRight,
    /// Slide in quickly from the left.
    FloatLeftFast,
    /// Slide in slowly from the left.
    FloatLeft,
    /// Sway sideways forever.
    NoSlowLoop,
    /// Subtle vertical breathing, forever.
    Breathing,
    /// No motion.
    #[default]
    None,
}

impl Motion {
    /// Every motion, in table order.
    pub const ALL: [Motion; 19] = [
        Motion::Yes,
        Motion::YesYes,
        Motion::No,
        Motion::NoSlow,
        Motion::Jump,
        Motion::JumpJump,
        Motion::JumpLoop,
        Motion::Shake,
        Motion::ShakeLoop,
        Motion::RunLeft,
        Motion::RunRight,
        Motion::Damage,
        Motion::FloatRightFast,
        Motion::FloatRight,
        Motion::FloatLeftFast,
        Motion::FloatLeft,
        Motion::NoSlowLoop,
        Motion::Breathing,
        Motion::None,
    ];

    /// Initial frame counter for a fresh show of this motion.
    ///
    /// Count-up motions (`shake`, `shakeloop`, `damage`, `runleft`,
    /// `runright`) start at 1 and step upward instead of counting down.
    pub fn frame_length(self) -> i32 {
        match self {
            Motion::Yes => 24,
            Motion::YesYes => 48,
            Motion::No => 24,
            Motion::NoSlow => 48,
            Motion::Jump => 24,
            Motion::JumpJump => 48,
            Motion::JumpLoop => 48,
            Motion::Shake => 1,
            Motion::ShakeLoop => 1,
            Motion::RunLeft => 1,
            Motion::RunRight => 1,
            Motion::Damage => 1,
            Motion::FloatRightFast => 12,
            Motion::FloatRight => 48,
            Motion::FloatLeftFast => 12,
            Motion::FloatLeft => 48,
            Motion::NoSlowLoop => 96,
            Motion::Breathing => 96,
            Motion::None => 0,
        }
    }

    /// Whether the motion restarts instead of terminating.
    pub fn is_looping(self) -> bool {
        matches!(
            self,
            Motion::JumpLoop | Motion::ShakeLoop | Motion::NoSlowLoop | Motion::Breathing
        )
    }

    /// Rule-file name of the motion.
    pub fn name(self) -> &'static str {
        match self {
            Motion::Yes => "yes",
            Motion::YesYes => "yesyes",
            Motion::No => "no",
            Motion::NoSlow => "noslow",
            Motion::Jump => "jump",
            Motion::JumpJump => "jumpjump",
            Motion::JumpLoop => "jumploop",
            Motion::Shake => "shake",
            Motion::ShakeLoop => "shakeloop",
            Motion::RunLeft => "runleft",
            Motion::RunRight => "runright",
            Motion::Damage => "damage",
            Motion::FloatRightFast => "floatrightfast",
            Motion::FloatRight => "floatright",
            Motion::FloatLeftFast => "floatleftfast",
            Motion::FloatLeft => "floatleft",
            Motion::NoSlowLoop => "noslowloop",
            Motion::Breathing => "breathing",
            Motion::None => "none",
        }
    }

    /// Parse a motion name from configuration.
    ///
    /// Unknown or empty names fall back to [`Motion::None`]: the portrait is
    /// still shown, it just does not move.
    pub fn from_config(name: &str) -> Motion {
        match name.parse() {
            Ok(motion) => motion,
            Err(()) => {
                if !name.trim().is_empty() {
                    warn!("Unknown portrait motion '{}', using 'none'", name);
                }
                Motion::None
            }
        }
    }
}

impl FromStr for Motion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Motion::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or(())
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_length_table() {
        assert_eq!(Motion::Yes.frame_length(), 24);
        assert_eq!(Motion::FloatRightFast.frame_length(), 12);
        assert_eq!(Motion::Breathing.frame_length(), 96);
        assert_eq!(Motion::Damage.frame_length(), 1);
        assert_eq!(Motion::None.frame_length(), 0);
    }

    #[test]
    fn test_looping_set() {
        let looping: Vec<Motion> = Motion::ALL
            .iter()
            .copied()
            .filter(|m| m.is_looping())
            .collect();
        assert_eq!(
            looping,
            vec![
                Motion::JumpLoop,
                Motion::ShakeLoop,
                Motion::NoSlowLoop,
                Motion::Breathing
            ]
        );
    }

    #[test]
    fn test_names_parse_back() {
        for motion in Motion::ALL {
            assert_eq!(motion.name().parse::<Motion>(), Ok(motion));
        }
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert_eq!(Motion::from_config("moonwalk"), Motion::None);
        assert_eq!(Motion::from_config(""), Motion::None);
        assert_eq!(Motion::from_config(" jump "), Motion::Jump);
    }

    #[test]
    fn test_serde_uses_rule_file_names() {
        let json = serde_json::to_string(&Motion::FloatLeftFast).unwrap();
        assert_eq!(json, "\"floatleftfast\"");
        let back: Motion = serde_json::from_str("\"noslowloop\"").unwrap();
        assert_eq!(back, Motion::NoSlowLoop);
    }
}
