//! Portrait motion engine.
//!
//! [`advance`] applies one frame of a [`Motion`] to a position and returns
//! the new frame counter. It knows nothing about pictures or fades, so the
//! director simply calls it once per tick while the counter is positive.
//!
//! Most motions count down from [`Motion::frame_length`] and pick their
//! displacement from the remaining frame count. The shudder motions
//! (`shake`, `shakeloop`, `damage`) count up from 1, and the run motions
//! keep going until the sprite leaves the [`RUN_LIMIT`] band.

use crate::components::motion::Motion;
use crate::components::portrait::Vector2;

/// Horizontal distance at which the run motions stop.
pub const RUN_LIMIT: f32 = 2000.0;

/// Advance `motion` by one frame.
///
/// `counter` must be positive. Looping motions never return 0; the others
/// return 0 exactly once they are finished.
pub fn advance(pos: &mut Vector2, motion: Motion, counter: i32) -> i32 {
    match motion {
        Motion::Yes => {
            pos.y += if counter > 12 { 2.0 } else { -2.0 };
            counter - 1
        }
        Motion::YesYes => {
            pos.y += if counter > 36 {
                2.0
            } else if counter > 24 {
                -2.0
            } else if counter > 12 {
                2.0
            } else {
                -2.0
            };
            counter - 1
        }
        Motion::No => {
            pos.x += if counter > 18 {
                2.0
            } else if counter > 6 {
                -2.0
            } else {
                2.0
            };
            counter - 1
        }
        Motion::NoSlow => {
            pos.x += if counter > 36 {
                1.0
            } else if counter > 12 {
                -1.0
            } else {
                1.0
            };
            counter - 1
        }
        Motion::Jump => {
            pos.y += if counter > 12 { -2.0 } else { 2.0 };
            counter - 1
        }
        Motion::JumpJump => {
            pos.y += if counter > 36 {
                -2.0
            } else if counter > 24 {
                2.0
            } else if counter > 12 {
                -2.0
            } else {
                2.0
            };
            counter - 1
        }
        Motion::JumpLoop => {
            // second half of the cycle is a pause on the ground
            if counter > 36 {
                pos.y -= 2.0;
            } else if counter > 24 {
                pos.y += 2.0;
            }
            restart(motion, counter - 1)
        }
        Motion::Shake => shudder(pos, counter, 2.0, false),
        Motion::ShakeLoop => shudder(pos, counter, 1.0, true),
        Motion::Damage => shudder(pos, counter, 4.0, false),
        Motion::RunLeft => {
            pos.x -= 16.0;
            if pos.x < -RUN_LIMIT { 0 } else { counter }
        }
        Motion::RunRight => {
            pos.x += 16.0;
            if pos.x > RUN_LIMIT { 0 } else { counter }
        }
        Motion::FloatRightFast => {
            pos.x += if counter == 12 { 22.0 } else { -2.0 };
            counter - 1
        }
        Motion::FloatRight => {
            pos.x += if counter == 48 { 47.0 } else { -1.0 };
            counter - 1
        }
        Motion::FloatLeftFast => {
            pos.x += if counter == 12 { -22.0 } else { 2.0 };
            counter - 1
        }
        Motion::FloatLeft => {
            pos.x += if counter == 48 { -47.0 } else { 1.0 };
            counter - 1
        }
        Motion::NoSlowLoop => {
            pos.x += if counter > 72 {
                0.25
            } else if counter > 24 {
                -0.25
            } else {
                0.25
            };
            restart(motion, counter - 1)
        }
        Motion::Breathing => {
            if counter > 72 {
                pos.y += 0.5;
            } else if counter > 48 {
                pos.y -= 0.5;
            }
            restart(motion, counter - 1)
        }
        Motion::None => 0,
    }
}

fn restart(motion: Motion, counter: i32) -> i32 {
    if counter == 0 {
        motion.frame_length()
    } else {
        counter
    }
}

/// Ten-frame count-up shudder: left, up, diagonal down-right, up, left.
///
/// The one-shot variant ends on frame 10 with the sprite back where it
/// started; the looping variant wraps to frame 1.
fn shudder(pos: &mut Vector2, counter: i32, step: f32, looping: bool) -> i32 {
    match counter {
        i32::MIN..=2 => pos.x -= step,
        3..=4 => pos.y -= step,
        5..=6 => {
            pos.x += step * 2.0;
            pos.y += step * 2.0;
        }
        7..=8 => pos.y -= step,
        9 => pos.x -= step,
        10 => {
            pos.x -= step;
            if !looping {
                return 0;
            }
        }
        _ => {}
    }
    if looping && counter >= 10 {
        1
    } else {
        counter + 1
    }
}
