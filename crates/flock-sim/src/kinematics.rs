//! Vertical motion of an agent under constant acceleration and jump impulses.
//!
//! Displacement is a closed-form function of ticks since the last impulse
//! rather than an integrated velocity, so a trajectory depends only on when
//! the agent jumped.

use flock_core::components::Body;
use flock_core::tuning::Tuning;

/// A resting body at height `y`.
pub fn body_at(y: f64) -> Body {
    Body {
        y,
        velocity: 0.0,
        ticks_since_jump: 0,
        jump_height: y,
        tilt: 0.0,
    }
}

/// Advance one tick. Returns the displacement applied.
pub fn advance(body: &mut Body, tuning: &Tuning) -> f64 {
    body.ticks_since_jump += 1;
    let t = body.ticks_since_jump as f64;

    let mut d = body.velocity * t + 0.5 * tuning.gravity * t * t;
    if d >= tuning.terminal_displacement {
        d = tuning.terminal_displacement;
    }
    if d < 0.0 {
        d -= tuning.apex_offset;
    }
    body.y += d;

    if d < 0.0 || body.y < body.jump_height {
        if body.tilt < tuning.max_tilt {
            body.tilt = tuning.max_tilt;
        }
    } else if body.tilt > tuning.min_tilt {
        body.tilt = (body.tilt - tuning.tilt_step).max(tuning.min_tilt);
    }
    d
}

/// Kick the body upward. Takes effect on the next `advance`.
pub fn apply_impulse(body: &mut Body, tuning: &Tuning) {
    body.velocity = tuning.jump_velocity;
    body.ticks_since_jump = 0;
    body.jump_height = body.y;
}
