//! Deceleration physics
//!
//! Velocities are integer device units per tick. Each tick of auto-scroll
//! clamps both components to `[-max, max]` and then steps them toward zero
//! by a fixed amount, never crossing it.

use flick_core::Point;

use crate::config::FlickConfig;

/// Step one velocity component toward zero
fn decay_component(v: i32, step: i32, max: i32) -> i32 {
    let max = max.max(0);
    let v = v.clamp(-max, max);
    if v > 0 {
        v.saturating_sub(step).max(0)
    } else if v < 0 {
        v.saturating_add(step).min(0)
    } else {
        0
    }
}

/// Clamp `speed` to `max` per axis, then move each axis `step` closer to zero
pub fn deaccelerate(speed: Point, step: i32, max: i32) -> Point {
    Point::new(
        decay_component(speed.x, step, max),
        decay_component(speed.y, step, max),
    )
}

/// [`deaccelerate`] with the knobs from `config`
pub fn deaccelerate_with(speed: Point, config: &FlickConfig) -> Point {
    deaccelerate(speed, config.deceleration, config.max_speed)
}

/// Number of ticks until `speed` decays to (0, 0)
pub fn ticks_to_rest(speed: Point, step: i32, max: i32) -> u32 {
    if step <= 0 {
        return if speed.is_zero() { 0 } else { u32::MAX };
    }
    let clamped = i64::from(speed.max_abs().min(max.max(0)));
    let step = i64::from(step);
    ((clamped + step - 1) / step) as u32
}

/// Velocity after every tick until rest, starting with the first decayed value
pub fn decay_curve(speed: Point, config: &FlickConfig) -> Vec<Point> {
    if config.deceleration <= 0 {
        return Vec::new();
    }
    let mut curve = Vec::with_capacity(
        ticks_to_rest(speed, config.deceleration, config.max_speed).min(4096) as usize,
    );
    let mut v = speed;
    while !v.is_zero() {
        v = deaccelerate_with(v, config);
        curve.push(v);
    }
    curve
}
