//! Scalar easing used by the per-frame HUD update.

/// One frame of flash decay: `flash += -rate * flash`.
///
/// Deliberately independent of frame time; at 60 fps the flash is gone within
/// a quarter of a second.
pub fn decay_flash(flash: f32, rate: f32) -> f32 {
    flash + -rate * flash
}

/// Moves `current` toward `target` by at most `delta`. A negative or NaN
/// `delta` leaves `current` unchanged.
pub fn ease_alpha(current: f32, target: f32, delta: f32) -> f32 {
    let step = delta.max(0.0);
    current + (target - current).clamp(-step, step)
}

pub fn decay_bounce(bounce: f32, rate: f32, delta: f32) -> f32 {
    bounce + rate * (0.0 - bounce) * delta
}

/// Stretch horizontally, squash vertically.
pub fn bounce_scale(bounce: f32) -> (f32, f32) {
    (1.0 + 0.15 * bounce, 1.0 - 0.05 * bounce)
}

pub fn prompt_pulse(time: f32, amplitude: f32, speed: f32) -> f32 {
    1.0 + amplitude * (speed * time).sin()
}
