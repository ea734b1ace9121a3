//! Utility maths functions
//!
//! The stopping-curve helpers all use the constant-deceleration kinematic
//! relation `v^2 = 2 a d`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Distance needed to stop from `speed` under a constant deceleration.
///
/// Only the magnitude of `decel` is used, so a negative deceleration limit
/// may be passed directly.
pub fn stopping_distance<T>(speed: T, decel: T) -> T
where
    T: Float,
{
    let two = T::one() + T::one();
    (speed.powi(2) / (two * decel)).abs()
}

/// Deceleration magnitude needed to stop from `speed` within `distance`.
pub fn stopping_decel<T>(speed: T, distance: T) -> T
where
    T: Float,
{
    // Same relation as the stopping distance, solved for the other operand
    stopping_distance(speed, distance)
}

/// Speed from which a vehicle decelerating at `decel` stops in exactly
/// `distance`.
///
/// Negative distances are treated as zero.
pub fn stopping_speed<T>(decel: T, distance: T) -> T
where
    T: Float,
{
    let two = T::one() + T::one();
    (two * decel.abs() * distance.max(T::zero())).sqrt()
}

/// Heading (angle to the +ve X axis) of the vector pointing from `from` to
/// `to` in the XY plane.
pub fn bearing<T>(from: (T, T), to: (T, T)) -> T
where
    T: Float,
{
    (to.1 - from.1).atan2(to.0 - from.0)
}
