//! # Trajectory generation module
//!
//! Builds the window of waypoints published each cycle. While driving the
//! window is a straight copy of the route ahead of the vehicle with its
//! nominal speeds. While braking the waypoints up to the stop point follow a
//! constant deceleration curve that reaches zero a short buffer before the
//! stop, and every waypoint from the stop point onwards has zero speed.
//!
//! The braking curve is computed from the straight-line distance of each
//! waypoint to the stop waypoint. Stop feasibility (see `stop_ctrl`) is
//! judged on the arc distance instead; the two are deliberately kept apart.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod window;

pub use window::*;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::{loc::Pose, route::Waypoint};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default number of waypoints in a published window.
pub const DEFAULT_LOOKAHEAD_WPS: usize = 200;

/// Distance before the stop waypoint at which the braking curve reaches
/// zero.
///
/// Units: meters
pub const STOP_BUFFER_M: f64 = 5.0;

/// Braking curve speeds below this are snapped to zero.
///
/// Units: meters/second
pub const MIN_BRAKING_SPEED_MS: f64 = 1.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A waypoint in the published window.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalWaypoint {
    pub pose: Pose,

    /// Target speed for the downstream controller.
    ///
    /// Units: meters/second
    pub speed_ms: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl From<&Waypoint> for FinalWaypoint {
    fn from(wp: &Waypoint) -> Self {
        Self {
            pose: wp.pose,
            speed_ms: wp.speed_ms,
        }
    }
}

impl FinalWaypoint {
    /// Copy of a route waypoint with its speed replaced.
    pub fn with_speed(wp: &Waypoint, speed_ms: f64) -> Self {
        Self {
            pose: wp.pose,
            speed_ms,
        }
    }
}
