//! # Next waypoint locator
//!
//! Finds the route waypoint the vehicle should be tracking. The closest
//! waypoint is found with a full linear scan of the route, and if that
//! waypoint lies behind the vehicle the one after it is used instead.
//!
//! The scan is O(route length) per cycle, which is fine for a fixed closed
//! track. The benchmark in `benches/bench_wp_locator.rs` measures it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector3;
use serde::Serialize;
use std::f64::consts::FRAC_PI_4;

use crate::{loc::Pose, route::Route};
use util::maths::bearing;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// If the bearing to the closest waypoint differs from the vehicle heading by
/// more than this the waypoint is considered to be behind the vehicle.
pub const BEHIND_THRESHOLD_RAD: f64 = FRAC_PI_4;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Result of locating the vehicle on the route.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct Located {
    /// Index of the waypoint closest to the vehicle.
    pub closest_index: usize,

    /// Index of the waypoint to track. This is either `closest_index` or
    /// `closest_index + 1`, and is NOT wrapped onto the route.
    pub next_index: usize,

    /// Absolute difference between the vehicle heading and the bearing to
    /// the closest waypoint.
    pub heading_diff_rad: f64,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Index of the waypoint closest to the given position.
///
/// Ties are resolved in favour of the lowest index.
pub fn closest_waypoint(route: &Route, position_m: &Vector3<f64>) -> usize {
    let mut min_dist_m = std::f64::INFINITY;
    let mut closest = 0;

    for (i, wp) in route.waypoints().iter().enumerate() {
        let dist_m = (wp.pose.position_m - position_m).norm();
        if dist_m < min_dist_m {
            min_dist_m = dist_m;
            closest = i;
        }
    }

    closest
}

/// Locate the vehicle on the route.
pub fn locate(route: &Route, pose: &Pose) -> Located {
    let closest_index = closest_waypoint(route, &pose.position_m);
    let closest_pos = route.get(closest_index).pose.position_m;

    let bearing_rad = bearing(
        (pose.position_m[0], pose.position_m[1]),
        (closest_pos[0], closest_pos[1]),
    );

    // Plain difference, no wrapping into [-pi, pi]
    let heading_diff_rad = (pose.get_heading() - bearing_rad).abs();

    let next_index = if heading_diff_rad > BEHIND_THRESHOLD_RAD {
        closest_index + 1
    } else {
        closest_index
    };

    Located {
        closest_index,
        next_index,
        heading_diff_rad,
    }
}

/// Index of the waypoint the vehicle should track next.
///
/// The returned index is not wrapped, callers must use `Route::wrap` before
/// indexing.
pub fn next_waypoint(route: &Route, pose: &Pose) -> usize {
    locate(route, pose).next_index
}
