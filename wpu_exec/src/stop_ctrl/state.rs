//! Stop resolution

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, info};
use serde::Serialize;

use super::{MotionState, StopSignal};
use crate::route::Route;
use util::maths::{stopping_decel, stopping_distance};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Inputs to one cycle of stop resolution.
#[derive(Debug, Copy, Clone)]
pub struct StopInput<'a> {
    pub route: &'a Route,

    /// Tracked waypoint index, already wrapped onto the route.
    pub tracked_index: usize,

    pub stop_signal: StopSignal,

    /// Current forward speed.
    ///
    /// Units: meters/second
    pub speed_ms: f64,

    /// Configured deceleration limit. Only the magnitude is used.
    ///
    /// Units: meters/second^2
    pub decel_limit_mss: f64,
}

/// Output of one cycle of stop resolution.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct StopResolution {
    pub state: MotionState,

    /// Arc distance to the stop waypoint, if the feasibility check was run
    /// this cycle.
    pub arc_distance_m: Option<f64>,

    /// Minimum stopping distance at the deceleration limit, if the
    /// feasibility check was run this cycle.
    pub min_stop_distance_m: Option<f64>,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Resolve the next motion state from the current one.
pub fn resolve(current: MotionState, input: &StopInput) -> StopResolution {
    let mut resolution = StopResolution {
        state: current,
        arc_distance_m: None,
        min_stop_distance_m: None,
    };

    resolution.state = match (current, input.stop_signal) {
        (MotionState::Driving, StopSignal::Clear) => MotionState::Driving,

        (MotionState::Driving, StopSignal::StopAt(stop_index)) => {
            let arc_distance_m = input.route.arc_distance(input.tracked_index, stop_index);
            let min_stop_distance_m = stopping_distance(input.speed_ms, input.decel_limit_mss);

            resolution.arc_distance_m = Some(arc_distance_m);
            resolution.min_stop_distance_m = Some(min_stop_distance_m);

            if arc_distance_m > min_stop_distance_m {
                let decel_mss = stopping_decel(input.speed_ms, arc_distance_m);

                info!(
                    "Braking for stop at waypoint {} ({:.2} m away, min {:.2} m), decel {:.3} m/s^2",
                    stop_index, arc_distance_m, min_stop_distance_m, decel_mss
                );

                MotionState::Braking { decel_mss }
            } else {
                debug!(
                    "Stop at waypoint {} is {:.2} m away, inside the minimum stopping \
                     distance of {:.2} m, continuing",
                    stop_index, arc_distance_m, min_stop_distance_m
                );

                MotionState::Driving
            }
        }

        (MotionState::Braking { .. }, StopSignal::Clear) => {
            info!("Stop request cleared, resuming driving");
            MotionState::Driving
        }

        (braking @ MotionState::Braking { .. }, StopSignal::StopAt(_)) => braking,
    };

    resolution
}
