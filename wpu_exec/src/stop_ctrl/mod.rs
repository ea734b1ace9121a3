//! # Stop control module
//!
//! Decides each cycle whether the vehicle should be braking for a pending
//! stop request. This is a two state machine:
//!
//! | From    | Condition                           | To                           |
//! |---------|-------------------------------------|------------------------------|
//! | Driving | no stop requested                   | Driving                      |
//! | Driving | stop at `idx`, arc distance D > M   | Braking, decel = v^2 / (2 D) |
//! | Driving | stop at `idx`, arc distance D <= M  | Driving                      |
//! | Braking | no stop requested                   | Driving                      |
//! | Braking | stop at `idx`                       | Braking, decel retained      |
//!
//! where M = v^2 / (2 |decel_limit|) is the minimum stopping distance at the
//! configured limit and D is the distance along the route from the tracked
//! waypoint to the stop waypoint.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod state;

pub use state::*;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A request to stop at a route waypoint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopSignal {
    /// No stop is required.
    Clear,

    /// The vehicle must come to rest at the given route index.
    StopAt(usize),
}

/// Persistent motion state of the vehicle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub enum MotionState {
    Driving,

    /// Braking towards the requested stop point.
    Braking {
        /// Deceleration magnitude fixed on entry to this state.
        ///
        /// Units: meters/second^2
        decel_mss: f64,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for StopSignal {
    fn default() -> Self {
        StopSignal::Clear
    }
}

impl StopSignal {
    /// Sentinel used on the wire to mean no stop is requested.
    pub const WIRE_CLEAR: i64 = -1;

    /// Convert from the wire representation, where any negative value means
    /// no stop is requested.
    pub fn from_wire(value: i64) -> Self {
        if value < 0 {
            StopSignal::Clear
        } else {
            StopSignal::StopAt(value as usize)
        }
    }

    pub fn to_wire(&self) -> i64 {
        match self {
            StopSignal::Clear => Self::WIRE_CLEAR,
            StopSignal::StopAt(i) => *i as i64,
        }
    }

    pub fn stop_index(&self) -> Option<usize> {
        match self {
            StopSignal::Clear => None,
            StopSignal::StopAt(i) => Some(*i),
        }
    }
}

impl Default for MotionState {
    fn default() -> Self {
        MotionState::Driving
    }
}

impl MotionState {
    pub fn is_braking(&self) -> bool {
        matches!(self, MotionState::Braking { .. })
    }

    /// Braking deceleration, only available while braking.
    pub fn decel_mss(&self) -> Option<f64> {
        match self {
            MotionState::Driving => None,
            MotionState::Braking { decel_mss } => Some(*decel_mss),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stop_signal_wire() {
        assert_eq!(StopSignal::from_wire(-1), StopSignal::Clear);
        assert_eq!(StopSignal::from_wire(-7), StopSignal::Clear);
        assert_eq!(StopSignal::from_wire(0), StopSignal::StopAt(0));
        assert_eq!(StopSignal::from_wire(292), StopSignal::StopAt(292));

        assert_eq!(StopSignal::Clear.to_wire(), -1);
        assert_eq!(StopSignal::StopAt(5).to_wire(), 5);
    }

    #[test]
    fn test_motion_state() {
        assert_eq!(MotionState::default(), MotionState::Driving);
        assert_eq!(MotionState::Driving.decel_mss(), None);

        let braking = MotionState::Braking { decel_mss: 1.5 };
        assert!(braking.is_braking());
        assert_eq!(braking.decel_mss(), Some(1.5));
    }
}
