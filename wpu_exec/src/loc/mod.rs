//! # Localisation module
//!
//! Holds the vehicle's pose and forward speed as last reported by the
//! external localisation and odometry streams. Nothing here estimates
//! anything; the values are taken as given.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A position and attitude in the world frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// The position in the world frame
    pub position_m: Vector3<f64>,

    /// The attitude in the world frame, as a quaternion rotating the world
    /// frame into the body frame.
    pub attitude_q: UnitQuaternion<f64>,
}

/// Latest known state of the vehicle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub pose: Pose,

    /// Forward speed along the body X axis.
    ///
    /// Units: meters/second
    pub speed_ms: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Pose {
    fn default() -> Self {
        Self {
            position_m: Vector3::zeros(),
            attitude_q: UnitQuaternion::identity(),
        }
    }
}

impl Pose {
    /// Build a pose from a position and a heading about the world Z axis.
    pub fn from_xyz_heading(x: f64, y: f64, z: f64, heading_rad: f64) -> Self {
        Self {
            position_m: Vector3::new(x, y, z),
            attitude_q: UnitQuaternion::from_euler_angles(0.0, 0.0, heading_rad),
        }
    }

    /// Return the heading (yaw, the angle to the positive X axis) in radians,
    /// in the range [-pi, pi].
    pub fn get_heading(&self) -> f64 {
        self.attitude_q.euler_angles().2
    }

    /// Straight-line distance between two poses.
    pub fn distance_to(&self, other: &Pose) -> f64 {
        (other.position_m - self.position_m).norm()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_heading() {
        assert_eq!(Pose::default().get_heading(), 0.0);

        let p = Pose::from_xyz_heading(1.0, 2.0, 0.0, PI / 2.0);
        assert!((p.get_heading() - PI / 2.0).abs() < 1e-12);

        let p = Pose::from_xyz_heading(0.0, 0.0, 0.0, -3.0);
        assert!((p.get_heading() + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance() {
        let a = Pose::from_xyz_heading(0.0, 0.0, 0.0, 0.0);
        let b = Pose::from_xyz_heading(1.0, 2.0, 2.0, 1.0);
        assert_eq!(a.distance_to(&b), 3.0);
    }
}
