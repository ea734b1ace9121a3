//! # Route module
//!
//! The route is the closed loop of base waypoints the vehicle drives around.
//! It is received once (or rarely) and never modified afterwards. Because the
//! loop is closed every index is interpreted modulo the route length, and a
//! route with no waypoints cannot be constructed.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod csv_file;

pub use csv_file::*;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single point on the route.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub pose: Pose,

    /// Nominal target speed at this waypoint.
    ///
    /// Units: meters/second
    pub speed_ms: f64,
}

/// The full, ordered, cyclic sequence of base waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Waypoint>", into = "Vec<Waypoint>")]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Attempted to create a route from an empty sequence of waypoints")]
    Empty,

    #[error("Waypoint {0} has an invalid nominal speed ({1} m/s)")]
    InvalidSpeed(usize, f64),

    #[error("Could not read the route file: {0}")]
    CsvError(csv::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Waypoint {
    pub fn new(pose: Pose, speed_ms: f64) -> Self {
        Self { pose, speed_ms }
    }
}

impl Route {
    /// Create a new route from a sequence of waypoints.
    ///
    /// The sequence must not be empty and every nominal speed must be finite
    /// and non-negative.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, RouteError> {
        if waypoints.is_empty() {
            return Err(RouteError::Empty);
        }

        for (i, wp) in waypoints.iter().enumerate() {
            if !wp.speed_ms.is_finite() || wp.speed_ms < 0.0 {
                return Err(RouteError::InvalidSpeed(i, wp.speed_ms));
            }
        }

        Ok(Self { waypoints })
    }

    /// Number of waypoints in the route, always greater than zero.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Wrap an index onto the route.
    pub fn wrap(&self, index: usize) -> usize {
        index % self.waypoints.len()
    }

    /// Get the waypoint at the given index, wrapping around the route.
    pub fn get(&self, index: usize) -> &Waypoint {
        &self.waypoints[self.wrap(index)]
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Cumulative distance along the route between two waypoints.
    ///
    /// This is the sum of the straight-line distances between each pair of
    /// consecutive waypoints walking forward from `from` to `to`. The walk
    /// does not wrap around the end of the route, so if `to` is at or before
    /// `from` the distance is zero. Both indices are wrapped onto the route
    /// first.
    pub fn arc_distance(&self, from: usize, to: usize) -> f64 {
        let from = self.wrap(from);
        let to = self.wrap(to);

        if to <= from {
            return 0.0;
        }

        self.waypoints[from..=to]
            .windows(2)
            .map(|pair| pair[0].pose.distance_to(&pair[1].pose))
            .sum()
    }
}

impl TryFrom<Vec<Waypoint>> for Route {
    type Error = RouteError;

    fn try_from(waypoints: Vec<Waypoint>) -> Result<Self, Self::Error> {
        Route::new(waypoints)
    }
}

impl From<Route> for Vec<Waypoint> {
    fn from(route: Route) -> Self {
        route.waypoints
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Build a straight route along the X axis with the given spacing, with
    /// every waypoint facing +X.
    pub(crate) fn straight_route(num_points: usize, spacing_m: f64, speed_ms: f64) -> Route {
        Route::new(
            (0..num_points)
                .map(|i| {
                    Waypoint::new(
                        Pose::from_xyz_heading(i as f64 * spacing_m, 0.0, 0.0, 0.0),
                        speed_ms,
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_route() {
        match Route::new(vec![]) {
            Err(RouteError::Empty) => (),
            r => panic!("Expected empty route error, got {:?}", r),
        }
    }

    #[test]
    fn test_invalid_speed() {
        let wps = vec![
            Waypoint::new(Pose::default(), 1.0),
            Waypoint::new(Pose::default(), -1.0),
        ];
        match Route::new(wps) {
            Err(RouteError::InvalidSpeed(1, s)) => assert_eq!(s, -1.0),
            r => panic!("Expected invalid speed error, got {:?}", r),
        }
    }

    #[test]
    fn test_wrap() {
        let route = straight_route(10, 10.0, 10.0);

        assert_eq!(route.len(), 10);
        assert_eq!(route.wrap(3), 3);
        assert_eq!(route.wrap(10), 0);
        assert_eq!(route.wrap(23), 3);
        assert_eq!(route.get(12).pose.position_m[0], 20.0);
    }

    #[test]
    fn test_arc_distance() {
        let route = straight_route(10, 10.0, 10.0);

        assert_eq!(route.arc_distance(0, 5), 50.0);
        assert_eq!(route.arc_distance(2, 3), 10.0);
        assert_eq!(route.arc_distance(4, 4), 0.0);

        // No wrap around the end of the loop
        assert_eq!(route.arc_distance(7, 2), 0.0);

        // Arc rather than straight line distance
        let wps = vec![
            Waypoint::new(Pose::from_xyz_heading(0.0, 0.0, 0.0, 0.0), 1.0),
            Waypoint::new(Pose::from_xyz_heading(3.0, 4.0, 0.0, 0.0), 1.0),
            Waypoint::new(Pose::from_xyz_heading(6.0, 0.0, 0.0, 0.0), 1.0),
        ];
        let route = Route::new(wps).unwrap();
        assert_eq!(route.arc_distance(0, 2), 10.0);
    }

    #[test]
    fn test_deserialise_validates() {
        let route = straight_route(2, 1.0, 1.0);
        let json = serde_json::to_string(&route).unwrap();
        let back: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(back, route);

        assert!(serde_json::from_str::<Route>("[]").is_err());
    }
}
