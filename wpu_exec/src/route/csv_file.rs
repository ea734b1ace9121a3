//! Loading routes from CSV files
//!
//! Each row of a route file describes one waypoint as `x, y, z, yaw, speed`,
//! with yaw in radians and speed in meters/second. The file has no header.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use super::{Route, RouteError, Waypoint};
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RouteRecord {
    x: f64,
    y: f64,
    z: f64,
    yaw: f64,
    speed: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Route {
    /// Load a route from a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, RouteError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path.as_ref())
            .map_err(RouteError::CsvError)?;

        let route = Self::from_csv_reader(reader)?;

        info!(
            "Loaded route of {} waypoints from {:?}",
            route.len(),
            path.as_ref()
        );

        Ok(route)
    }

    /// Load a route from any CSV source.
    pub fn from_csv<R: Read>(source: R) -> Result<Self, RouteError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(source);

        Self::from_csv_reader(reader)
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, RouteError> {
        let mut waypoints = Vec::new();

        for record in reader.deserialize() {
            let r: RouteRecord = record.map_err(RouteError::CsvError)?;

            waypoints.push(Waypoint::new(
                Pose::from_xyz_heading(r.x, r.y, r.z, r.yaw),
                r.speed,
            ));
        }

        Route::new(waypoints)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_csv() {
        let data = "0.0, 0.0, 0.0, 0.0, 11.1\n\
                    10.0, 0.0, 0.0, 0.0, 11.1\n\
                    20.0, 5.0, 0.5, 0.2, 4.0\n";

        let route = Route::from_csv(data.as_bytes()).unwrap();

        assert_eq!(route.len(), 3);
        assert_eq!(route.get(2).pose.position_m[1], 5.0);
        assert_eq!(route.get(2).speed_ms, 4.0);
        assert!((route.get(2).pose.get_heading() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_from_csv_errors() {
        match Route::from_csv("".as_bytes()) {
            Err(RouteError::Empty) => (),
            r => panic!("Expected empty route error, got {:?}", r),
        }

        match Route::from_csv("1.0, 2.0, x, 0.0, 1.0\n".as_bytes()) {
            Err(RouteError::CsvError(_)) => (),
            r => panic!("Expected CSV error, got {:?}", r),
        }
    }
}
