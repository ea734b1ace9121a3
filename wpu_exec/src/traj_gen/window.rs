//! Window construction

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{FinalWaypoint, MIN_BRAKING_SPEED_MS, STOP_BUFFER_M};
use crate::{
    route::Route,
    stop_ctrl::{MotionState, StopSignal},
};
use util::maths::stopping_speed;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the window for the given motion state.
///
/// Braking only applies when a stop index is present, otherwise the nominal
/// speeds are used. The window may be longer than `lookahead_wps` while
/// braking, the caller is responsible for truncating it.
pub fn build_window(
    route: &Route,
    start_index: usize,
    state: MotionState,
    stop_signal: StopSignal,
    lookahead_wps: usize,
) -> Vec<FinalWaypoint> {
    match (state, stop_signal) {
        (MotionState::Braking { decel_mss }, StopSignal::StopAt(stop_index)) => {
            build_braking_window(route, start_index, stop_index, decel_mss, lookahead_wps)
        }
        _ => build_driving_window(route, start_index, lookahead_wps),
    }
}

/// Window of `lookahead_wps` route waypoints from `start_index` with their
/// nominal speeds, wrapping around the route.
pub fn build_driving_window(
    route: &Route,
    start_index: usize,
    lookahead_wps: usize,
) -> Vec<FinalWaypoint> {
    (start_index..start_index + lookahead_wps)
        .map(|i| FinalWaypoint::from(route.get(i)))
        .collect()
}

/// Window decelerating to a stop at `stop_index`.
///
/// The window is made of:
///  1. The cruise segment, `[start_index, stop_index)`, following the braking
///     curve but never above the nominal speeds. This segment is empty if the
///     stop is at or behind the start.
///  2. The stop segment, `[stop_index, max(start_index + lookahead_wps,
///     stop_index + 1))`, all at zero speed. This always holds at least the
///     stop waypoint itself.
pub fn build_braking_window(
    route: &Route,
    start_index: usize,
    stop_index: usize,
    decel_mss: f64,
    lookahead_wps: usize,
) -> Vec<FinalWaypoint> {
    let mut window: Vec<FinalWaypoint> = (start_index..stop_index)
        .map(|i| FinalWaypoint::from(route.get(i)))
        .collect();

    // Index of the stop waypoint in the window
    let target_wp = window.len();

    let end_index = (start_index + lookahead_wps).max(stop_index + 1);
    window.extend(
        (stop_index..end_index).map(|i| FinalWaypoint::with_speed(route.get(i), 0.0)),
    );

    window[target_wp].speed_ms = 0.0;
    let stop_pose = window[target_wp].pose;

    // Walk back from the stop applying the braking curve
    for wp in window[..target_wp].iter_mut().rev() {
        let dist_m = wp.pose.distance_to(&stop_pose);

        let mut speed_ms = stopping_speed(decel_mss, dist_m - STOP_BUFFER_M);
        if speed_ms < MIN_BRAKING_SPEED_MS {
            speed_ms = 0.0;
        }

        wp.speed_ms = wp.speed_ms.min(speed_ms);
    }

    window
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loc::Pose;
    use crate::route::{test::straight_route, Waypoint};

    /// 10 waypoints spaced 10 m apart, all at 10 m/s.
    fn scenario_route() -> Route {
        straight_route(10, 10.0, 10.0)
    }

    #[test]
    fn test_driving_window() {
        let wps = (0..7)
            .map(|i| Waypoint::new(Pose::from_xyz_heading(i as f64, 0.0, 0.0, 0.0), i as f64))
            .collect();
        let route = Route::new(wps).unwrap();

        let window = build_driving_window(&route, 5, 200);

        assert_eq!(window.len(), 200);
        for (k, wp) in window.iter().enumerate() {
            let j = (5 + k) % 7;
            assert_eq!(wp.speed_ms, j as f64);
            assert_eq!(wp.pose, route.get(j).pose);
        }
    }

    #[test]
    fn test_build_window_dispatch() {
        let route = scenario_route();

        // Braking without a stop index falls back to the nominal speeds
        let window = build_window(
            &route,
            0,
            MotionState::Braking { decel_mss: 1.0 },
            StopSignal::Clear,
            20,
        );
        assert!(window.iter().all(|wp| wp.speed_ms == 10.0));

        let window = build_window(&route, 0, MotionState::Driving, StopSignal::StopAt(5), 20);
        assert!(window.iter().all(|wp| wp.speed_ms == 10.0));
    }

    #[test]
    fn test_braking_scenario() {
        let route = scenario_route();

        let window = build_braking_window(&route, 0, 5, 1.0, 200);

        // Cruise segment of 5 then the stop segment runs to the lookahead
        assert_eq!(window.len(), 200);
        assert_eq!(window[5].speed_ms, 0.0);
        assert_eq!(window[5].pose, route.get(5).pose);
        assert!(window[5..].iter().all(|wp| wp.speed_ms == 0.0));

        // Waypoint 4 is 10 m from the stop
        assert!((window[4].speed_ms - 10f64.sqrt()).abs() < 1e-9);

        // Waypoint 0 is 50 m from the stop
        assert!((window[0].speed_ms - 90f64.sqrt()).abs() < 1e-9);
        assert!(window[0].speed_ms < 10.0);

        // Strictly decreasing towards the stop
        for k in 1..5 {
            assert!(window[k].speed_ms < window[k - 1].speed_ms);
        }
    }

    #[test]
    fn test_braking_never_above_nominal() {
        let route = straight_route(40, 10.0, 3.0);

        let window = build_braking_window(&route, 2, 30, 2.0, 200);

        for (k, wp) in window.iter().enumerate() {
            let nominal = route.get(2 + k).speed_ms;
            assert!(wp.speed_ms >= 0.0);
            assert!(wp.speed_ms <= nominal);
        }

        // Far from the stop the nominal speed wins
        assert_eq!(window[0].speed_ms, 3.0);
    }

    #[test]
    fn test_braking_snap_to_zero() {
        // Close spacing so several waypoints sit inside the buffer
        let route = straight_route(30, 1.0, 10.0);

        let window = build_braking_window(&route, 0, 20, 1.0, 50);
        let stop_k = 20;

        // Inside the 5 m buffer
        for k in (stop_k - 5)..stop_k {
            assert_eq!(window[k].speed_ms, 0.0);
        }

        // 6 m away leaves 1 m past the buffer, giving sqrt(2.0)
        assert!(window[stop_k - 6].speed_ms >= MIN_BRAKING_SPEED_MS);
        assert!((window[stop_k - 6].speed_ms - 2f64.sqrt()).abs() < 1e-9);

        // Non-zero speeds strictly decrease going towards the stop
        for k in 1..stop_k {
            let (prev, cur) = (window[k - 1].speed_ms, window[k].speed_ms);
            assert!(cur == 0.0 || cur < prev);
        }
    }

    #[test]
    fn test_stop_beyond_lookahead() {
        let route = straight_route(400, 1.0, 10.0);

        let window = build_braking_window(&route, 0, 300, 0.1, 200);

        // The cruise segment alone is longer than the lookahead, the stop
        // point itself is the last entry
        assert_eq!(window.len(), 301);
        assert_eq!(window[300].speed_ms, 0.0);
        assert_eq!(window[300].pose, route.get(300).pose);
    }

    #[test]
    fn test_stop_behind_start() {
        let route = scenario_route();

        let window = build_braking_window(&route, 7, 3, 1.0, 20);

        // No cruise segment, the window starts at the stop point
        assert_eq!(window.len(), 24);
        assert_eq!(window[0].pose, route.get(3).pose);
        assert!(window.iter().all(|wp| wp.speed_ms == 0.0));
    }

    #[test]
    fn test_stop_at_start() {
        let route = scenario_route();

        let window = build_braking_window(&route, 5, 5, 1.0, 1);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].speed_ms, 0.0);
    }
}
