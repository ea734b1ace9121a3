//! Implementations for the WaypointUpdater state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use serde::Serialize;

// Internal
use super::{Params, WpUpdaterError};
use crate::{
    loc::{Pose, VehicleState},
    route::Route,
    stop_ctrl::{self, MotionState, StopInput, StopSignal},
    traj_gen::{self, FinalWaypoint},
    wp_locator,
};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Waypoint updater module state
#[derive(Default)]
pub struct WaypointUpdater {
    pub(crate) params: Params,

    /// The only state carried between cycles.
    pub(crate) motion_state: MotionState,

    pub(crate) report: StatusReport,
}

/// Input data to the waypoint updater.
///
/// This is the latest value of every input stream, each stream overwriting
/// its own field. Fields stay `None` until their first message arrives.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    pub route: Option<Route>,

    pub pose: Option<Pose>,

    /// Latest forward speed, zero until the first velocity message.
    ///
    /// Units: meters/second
    pub speed_ms: f64,

    pub stop_signal: StopSignal,
}

/// Output of one cycle: the final waypoints, or `None` while idle.
pub type OutputData = Option<Vec<FinalWaypoint>>;

/// Status report for waypoint updater processing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    /// True if the cycle did nothing because no route or pose is known yet.
    pub idle: bool,

    pub closest_index: usize,
    pub tracked_index: usize,
    pub stop_index: Option<usize>,

    pub braking: bool,
    pub decel_mss: Option<f64>,

    pub arc_distance_m: Option<f64>,
    pub min_stop_distance_m: Option<f64>,

    pub num_final_wps: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl InputData {
    /// Snapshot of the vehicle state, if a pose has been received.
    pub fn vehicle_state(&self) -> Option<VehicleState> {
        self.pose.map(|pose| VehicleState {
            pose,
            speed_ms: self.speed_ms,
        })
    }
}

impl WaypointUpdater {
    /// Create a new updater from already loaded parameters.
    pub fn new(params: Params) -> Result<Self, WpUpdaterError> {
        params.validate()?;

        Ok(Self {
            params,
            ..Default::default()
        })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn motion_state(&self) -> MotionState {
        self.motion_state
    }
}

impl State for WaypointUpdater {
    type InitData = &'static str;
    type InitError = WpUpdaterError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = WpUpdaterError;

    /// Initialise the waypoint updater.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        let params: Params = params::load(init_data)
            .map_err(WpUpdaterError::ParamLoadError)?;
        params.validate()?;

        self.params = params;
        self.motion_state = MotionState::Driving;

        Ok(())
    }

    /// Perform one cycle of waypoint updating.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        self.report = StatusReport::default();

        let (route, vehicle) = match (&input_data.route, input_data.vehicle_state()) {
            (Some(r), Some(v)) => (r, v),
            _ => {
                trace!("No route or pose yet, idle");
                self.report.idle = true;
                return Ok((None, self.report));
            }
        };

        // A stop beyond the end of the route is a data error, skip the cycle
        // without touching the motion state.
        if let StopSignal::StopAt(index) = input_data.stop_signal {
            if index >= route.len() {
                return Err(WpUpdaterError::StopIndexOutOfRange {
                    index,
                    route_len: route.len(),
                });
            }
        }

        // Locate the vehicle on the route
        let located = wp_locator::locate(route, &vehicle.pose);
        let tracked_index = route.wrap(located.next_index);

        // Decide whether to brake
        let resolution = stop_ctrl::resolve(
            self.motion_state,
            &StopInput {
                route,
                tracked_index,
                stop_signal: input_data.stop_signal,
                speed_ms: vehicle.speed_ms,
                decel_limit_mss: self.params.decel_limit_mss,
            },
        );
        self.motion_state = resolution.state;

        // Build and bound the window
        let mut final_wps = traj_gen::build_window(
            route,
            tracked_index,
            self.motion_state,
            input_data.stop_signal,
            self.params.lookahead_wps,
        );
        final_wps.truncate(self.params.lookahead_wps);

        self.report.closest_index = located.closest_index;
        self.report.tracked_index = tracked_index;
        self.report.stop_index = input_data.stop_signal.stop_index();
        self.report.braking = self.motion_state.is_braking();
        self.report.decel_mss = self.motion_state.decel_mss();
        self.report.arc_distance_m = resolution.arc_distance_m;
        self.report.min_stop_distance_m = resolution.min_stop_distance_m;
        self.report.num_final_wps = final_wps.len();

        debug!(
            "Tracking waypoint {} (closest {}), {} final waypoints, first speed {:.2} m/s",
            tracked_index,
            located.closest_index,
            final_wps.len(),
            final_wps.first().map(|wp| wp.speed_ms).unwrap_or(0.0)
        );

        Ok((Some(final_wps), self.report))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::route::test::straight_route;

    fn scenario_input() -> InputData {
        InputData {
            route: Some(straight_route(10, 10.0, 10.0)),
            pose: Some(Pose::from_xyz_heading(-1.0, 0.0, 0.0, 0.0)),
            speed_ms: 10.0,
            stop_signal: StopSignal::StopAt(5),
        }
    }

    #[test]
    fn test_idle_without_inputs() {
        let mut wpu = WaypointUpdater::default();

        let (out, rpt) = wpu.proc(&InputData::default()).unwrap();
        assert!(out.is_none());
        assert!(rpt.idle);

        // Route but no pose
        let input = InputData {
            route: Some(straight_route(10, 10.0, 10.0)),
            ..Default::default()
        };
        let (out, rpt) = wpu.proc(&input).unwrap();
        assert!(out.is_none());
        assert!(rpt.idle);

        // Pose but no route
        let input = InputData {
            pose: Some(Pose::default()),
            ..Default::default()
        };
        let (out, _) = wpu.proc(&input).unwrap();
        assert!(out.is_none());
        assert_eq!(wpu.motion_state(), MotionState::Driving);
    }

    #[test]
    fn test_driving_window() {
        let mut wpu = WaypointUpdater::default();

        let input = InputData {
            stop_signal: StopSignal::Clear,
            ..scenario_input()
        };

        let (out, rpt) = wpu.proc(&input).unwrap();
        let wps = out.unwrap();

        // Window wraps around the short route and is bounded by the lookahead
        assert_eq!(wps.len(), 200);
        assert!(wps.iter().all(|wp| wp.speed_ms == 10.0));
        assert_eq!(wps[0].pose.position_m[0], 0.0);
        assert_eq!(wps[10].pose.position_m[0], 0.0);
        assert!(!rpt.idle);
        assert!(!rpt.braking);
        assert_eq!(rpt.num_final_wps, 200);
    }

    #[test]
    fn test_stop_scenario() {
        let mut wpu = WaypointUpdater::default();

        let (out, rpt) = wpu.proc(&scenario_input()).unwrap();
        let wps = out.unwrap();

        assert_eq!(wpu.motion_state(), MotionState::Braking { decel_mss: 1.0 });
        assert_eq!(rpt.tracked_index, 0);
        assert_eq!(rpt.stop_index, Some(5));
        assert_eq!(rpt.arc_distance_m, Some(50.0));
        assert!(rpt.braking);

        assert_eq!(wps.len(), 200);
        assert!((wps[4].speed_ms - 10f64.sqrt()).abs() < 1e-9);
        assert!((wps[0].speed_ms - 90f64.sqrt()).abs() < 1e-9);
        assert!(wps[5..].iter().all(|wp| wp.speed_ms == 0.0));
    }

    #[test]
    fn test_decel_retained_while_braking() {
        let mut wpu = WaypointUpdater::default();
        wpu.proc(&scenario_input()).unwrap();

        // Slower and closer, the deceleration is not recomputed
        let input = InputData {
            pose: Some(Pose::from_xyz_heading(25.0, 0.0, 0.0, 0.0)),
            speed_ms: 3.0,
            ..scenario_input()
        };
        let (_, rpt) = wpu.proc(&input).unwrap();

        assert_eq!(wpu.motion_state(), MotionState::Braking { decel_mss: 1.0 });
        assert_eq!(rpt.decel_mss, Some(1.0));
        assert_eq!(rpt.arc_distance_m, None);
    }

    #[test]
    fn test_clear_resumes_driving() {
        let mut wpu = WaypointUpdater::default();
        wpu.proc(&scenario_input()).unwrap();
        assert!(wpu.motion_state().is_braking());

        let input = InputData {
            stop_signal: StopSignal::Clear,
            ..scenario_input()
        };
        let (out, _) = wpu.proc(&input).unwrap();

        assert_eq!(wpu.motion_state(), MotionState::Driving);
        assert!(out.unwrap().iter().all(|wp| wp.speed_ms == 10.0));
    }

    #[test]
    fn test_stop_out_of_range() {
        let mut wpu = WaypointUpdater::default();
        wpu.proc(&scenario_input()).unwrap();

        let input = InputData {
            stop_signal: StopSignal::StopAt(10),
            ..scenario_input()
        };

        match wpu.proc(&input) {
            Err(WpUpdaterError::StopIndexOutOfRange { index: 10, route_len: 10 }) => (),
            r => panic!("Expected out of range error, got {:?}", r.map(|(_, rpt)| rpt)),
        }

        // The motion state is untouched
        assert_eq!(wpu.motion_state(), MotionState::Braking { decel_mss: 1.0 });
    }

    #[test]
    fn test_custom_lookahead() {
        let mut wpu = WaypointUpdater::new(Params {
            lookahead_wps: 3,
            ..Default::default()
        })
        .unwrap();

        let (out, _) = wpu.proc(&scenario_input()).unwrap();
        let wps = out.unwrap();

        assert_eq!(wps.len(), 3);
        assert!((wps[0].speed_ms - 90f64.sqrt()).abs() < 1e-9);

        assert!(WaypointUpdater::new(Params {
            lookahead_wps: 0,
            ..Default::default()
        })
        .is_err());
    }
}
