//! # Data Store

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{error, info, trace};

use crate::{inputs::InputEvent, route::Route, stop_ctrl::StopSignal, wp_updater};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    // WpUpdater
    pub wp_updater: wp_updater::WaypointUpdater,
    pub wp_updater_input: wp_updater::InputData,
    pub wp_updater_status_rpt: wp_updater::StatusReport,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Number of lanes successfully published
    pub num_published: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Clear items that need wiping at the start of the cycle.
    pub fn cycle_start(&mut self) {
        self.wp_updater_status_rpt = wp_updater::StatusReport::default();
    }

    /// Apply an input event to the module inputs.
    ///
    /// Each stream only overwrites its own field. A route event that doesn't
    /// make a valid route is discarded and the current route kept.
    pub fn apply_event(&mut self, event: InputEvent) {
        let input = &mut self.wp_updater_input;

        match event {
            InputEvent::Pose(pose) => {
                trace!("New pose: {:?}", pose.position_m);
                input.pose = Some(pose);
            }
            InputEvent::Velocity(speed_ms) => input.speed_ms = speed_ms,
            InputEvent::Route(waypoints) => match Route::new(waypoints) {
                Ok(route) => {
                    info!("New route of {} waypoints", route.len());
                    input.route = Some(route);
                }
                Err(e) => error!("Route rejected, keeping the current route: {}", e),
            },
            InputEvent::StopSignal(wire) => {
                let signal = StopSignal::from_wire(wire);
                if signal != input.stop_signal {
                    info!("Stop signal changed to {:?}", signal);
                }
                input.stop_signal = signal;
            }
        }
    }
}
