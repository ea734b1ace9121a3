//! # Waypoint updater library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to
//! access items defined inside the waypoint updater crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Data store - all data shared between the exec and the modules
pub mod data_store;

/// Inputs - the queue every external input stream is delivered through
pub mod inputs;

/// Lane - the stamped list of final waypoints published each cycle
pub mod lane;

/// Localisation module - the vehicle's last reported pose and speed
pub mod loc;

/// Executable parameters
pub mod params;

/// Route - the full cyclic list of base waypoints
pub mod route;

/// Sinks - where the published lanes go
pub mod sinks;

/// Stop control module - decides whether to brake for a requested stop
pub mod stop_ctrl;

/// Trajectory generation module - builds the speed annotated lookahead window
pub mod traj_gen;

/// Waypoint locator - finds which route waypoint the vehicle should track
pub mod wp_locator;

/// Waypoint updater module - runs the full pipeline each cycle
pub mod wp_updater;
