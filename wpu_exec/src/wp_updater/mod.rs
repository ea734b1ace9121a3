//! # Waypoint updater module
//!
//! The waypoint updater is the cyclic module producing the final waypoints.
//! Each cycle it:
//!  1. Locates the vehicle on the route (`wp_locator`),
//!  2. Resolves whether to brake for a pending stop (`stop_ctrl`),
//!  3. Builds the speed-annotated window (`traj_gen`) and bounds it to the
//!     lookahead.
//!
//! The motion state is the only thing carried from one cycle to the next.
//! Until both a route and a pose have been received the module is idle and
//! produces no output.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::Params;
pub use state::*;

use util::params::LoadError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during waypoint updater operation.
#[derive(Debug, thiserror::Error)]
pub enum WpUpdaterError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(LoadError),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The stop signal refers to a waypoint that isn't on the route. The
    /// cycle is skipped and the motion state left as it was.
    #[error("Stop index {index} is outside the route of {route_len} waypoints")]
    StopIndexOutOfRange { index: usize, route_len: usize },
}
