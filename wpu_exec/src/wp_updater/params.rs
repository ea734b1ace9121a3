//! Waypoint updater parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use super::WpUpdaterError;
use crate::traj_gen::DEFAULT_LOOKAHEAD_WPS;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the waypoint updater
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Params {
    /// Maximum number of waypoints in the published window.
    pub lookahead_wps: usize,

    /// Deceleration limit used to judge whether a stop is still reachable.
    /// Given as a negative value, only the magnitude is used.
    ///
    /// Units: meters/second^2
    pub decel_limit_mss: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            lookahead_wps: DEFAULT_LOOKAHEAD_WPS,
            decel_limit_mss: -5.0,
        }
    }
}

impl Params {
    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), WpUpdaterError> {
        if self.lookahead_wps == 0 {
            return Err(WpUpdaterError::InvalidParams(
                "lookahead_wps must be greater than zero".into(),
            ));
        }

        if !self.decel_limit_mss.is_finite() || self.decel_limit_mss == 0.0 {
            return Err(WpUpdaterError::InvalidParams(format!(
                "decel_limit_mss must be finite and non-zero, found {}",
                self.decel_limit_mss
            )));
        }

        Ok(())
    }
}
