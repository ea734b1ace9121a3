//! # Lane
//!
//! The message published every cycle: a stamped, bounded list of final
//! waypoints for the downstream controller.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::traj_gen::FinalWaypoint;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Frame every published lane is expressed in.
pub const FRAME_ID: &str = "world";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Time the lane was produced.
    pub stamp: DateTime<Utc>,

    pub frame_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub header: Header,
    pub waypoints: Vec<FinalWaypoint>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Lane {
    /// Stamp a set of final waypoints with the current time.
    pub fn new(waypoints: Vec<FinalWaypoint>) -> Self {
        Self::with_stamp(waypoints, Utc::now())
    }

    pub fn with_stamp(waypoints: Vec<FinalWaypoint>, stamp: DateTime<Utc>) -> Self {
        Self {
            header: Header {
                stamp,
                frame_id: FRAME_ID.into(),
            },
            waypoints,
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}
