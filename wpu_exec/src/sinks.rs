//! # Trajectory sinks
//!
//! A sink is where each cycle's lane goes. The transport to the real
//! controller is not part of this crate, so the exec offers a sink that logs
//! the lane and one that records every lane to a JSON lines file in the
//! session directory.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;
use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

// Internal
use crate::lane::Lane;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Destination for the published lanes.
pub trait TrajectorySink {
    /// Publish a single lane. Failures are not retried by the caller.
    fn publish(&mut self, lane: &Lane) -> Result<(), SinkError>;

    /// Short name used in log messages.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Logs a summary of each lane.
#[derive(Default)]
pub struct LogSink;

/// Appends each lane as a single line of JSON to a file.
pub struct JsonFileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Keeps every lane in memory.
#[derive(Default)]
pub struct MemorySink {
    pub lanes: Vec<Lane>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Could not write to the output file: {0}")]
    IoError(std::io::Error),

    #[error("Could not serialise the lane: {0}")]
    SerialiseError(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajectorySink for LogSink {
    fn publish(&mut self, lane: &Lane) -> Result<(), SinkError> {
        match (lane.waypoints.first(), lane.waypoints.last()) {
            (Some(first), Some(last)) => info!(
                "Lane of {} waypoints, speed {:.2} m/s at ({:.2}, {:.2}) to {:.2} m/s at \
                 ({:.2}, {:.2})",
                lane.len(),
                first.speed_ms,
                first.pose.position_m[0],
                first.pose.position_m[1],
                last.speed_ms,
                last.pose.position_m[0],
                last.pose.position_m[1]
            ),
            _ => info!("Empty lane"),
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

impl JsonFileSink {
    /// Create the sink, truncating any existing file at the path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path.as_ref())
            .map_err(SinkError::IoError)?;

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrajectorySink for JsonFileSink {
    fn publish(&mut self, lane: &Lane) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, lane).map_err(SinkError::SerialiseError)?;
        self.writer.write_all(b"\n").map_err(SinkError::IoError)?;
        self.writer.flush().map_err(SinkError::IoError)
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}

impl TrajectorySink for MemorySink {
    fn publish(&mut self, lane: &Lane) -> Result<(), SinkError> {
        self.lanes.push(lane.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
