//! # Script interpreter module
//!
//! Scripts replay timestamped events into an executable. Each entry has the
//! form `<time_s>: <json payload>;` where the payload is any JSON value that
//! deserialises into the event type. Anything outside an entry (comments,
//! blank lines) is ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use regex::RegexBuilder;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An event which is scripted to occur at a specific time.
struct Entry<T> {
    /// The time the event is supposed to be emitted at
    exec_time_s: f64,

    event: T,
}

/// A script interpreter.
///
/// After initialising with the path to the script use `.get_pending` to
/// acquire the events which are now due.
pub struct ScriptInterpreter<T> {
    script_path: Option<PathBuf>,
    entries: VecDeque<Entry<T>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error("Script contains an invalid timestamp: {0}. Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid event at {0} s: {1}")]
    InvalidEvent(f64, serde_json::Error),

    #[error("Script events are not in time order ({1} s follows {0} s)")]
    OutOfOrder(f64, f64),
}

/// Events which are due for execution.
#[derive(Debug, PartialEq)]
pub enum Pending<T> {
    None,
    Some(Vec<T>),
    EndOfScript,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<T> ScriptInterpreter<T>
where
    T: DeserializeOwned,
{
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = PathBuf::from(script_path.as_ref());

        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        let script = fs::read_to_string(&path).map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_script(&script)?;
        si.script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        let re = RegexBuilder::new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("script regex is valid");

        let mut entries: VecDeque<Entry<T>> = VecDeque::new();

        for cap in re.captures_iter(script) {
            // Both groups are mandatory in the pattern
            let time_str = &cap[1];
            let payload = &cap[3];

            let exec_time_s: f64 = time_str
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}: {}", time_str, e)))?;

            if let Some(last) = entries.back() {
                if exec_time_s < last.exec_time_s {
                    return Err(ScriptError::OutOfOrder(last.exec_time_s, exec_time_s));
                }
            }

            let event = serde_json::from_str(payload)
                .map_err(|e| ScriptError::InvalidEvent(exec_time_s, e))?;

            entries.push_back(Entry { exec_time_s, event });
        }

        if entries.is_empty() {
            return Err(ScriptError::ScriptEmpty);
        }

        Ok(ScriptInterpreter {
            script_path: None,
            entries,
        })
    }
}

impl<T> ScriptInterpreter<T> {
    /// Return the events which are due at the current session time.
    pub fn get_pending(&mut self) -> Pending<T> {
        self.get_pending_at(get_elapsed_seconds())
    }

    /// Return the events which are due at the given time.
    ///
    /// Once every event has been returned `Pending::EndOfScript` is given.
    pub fn get_pending_at(&mut self, current_time_s: f64) -> Pending<T> {
        if self.entries.is_empty() {
            return Pending::EndOfScript;
        }

        let mut events: Vec<T> = vec![];

        while let Some(entry) = self.entries.front() {
            if entry.exec_time_s > current_time_s {
                break;
            }
            if let Some(entry) = self.entries.pop_front() {
                events.push(entry.event);
            }
        }

        if events.is_empty() {
            Pending::None
        } else {
            Pending::Some(events)
        }
    }

    /// Get the number of events remaining in the script
    pub fn get_num_events(&self) -> usize {
        self.entries.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.entries.back() {
            Some(e) => e.exec_time_s,
            None => 0f64,
        }
    }

    /// Path the script was loaded from, if it came from a file.
    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }
}
