//! Executable parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the executable itself, loaded from `exec.toml`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExecParams {
    /// Number of cycles per second.
    ///
    /// Units: hertz
    pub cycle_frequency_hz: f64,

    /// Where published lanes are sent.
    pub sink: SinkKind,

    /// Name of the output file in the session directory, used by the
    /// `JsonFile` sink.
    pub output_file_name: String,

    /// Route CSV file to load at startup, relative to `$WPU_SW_ROOT`. A path
    /// given on the command line takes precedence.
    pub route_file: Option<String>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Log,
    JsonFile,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ExecParams {
    fn default() -> Self {
        Self {
            cycle_frequency_hz: 10.0,
            sink: SinkKind::Log,
            output_file_name: "final_waypoints.jsonl".into(),
            route_file: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exec_params() {
        let p: ExecParams = util::params::from_str("").unwrap();
        assert_eq!(p, ExecParams::default());

        let p: ExecParams = util::params::from_str(
            r#"
            cycle_frequency_hz = 20.0
            sink = "JsonFile"
            route_file = "routes/loop.csv"
            "#,
        )
        .unwrap();

        assert_eq!(p.cycle_frequency_hz, 20.0);
        assert_eq!(p.sink, SinkKind::JsonFile);
        assert_eq!(p.output_file_name, "final_waypoints.jsonl");
        assert_eq!(p.route_file.as_deref(), Some("routes/loop.csv"));
    }
}
