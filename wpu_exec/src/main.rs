//! Main waypoint updater executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and parameters
//!     - Load the input script and, optionally, the route file
//!     - Main loop:
//!         - Push due script events into the input queue
//!         - Drain the input queue into the data store
//!         - Waypoint updater processing:
//!             - Locate the vehicle on the route
//!             - Resolve the stop state
//!             - Build the final waypoints
//!         - Publish the lane to the configured sink
//!
//! # Usage
//!
//! ```text
//! wpu_exec <script_path> [route_csv_path]
//! ```

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use wpu_lib::{
    data_store::DataStore,
    inputs::{InputEvent, InputQueue},
    lane::Lane,
    params::{ExecParams, SinkKind},
    route::Route,
    sinks::{JsonFileSink, LogSink, TrajectorySink},
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info, warn};
use std::env;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

// Internal
use util::{
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{Pending, ScriptInterpreter},
    session::Session,
    time::frequency_to_period,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("wpu_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Waypoint Updater Executable\n");
    info!("Running on: {}", host::get_hostname());
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: ExecParams =
        util::params::load("exec.toml").wrap_err("Could not load exec params")?;

    let cycle_period = frequency_to_period(exec_params.cycle_frequency_hz).ok_or_else(|| {
        eyre!(
            "Invalid cycle frequency of {} Hz",
            exec_params.cycle_frequency_hz
        )
    })?;

    info!("Exec parameters loaded");

    // ---- INITIALISE INPUTS ----

    let input_queue = InputQueue::new();
    let script_sender = input_queue.sender();

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    if args.len() < 2 || args.len() > 3 {
        return Err(eyre!(
            "Expected a script path and an optional route path, found {} arguments",
            args.len() - 1
        ));
    }

    info!("Loading script from \"{}\"", &args[1]);

    let mut si: ScriptInterpreter<InputEvent> =
        ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} events\n",
        si.get_duration(),
        si.get_num_events()
    );

    // The route given on the command line wins over the one in the params
    let route_path = match (args.get(2), &exec_params.route_file) {
        (Some(p), _) => Some(PathBuf::from(p)),
        (None, Some(f)) => {
            let mut p = host::get_wpu_sw_root().wrap_err("Failed to find the route file")?;
            p.push(f);
            Some(p)
        }
        (None, None) => None,
    };

    match route_path {
        Some(path) => {
            let route = Route::from_csv_path(&path)
                .wrap_err_with(|| format!("Failed to load the route from {:?}", path))?;

            script_sender
                .send(InputEvent::Route(route.into()))
                .wrap_err("Failed to queue the route")?;
        }
        None => info!("No route file given, waiting for a route from the script"),
    }

    // ---- INITIALISE SINK ----

    let mut sink: Box<dyn TrajectorySink> = match exec_params.sink {
        SinkKind::Log => Box::new(LogSink::default()),
        SinkKind::JsonFile => Box::new(
            JsonFileSink::new(session.path(&exec_params.output_file_name))
                .wrap_err("Failed to create the output file")?,
        ),
    };

    info!("Publishing to the {} sink", sink.name());

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.wp_updater
        .init("wp_updater.toml", &session)
        .wrap_err("Failed to initialise WpUpdater")?;
    info!("WpUpdater init complete");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start();

        // ---- SCRIPT PROCESSING ----

        match si.get_pending() {
            Pending::None => (),
            Pending::Some(events) => {
                for event in events {
                    if let Err(e) = script_sender.send(event) {
                        warn!("Could not queue script event: {}", e);
                    }
                }
            }
            // Exit if end of script reached
            Pending::EndOfScript => {
                info!("End of script reached, stopping");
                break;
            }
        }

        // ---- DATA INPUT ----

        for event in input_queue.drain() {
            ds.apply_event(event);
        }

        // ---- WAYPOINT UPDATER PROCESSING ----

        match ds.wp_updater.proc(&ds.wp_updater_input) {
            Ok((Some(final_wps), r)) => {
                ds.wp_updater_status_rpt = r;
                debug!("WpUpdater status: {:?}", r);

                let lane = Lane::new(final_wps);

                match sink.publish(&lane) {
                    Ok(()) => ds.num_published += 1,
                    Err(e) => warn!("Could not publish to the {} sink: {}", sink.name(), e),
                }
            }
            Ok((None, r)) => ds.wp_updater_status_rpt = r,
            Err(e) => {
                // Bad stop indexes are data errors, skip this cycle and continue
                warn!("Error during WpUpdater processing: {}", e)
            }
        };

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!(
        "End of execution, {} lanes published in {} cycles",
        ds.num_published, ds.num_cycles
    );

    Ok(())
}
