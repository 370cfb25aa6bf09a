//! Main robot-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - System input acquisition:
//!             - IMU sensing (simulated)
//!         - Operator command processing and handling
//!         - Drive assist processing
//!         - Demand output and archiving
//!
//! # Modules
//!
//! All modules (e.g. `drive_assist`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use bot_lib::{
    data_store::DataStore,
    imu_sim::ImuSim,
};
use ops_if::{mech::MechDems, oc::OcType};

mod oc_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};
use color_eyre::{Report, eyre::{WrapErr, eyre}};

// Internal
use util::{
    module::State,
    archive::Archived,
    logger::{logger_init, LevelFilter},
    session::Session,
    script_interpreter::{ScriptInterpreter, PendingOcs},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.02;

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / CYCLE_PERIOD_S;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "bot_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Kestrel Teleop Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- INITIALISE OPERATOR INPUT SOURCE ----

    // Operator input comes from a script of recorded commands, the stand-in
    // for a live input device.

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // A single argument is used as the script path
    if args.len() != 2 {
        return Err(eyre!(
            "Expected exactly one argument (the operator script path), found {}",
            args.len() - 1)
        );
    }

    info!("Loading operator script from \"{}\"", &args[1]);

    // Load the script interpreter
    let mut script = ScriptInterpreter::new(
        &args[1]).wrap_err("Failed to load the operator script")?;

    // Display some info
    info!(
        "Loaded script lasts {:.02} s and contains {} commands\n",
        script.get_duration(),
        script.get_num_ocs()
    );

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.drive_assist.init("drive_assist.toml", &session)
        .wrap_err("Failed to initialise DriveAssist")?;
    info!("DriveAssist init complete");

    let mut imu_sim = ImuSim::new("imu_sim.toml")
        .wrap_err("Failed to initialise ImuSim")?;
    info!("ImuSim init complete");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    // Demands executed over the previous cycle, which the IMU simulation
    // integrates before they are cleared at the cycle start
    let mut last_dems = MechDems::stop();

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // ---- DATA INPUT ----

        // Advance the simulated IMU using the previous cycle's demands
        ds.heading_deg = imu_sim.step(&last_dems, CYCLE_PERIOD_S);

        // ---- OPERATOR COMMAND PROCESSING ----

        match script.get_pending_ocs() {
            PendingOcs::None => (),
            PendingOcs::Some(oc_vec) => {
                for oc in oc_vec.iter() {
                    // In safe mode only the make unsafe command is processed
                    if ds.safe && oc.oc_type != OcType::MakeUnsafe {
                        warn!("Cannot execute {:?} while in safe mode", oc.oc_type);
                        continue;
                    }

                    oc_processor::exec(&mut ds, oc);
                }
            }
            // Exit if end of script reached
            PendingOcs::EndOfScript => {
                info!("End of operator script reached, stopping");
                break
            }
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        // Build this cycle's input from the latest stick sample and heading
        ds.drive_assist_input = bot_lib::drive_assist::InputData {
            forward_axis: ds.oi_frame.forward_axis,
            rotation_axis: ds.oi_frame.rotation_axis,
            quick_turn: ds.oi_frame.quick_turn,
            heading_deg: ds.heading_deg,
        };

        // DriveAssist processing
        match ds.drive_assist.proc(&ds.drive_assist_input) {
            Ok((o, r)) => {
                ds.drive_assist_output = o;
                ds.drive_assist_status_rpt = r;
            },
            Err(e) => {
                // A DriveAssist error means a bad stick sample, so just issue
                // the warning and leave the demands neutral for this cycle.
                warn!("Error during DriveAssist processing: {}", e)
            }
        };

        last_dems = ds.drive_assist_output;

        // ---- TELEMETRY ----

        trace!(
            "Sticks: fwd {:.3}, rot {:.3}; heading {:.2} deg; dems L {:.3} R {:.3}",
            ds.oi_frame.forward_axis,
            ds.oi_frame.rotation_axis,
            ds.heading_deg,
            ds.drive_assist_output.left_effort,
            ds.drive_assist_output.right_effort
        );

        if ds.is_1_hz_cycle {
            debug!(
                "Mode: {:?}, heading: {:.2} deg, error: {:.2} deg",
                ds.drive_assist_status_rpt.mode,
                ds.heading_deg,
                ds.drive_assist_status_rpt.heading_error_deg
            );
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.drive_assist.write() {
            warn!("Could not write DriveAssist archives: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64()
                        - Duration::from_secs_f64(CYCLE_PERIOD_S).as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!("End of execution");

    Ok(())
}
