//! # Operator command processor module
//!
//! The operator command processor handles commands coming from any source.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};

// Internal
use ops_if::oc::{Oc, OcType};
use bot_lib::data_store::{DataStore, SafeModeCause};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute an operator command.
///
/// Mutates the datastore to send commands to different modules.
pub(crate) fn exec(ds: &mut DataStore, oc: &Oc) {

    // Handle different command types
    match oc.oc_type {
        OcType::None => (),
        OcType::MakeSafe => {
            debug!("Recieved MakeSafe command");
            ds.make_safe(SafeModeCause::MakeSafeOc);
        }
        OcType::MakeUnsafe => {
            debug!("Recieved MakeUnsafe command");
            ds.make_unsafe(SafeModeCause::MakeSafeOc).ok();
        }
        OcType::Stick => match oc.stick_frame() {
            Ok(frame) => {
                ds.oi_frame = frame;
            }
            Err(e) => warn!("Could not read the stick frame: {}", e),
        },
    }
}
