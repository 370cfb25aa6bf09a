//! # Kestrel operator script interpreter module
//!
//! This module provides an interpreter for Kestrel Operator Scripts, allowing
//! recorded operator commands to be replayed against the exec in place of a
//! live input device.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use ops_if::oc::{Oc, OcParseError};
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
pub struct Command {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The operator command to run
    oc: Oc
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_ocs` to acquire a list of operator commands that need
/// executing.
pub struct ScriptInterpreter {
    _script_path: PathBuf,
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid command at {0} s: {1}")]
    InvalidOc(f64, OcParseError)
}

pub enum PendingOcs {
    None,
    Some(Vec<Oc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(
                ScriptError::ScriptNotFound(path.to_str().unwrap().to_string()));
        }

        // Load the script into a string
        let script = match fs::read_to_string(script_path) {
            Ok(s) => s,
            Err(e) => return Err(ScriptError::ScriptLoadError(e))
        };

        // Empty queue of commands
        let mut oc_queue: VecDeque<Command> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .unwrap();

        let mut num_caps = 0;

        for cap in re.captures_iter(&script) {
            // Parse the exec time
            let exec_time_s: f64 = match cap.get(1).unwrap().as_str().parse() {
                Ok(t) => t,
                Err(e) => return Err(
                    ScriptError::InvalidTimestamp(format!("{}", e)))
            };

            // Parse the command from the payload. The scripts contain JSON
            // only.
            let oc = match Oc::from_json(
                cap.get(3).unwrap().as_str())
            {
                Ok(c) => c,
                Err(e) => return Err(ScriptError::InvalidOc(
                    exec_time_s, e
                ))
            };

            // Build command from the match
            oc_queue.push_back(Command {
                exec_time_s,
                oc
            });

            num_caps += 1;
        }

        if num_caps == 0 {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            _script_path: path,
            cmds: oc_queue
        })
    }

    /// Return a vector of pending commands, or `None` if no commands need
    /// executing now.
    pub fn get_pending_ocs(&mut self) -> PendingOcs {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.len() == 0 {
            return PendingOcs::EndOfScript
        }

        let mut oc_vec: Vec<Oc> = vec![];

        let current_time_s = get_elapsed_seconds();

        // Peek items from the queue, if the head's exec time is lower than
        // the current time add it to the vector, and keep adding commands
        // until the exec times are larger than the current time.
        while
            self.cmds.len() > 0
            &&
            self.cmds.front().unwrap().exec_time_s < current_time_s
        {
            oc_vec.push(self.cmds.pop_front().unwrap().oc);
        }

        // If the vector is longer than 0 return Some, otherwise None
        if oc_vec.len() > 0 {
            PendingOcs::Some(oc_vec)
        }
        else {
            PendingOcs::None
        }
    }

    /// Get the number of commands in the script
    pub fn get_num_ocs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use ops_if::oc::OcType;

    #[test]
    fn parse_script() {
        let mut path = std::env::temp_dir();
        path.push("kestrel_script_interpreter_parse_test.kos");

        fs::write(
            &path,
            "\
            0.0: {\"type\": \"UNSAFE\"};\n\
            0.1: {\"type\": \"STICK\", \"payload\": \
                {\"forward_axis\": 0.5, \"rotation_axis\": 0.0, \
                 \"quick_turn\": false}};\n\
            2.0: {\"type\": \"SAFE\"};\n",
        )
        .unwrap();

        let si = ScriptInterpreter::new(&path).unwrap();

        assert_eq!(si.get_num_ocs(), 3);
        assert_eq!(si.get_duration(), 2.0);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_script_rejected() {
        let mut path = std::env::temp_dir();
        path.push("kestrel_script_interpreter_empty_test.kos");

        fs::write(&path, "this is not a script\n").unwrap();

        assert!(matches!(
            ScriptInterpreter::new(&path),
            Err(ScriptError::ScriptEmpty)
        ));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn invalid_command_rejected() {
        let mut path = std::env::temp_dir();
        path.push("kestrel_script_interpreter_invalid_test.kos");

        fs::write(&path, "0.0: {\"type\": \"WARP\"};\n").unwrap();

        match ScriptInterpreter::new(&path) {
            Err(ScriptError::InvalidOc(t, _)) => assert_eq!(t, 0.0),
            _ => panic!("expected InvalidOc"),
        }

        fs::remove_file(&path).ok();
    }

    #[test]
    fn commands_keep_script_order() {
        let mut path = std::env::temp_dir();
        path.push("kestrel_script_interpreter_order_test.kos");

        fs::write(
            &path,
            "0.0: {\"type\": \"UNSAFE\"};\n1.0: {\"type\": \"SAFE\"};\n",
        )
        .unwrap();

        let si = ScriptInterpreter::new(&path).unwrap();
        assert_eq!(si.cmds.front().unwrap().oc.oc_type, OcType::MakeUnsafe);
        assert_eq!(si.cmds.back().unwrap().oc.oc_type, OcType::MakeSafe);

        fs::remove_file(&path).ok();
    }
}
