//! # Operator command module
//!
//! An operator command is one discrete instruction from the operator to the
//! robot, either a safety action or a new sample of the drive sticks.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use serde_json::{self, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An operator command, i.e. an instruction issued to the robot by the
/// driver.
#[derive(Debug, Serialize, Deserialize)]
pub struct Oc {
    /// The type of the operator command
    pub oc_type: OcType,

    /// The payload associated with this command
    pub payload: OcPayload,
}

/// A single sample of the operator's drive sticks.
///
/// Axis values are normalised to [-1, +1]. `forward_axis` is
/// forward-positive: whatever feeds frames in (script replay or a gamepad
/// driver) is responsible for negating a raw joystick Y axis, which is
/// conventionally negative when pushed forwards.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct OiFrame {
    /// Throttle axis demand, forward-positive.
    pub forward_axis: f64,

    /// Rotation axis demand, clockwise-positive.
    pub rotation_axis: f64,

    /// True while the operator holds the quick-turn button.
    pub quick_turn: bool,
}

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static TYPE_HAS_NO_PAYLOAD: [OcType; 3] = [OcType::None, OcType::MakeSafe, OcType::MakeUnsafe];

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Operator command types.
///
/// The type identifies the purpose of the command, and is used by the exec's
/// command processor to determine where to send it.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub enum OcType {
    None,
    MakeSafe,
    MakeUnsafe,
    Stick,
}

/// Operator command payload.
///
/// The payload only indicates which serialisation format the data is in, it
/// is up to the user to properly deserialise the data contained within it.
#[derive(Debug, Serialize, Deserialize)]
pub enum OcPayload {
    None,
    Json(String),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum OcParseError {
    #[error("Command contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Command has an invalid type ({0})")]
    InvalidType(String),

    #[error("Command of type {0:?} is expected to have a payload but it doesn't")]
    MissingPayload(OcType),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Oc {
    /// Parse a new command from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, OcParseError> {
        // Parse the JSON string into a value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(OcParseError::InvalidJson(e)),
        };

        // Get the type of the command
        let oc_type = match OcType::from_str(match val["type"].as_str() {
            Some(s) => s,
            None => {
                return Err(OcParseError::InvalidType(String::from(
                    "Expected \"type\" to be a string",
                )))
            }
        }) {
            Some(t) => t,
            None => {
                return Err(OcParseError::InvalidType(format!(
                    "{} is not a recognised command type",
                    val["type"].as_str().unwrap()
                )))
            }
        };

        // Get the payload. If it's null and the type does not have a payload
        // then an error is returned
        if val["payload"].is_null() && !TYPE_HAS_NO_PAYLOAD.contains(&oc_type) {
            return Err(OcParseError::MissingPayload(oc_type));
        }

        Ok(Oc {
            oc_type,
            payload: OcPayload::Json(val["payload"].to_string()),
        })
    }

    /// Deserialise the stick frame carried by a `Stick` command.
    pub fn stick_frame(&self) -> Result<OiFrame, OcParseError> {
        match self.payload {
            OcPayload::Json(ref s) => {
                serde_json::from_str(s).map_err(OcParseError::InvalidJson)
            }
            OcPayload::None => Err(OcParseError::MissingPayload(OcType::Stick)),
        }
    }
}

impl OcType {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "NONE" => Some(OcType::None),
            "SAFE" => Some(OcType::MakeSafe),
            "UNSAFE" => Some(OcType::MakeUnsafe),
            "STICK" => Some(OcType::Stick),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_stick_command() {
        let oc = Oc::from_json(
            r#"{"type": "STICK", "payload": {"forward_axis": 0.5, "rotation_axis": -0.1, "quick_turn": false}}"#,
        )
        .unwrap();

        assert_eq!(oc.oc_type, OcType::Stick);

        let frame = oc.stick_frame().unwrap();
        assert_eq!(frame.forward_axis, 0.5);
        assert_eq!(frame.rotation_axis, -0.1);
        assert!(!frame.quick_turn);
    }

    #[test]
    fn parse_safe_command_without_payload() {
        let oc = Oc::from_json(r#"{"type": "SAFE"}"#).unwrap();
        assert_eq!(oc.oc_type, OcType::MakeSafe);
    }

    #[test]
    fn stick_command_requires_payload() {
        assert!(matches!(
            Oc::from_json(r#"{"type": "STICK"}"#),
            Err(OcParseError::MissingPayload(OcType::Stick))
        ));
    }

    #[test]
    fn unknown_type_rejected() {
        assert!(matches!(
            Oc::from_json(r#"{"type": "WARP"}"#),
            Err(OcParseError::InvalidType(_))
        ));
    }
}
