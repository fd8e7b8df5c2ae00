use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// Snapshot returned by `get_status`. Fields the monitor doesn't act on are skipped.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Status {
    pub state: State,
    pub battery: u8,
    pub error_code: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum State {
    Starting,
    ChargerDisconnected,
    Idle,
    RemoteControl,
    Cleaning,
    Returning,
    ManualMode,
    Charging,
    ChargingProblem,
    Paused,
    SpotCleaning,
    Error,
    ShuttingDown,
    Updating,
    GoingToTarget,
    ZonedCleaning,
    SegmentCleaning,
    ChargingComplete,
    Offline,
    Unknown(String),
}

impl State {
    pub fn is_charging_or_returning(&self) -> bool {
        matches!(self, State::Charging | State::Returning)
    }

    fn from_code(code: i64) -> State {
        match code {
            1 => State::Starting,
            2 => State::ChargerDisconnected,
            3 => State::Idle,
            4 => State::RemoteControl,
            5 => State::Cleaning,
            6 | 15 => State::Returning,
            7 => State::ManualMode,
            8 => State::Charging,
            9 => State::ChargingProblem,
            10 => State::Paused,
            11 => State::SpotCleaning,
            12 => State::Error,
            13 => State::ShuttingDown,
            14 => State::Updating,
            16 => State::GoingToTarget,
            17 => State::ZonedCleaning,
            18 => State::SegmentCleaning,
            100 => State::ChargingComplete,
            101 => State::Offline,
            _ => State::Unknown(code.to_string()),
        }
    }

    fn from_name(name: &str) -> State {
        match name {
            "starting" => State::Starting,
            "charger disconnected" => State::ChargerDisconnected,
            "idle" => State::Idle,
            "remote control" => State::RemoteControl,
            "cleaning" => State::Cleaning,
            "returning" => State::Returning,
            "manual mode" => State::ManualMode,
            "charging" => State::Charging,
            "charging problem" => State::ChargingProblem,
            "paused" => State::Paused,
            "spot cleaning" => State::SpotCleaning,
            "error" => State::Error,
            "shutting down" => State::ShuttingDown,
            "updating" => State::Updating,
            "going to target" => State::GoingToTarget,
            "zoned cleaning" => State::ZonedCleaning,
            "segment cleaning" => State::SegmentCleaning,
            "charging complete" => State::ChargingComplete,
            "offline" => State::Offline,
            other => State::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Starting => write!(f, "starting"),
            State::ChargerDisconnected => write!(f, "charger disconnected"),
            State::Idle => write!(f, "idle"),
            State::RemoteControl => write!(f, "remote control"),
            State::Cleaning => write!(f, "cleaning"),
            State::Returning => write!(f, "returning"),
            State::ManualMode => write!(f, "manual mode"),
            State::Charging => write!(f, "charging"),
            State::ChargingProblem => write!(f, "charging problem"),
            State::Paused => write!(f, "paused"),
            State::SpotCleaning => write!(f, "spot cleaning"),
            State::Error => write!(f, "error"),
            State::ShuttingDown => write!(f, "shutting down"),
            State::Updating => write!(f, "updating"),
            State::GoingToTarget => write!(f, "going to target"),
            State::ZonedCleaning => write!(f, "zoned cleaning"),
            State::SegmentCleaning => write!(f, "segment cleaning"),
            State::ChargingComplete => write!(f, "charging complete"),
            State::Offline => write!(f, "offline"),
            State::Unknown(raw) => write!(f, "<unknown {raw}>"),
        }
    }
}

impl<'de> Deserialize<'de> for State {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StateVisitor)
    }
}

struct StateVisitor;

impl<'de> Visitor<'de> for StateVisitor {
    type Value = State;

    fn visit_i64<E: de::Error>(self, code: i64) -> Result<Self::Value, E> {
        Ok(State::from_code(code))
    }

    fn visit_u64<E: de::Error>(self, code: u64) -> Result<Self::Value, E> {
        match i64::try_from(code) {
            Ok(code) => Ok(State::from_code(code)),
            Err(_) => Ok(State::Unknown(code.to_string())),
        }
    }

    fn visit_str<E: de::Error>(self, name: &str) -> Result<Self::Value, E> {
        // some firmwares quote the numeric code
        Ok(match name.trim().parse::<i64>() {
            Ok(code) => State::from_code(code),
            Err(_) => State::from_name(name),
        })
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a state code or name")
    }
}
