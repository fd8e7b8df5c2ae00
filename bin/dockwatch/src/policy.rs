use std::fmt;

use xiaomi::Status;

pub const LOW_BATTERY_THRESHOLD: u8 = 20;

/// Reason to send the vacuum back to its dock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Correction {
    /// The vacuum reports a non-zero error code. Codes are device specific and
    /// are never interpreted beyond being non-zero.
    Fault(i64),
    /// Battery below [`LOW_BATTERY_THRESHOLD`] while neither charging nor returning.
    LowBattery(u8),
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correction::Fault(code) => write!(f, "error code {code} detected"),
            Correction::LowBattery(battery) => {
                write!(f, "battery {battery}% is below {LOW_BATTERY_THRESHOLD}%")
            }
        }
    }
}

/// Checks are independent, so both corrections may apply to the same status.
pub fn corrections(status: &Status) -> Vec<Correction> {
    let mut corrections = vec![];

    if status.error_code != 0 {
        corrections.push(Correction::Fault(status.error_code));
    }

    if status.battery < LOW_BATTERY_THRESHOLD && !status.state.is_charging_or_returning() {
        corrections.push(Correction::LowBattery(status.battery));
    }

    corrections
}
