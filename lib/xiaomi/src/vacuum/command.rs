use serde::ser::{Serialize, SerializeSeq, Serializer};

#[derive(Debug, PartialEq)]
pub enum Command {
    GetStatus,
    AppCharge,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetStatus => "get_status",
            Command::AppCharge => "app_charge",
        }
    }
}

impl Serialize for Command {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Command::GetStatus | Command::AppCharge => serializer.serialize_seq(Some(0))?.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, to_value};

    use super::*;

    #[test]
    fn test_get_status() {
        let command = Command::GetStatus;

        assert_eq!(command.name(), "get_status");

        let serialized = to_value(command).unwrap();
        assert_eq!(serialized, json!([]));
    }

    #[test]
    fn test_app_charge() {
        let command = Command::AppCharge;

        assert_eq!(command.name(), "app_charge");

        let serialized = to_value(command).unwrap();
        assert_eq!(serialized, json!([]));
    }
}
