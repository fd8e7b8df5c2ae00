use std::fmt;

use serde::{
    de::{self, Deserializer, MapAccess, Visitor},
    Deserialize,
};
use serde_json::Value;

pub enum Response {
    Ok { id: u16, result: Value },
    Err { id: u16, error: DeviceError },
}

impl Response {
    pub fn id(&self) -> u16 {
        match self {
            Response::Ok { id, result: _ } => *id,
            Response::Err { id, error: _ } => *id,
        }
    }
}

impl<'de> de::Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ResponseVisitor)
    }
}

struct ResponseVisitor;

impl<'de> Visitor<'de> for ResponseVisitor {
    type Value = Response;

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut id = None;
        let mut error = None;
        let mut result = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "id" => id = Some(map.next_value::<u16>()?),
                "error" => error = Some(map.next_value::<DeviceError>()?),
                "result" => result = Some(map.next_value::<Value>()?),
                _ => {
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }

        let id = id.ok_or_else(|| de::Error::missing_field("id"))?;

        // error takes precedence over result
        match (result, error) {
            (_, Some(error)) => Ok(Response::Err { id, error }),
            (Some(result), None) => Ok(Response::Ok { id, result }),
            (None, None) => Err(de::Error::missing_field("result")),
        }
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "response with result or error")
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct DeviceError {
    pub code: i64,
    pub message: String,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DeviceError {}

#[cfg(test)]
mod tests {
    use serde_json::{from_value, json};

    use super::*;

    #[test]
    fn test_result() {
        let response: Response = from_value(json!({
            "id": 42,
            "result": ["ok"],
            "exe_time": 100
        }))
        .unwrap();

        match response {
            Response::Ok { id, result } => {
                assert_eq!(id, 42);
                assert_eq!(result, json!(["ok"]));
            }
            Response::Err { .. } => panic!("expected result"),
        }
    }

    #[test]
    fn test_error() {
        let response: Response = from_value(json!({
            "id": 7,
            "error": { "code": -10000, "message": "method not found" }
        }))
        .unwrap();

        assert_eq!(response.id(), 7);

        match response {
            Response::Err { error, .. } => {
                assert_eq!(error.code, -10000);
                assert_eq!(error.to_string(), "method not found");
            }
            Response::Ok { .. } => panic!("expected error"),
        }
    }

    #[test]
    fn test_missing_id() {
        let result = from_value::<Response>(json!({ "result": ["ok"] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_result() {
        let result = from_value::<Response>(json!({ "id": 1 }));
        assert!(result.is_err());
    }
}
