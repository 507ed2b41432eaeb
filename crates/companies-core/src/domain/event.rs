//! Change notification emitted after a successful mutation

use std::fmt;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    #[serde(rename = "Company created")]
    CompanyCreated,
    #[serde(rename = "Company updated")]
    CompanyUpdated,
    #[serde(rename = "Company deleted")]
    CompanyDeleted,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::CompanyCreated => "Company created",
            EventKind::CompanyUpdated => "Company updated",
            EventKind::CompanyDeleted => "Company deleted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable notification record. Serialized as `{"kind": ..., "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    kind: EventKind,
    payload: Value,
}

impl Event {
    pub fn new<T: Serialize + ?Sized>(kind: EventKind, payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            kind,
            payload: serde_json::to_value(payload)?,
        })
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        let event = Event::new(EventKind::CompanyDeleted, "u1").unwrap();
        let bytes = event.to_bytes().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["kind"], "Company deleted");
        assert_eq!(value["payload"], "u1");
    }
}
