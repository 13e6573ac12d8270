//! Actions
//!
//! An action is a `type` string plus arbitrary payload fields. The store
//! never looks inside an action; only reducers interpret it. On the wire
//! the payload fields sit next to `type`:
//!
//! ```json
//! { "type": "todo/add", "text": "buy milk" }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ReducerError;

/// Type of the action a store dispatches to its reducer on construction.
pub const INIT: &str = "@@vflux/INIT";

/// Type of the action dispatched after the reducer is replaced.
pub const REPLACE: &str = "@@vflux/REPLACE";

const INTERNAL_PREFIX: &str = "@@vflux/";

/// A message describing a state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// The sentinel action used to compute the initial state.
    pub fn init() -> Self {
        Self::new(INIT)
    }

    pub fn replace() -> Self {
        Self::new(REPLACE)
    }

    /// Build an action from a serializable payload. Struct and map payloads
    /// are flattened into the action; any other value is stored under
    /// `payload`.
    pub fn with_payload<T: Serialize>(kind: impl Into<String>, payload: &T) -> Result<Self, serde_json::Error> {
        let payload = match serde_json::to_value(payload)? {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("payload".to_string(), other);
                map
            }
        };
        Ok(Self {
            kind: kind.into(),
            payload,
        })
    }

    /// Add one payload field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Whether this is one of the store's own sentinel actions.
    pub fn is_internal(&self) -> bool {
        self.kind.starts_with(INTERNAL_PREFIX)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Decode the payload fields into a typed value.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, ReducerError> {
        Ok(serde_json::from_value(Value::Object(self.payload.clone()))?)
    }
}

impl From<&str> for Action {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for Action {
    fn from(kind: String) -> Self {
        Self::new(kind)
    }
}
