//! Configuration
//!
//! Stores and documents are configured through plain option structs. Both
//! deserialize from JSON with every field optional, so a host application
//! can keep them in its own config files:
//!
//! ```rust,ignore
//! let options = StoreOptions::from_json_str(r#"{ "reentrancy": "queue" }"#)?;
//! let store = Store::with_options(reducer, options)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What happens when a listener dispatches while a dispatch is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentrancyPolicy {
    /// The nested dispatch runs to completion inline, including its own
    /// notification pass. The outer dispatch then resumes notifying the
    /// listeners it captured before the nested call.
    #[default]
    Nested,

    /// The nested action is queued and applied by the outermost dispatch
    /// once its notification pass has finished.
    Queue,

    /// The nested dispatch is rejected with
    /// [`StoreError::ReentrantDispatch`](crate::error::StoreError).
    Forbid,
}

/// What happens when a listener panics during notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerFaultPolicy {
    /// Log the panic and keep notifying the remaining listeners.
    #[default]
    Isolate,

    /// Let the panic unwind out of `dispatch`, skipping later listeners.
    Propagate,
}

/// Options for a [`Store`](crate::store::Store).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub reentrancy: ReentrancyPolicy,
    pub listener_faults: ListenerFaultPolicy,
}

impl StoreOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn reentrancy(mut self, policy: ReentrancyPolicy) -> Self {
        self.reentrancy = policy;
        self
    }

    pub fn listener_faults(mut self, policy: ListenerFaultPolicy) -> Self {
        self.listener_faults = policy;
        self
    }
}

/// Options for a [`MemoryDocument`](crate::dom::MemoryDocument).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Reject tags outside the HTML allowlist (custom elements always pass).
    pub strict_tags: bool,

    /// Reject properties outside the property allowlist.
    pub strict_properties: bool,

    /// Additional tags accepted in strict mode.
    pub extra_tags: Vec<String>,

    /// Additional property names accepted in strict mode.
    pub extra_properties: Vec<String>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            strict_tags: true,
            strict_properties: true,
            extra_tags: Vec::new(),
            extra_properties: Vec::new(),
        }
    }
}

impl DocumentOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Accept any tag and any property.
    pub fn permissive() -> Self {
        Self {
            strict_tags: false,
            strict_properties: false,
            ..Self::default()
        }
    }
}
