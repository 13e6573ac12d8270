//! Error Types
//!
//! Every failure in vflux is synchronous and immediate; nothing is retried.
//! Host-document failures surface as [`DomError`] from `materialize` and
//! `render`, reducer failures as [`ReducerError`] wrapped in [`StoreError`].

use thiserror::Error;

/// Failures raised by the host document while materializing a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The host does not know how to create an element with this tag.
    #[error("unsupported element type `{tag}`")]
    UnsupportedElementType { tag: String },

    /// The host refused to assign a property on an element.
    #[error("property `{key}` is not allowed on `<{tag}>`")]
    DisallowedProperty { tag: String, key: String },

    /// Children were appended to, or cleared from, a text node.
    #[error("node {0} cannot hold children")]
    NotAContainer(usize),

    /// The node handle no longer refers to a live node.
    #[error("node {0} is not live in this document")]
    StaleNode(usize),

    /// Appending `child` under `parent` would make a node its own ancestor.
    #[error("node {child} is an ancestor of node {parent}")]
    HierarchyRequest { parent: usize, child: usize },
}

/// A reducer rejected an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("reducer failed: {message}")]
pub struct ReducerError {
    message: String,
}

impl ReducerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for ReducerError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("invalid action payload: {err}"))
    }
}

/// Failures raised by [`Store`](crate::store::Store) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Reducer(#[from] ReducerError),

    /// A listener dispatched while the store was notifying and the store
    /// was configured with [`ReentrancyPolicy::Forbid`](crate::config::ReentrancyPolicy).
    #[error("dispatch of `{action}` attempted while another dispatch is in progress")]
    ReentrantDispatch { action: String },
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reducer_error_from_json_keeps_context() {
        let err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let reducer_err = ReducerError::from(err);
        assert!(reducer_err.message().starts_with("invalid action payload"));
    }

    #[test]
    fn store_error_is_transparent_over_reducer_error() {
        let err = StoreError::from(ReducerError::new("boom"));
        assert_eq!(err.to_string(), "reducer failed: boom");
    }

    #[test]
    fn dom_error_messages_name_the_tag() {
        let err = DomError::UnsupportedElementType {
            tag: "blink".into(),
        };
        assert_eq!(err.to_string(), "unsupported element type `blink`");
    }
}
