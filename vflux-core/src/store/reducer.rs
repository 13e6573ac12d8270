//! Reducers
//!
//! A reducer maps the previous state and an action to the next state. The
//! previous state is `None` exactly once, when the store computes its
//! initial state from the [`INIT`](super::INIT) action.

use super::Action;
use crate::error::ReducerError;

/// Pure state transition function.
pub trait Reducer<S>: Send + Sync + 'static {
    fn reduce(&self, state: Option<&S>, action: &Action) -> Result<S, ReducerError>;
}

impl<S, F> Reducer<S> for F
where
    F: Fn(Option<&S>, &Action) -> Result<S, ReducerError> + Send + Sync + 'static,
{
    fn reduce(&self, state: Option<&S>, action: &Action) -> Result<S, ReducerError> {
        self(state, action)
    }
}

/// Pin a closure to the reducer signature so its argument types are
/// inferred.
///
/// ```rust,ignore
/// let store = Store::new(reducer(|state: Option<&Vec<String>>, action| { ... }))?;
/// ```
pub fn reducer<S, F>(f: F) -> F
where
    F: Fn(Option<&S>, &Action) -> Result<S, ReducerError> + Send + Sync + 'static,
{
    f
}

/// Adapt a reducer that cannot fail.
pub fn infallible<S, F>(f: F) -> Infallible<F>
where
    F: Fn(Option<&S>, &Action) -> S + Send + Sync + 'static,
{
    Infallible(f)
}

/// A reducer built by [`infallible`].
#[derive(Debug, Clone, Copy)]
pub struct Infallible<F>(F);

impl<S, F> Reducer<S> for Infallible<F>
where
    F: Fn(Option<&S>, &Action) -> S + Send + Sync + 'static,
{
    fn reduce(&self, state: Option<&S>, action: &Action) -> Result<S, ReducerError> {
        Ok((self.0)(state, action))
    }
}
