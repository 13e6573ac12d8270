//! Flux Store
//!
//! The store is a single state slot driven by a reducer:
//!
//! ```text
//! Action ──► Store::dispatch ──► reducer(state, action) ──► new state
//!                                                              │
//!             render(view(state)) ◄── listener ◄── notify ◄────┘
//! ```
//!
//! The store never inspects its state; its shape is whatever the reducer
//! returns. Rendering is not wired in automatically: application code
//! subscribes a listener that rebuilds the view and calls
//! [`render`](crate::render::render).
//!
//! # Concepts
//!
//! ## Actions
//!
//! An [`Action`] is a `type` string plus payload fields, interpreted only by
//! the reducer.
//!
//! ## Reducers
//!
//! A [`Reducer`] computes the next state from the previous one. Any closure
//! or function with the right signature is a reducer; [`infallible`] adapts
//! closures that cannot fail.
//!
//! ## Subscriptions
//!
//! [`Store::subscribe`] returns a [`Subscription`], the capability to remove
//! that one listener again.

mod action;
mod listener;
mod reducer;
#[allow(clippy::module_inception)]
mod store;

pub use action::{Action, INIT, REPLACE};
pub use listener::{ListenerId, Subscription, SubscriptionGuard};
pub use reducer::{infallible, reducer, Infallible, Reducer};
pub use store::{create_store, Store};
