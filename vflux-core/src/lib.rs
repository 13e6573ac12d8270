//! vflux Core
//!
//! This crate provides the core of the vflux UI framework: a virtual-node
//! tree, a materializer that turns it into real output nodes, and a
//! Flux-style store. It implements:
//!
//! - Immutable virtual nodes built with `create_element`
//! - Materialization into a host document through the `Document` trait
//! - Full-replace rendering into a container
//! - A reducer-driven store with dispatch and subscribe
//!
//! The crate is designed to be used as a native Rust library and, with the
//! `python` feature, as a Python extension module via PyO3.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `vdom`: Virtual node model
//! - `dom`: Host document boundary and the in-memory document
//! - `render`: Materializer and renderer
//! - `store`: Actions, reducers, listeners and the store
//! - `config`: Store and document options
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use vflux_core::dom::MemoryDocument;
//! use vflux_core::render::render;
//! use vflux_core::store::{infallible, Action, Store};
//! use vflux_core::vdom::VNode;
//!
//! let store = Store::new(infallible(|state: Option<&i64>, action: &Action| {
//!     let state = state.copied().unwrap_or(0);
//!     if action.is("INC") { state + 1 } else { state }
//! }))?;
//!
//! let doc = Arc::new(Mutex::new(MemoryDocument::new()));
//! let view = {
//!     let store = store.clone();
//!     let doc = doc.clone();
//!     move || {
//!         let tree = VNode::element("p").child(store.get_state().to_string()).build();
//!         let mut doc = doc.lock();
//!         let body = doc.body();
//!         render(&mut *doc, &tree, &body).expect("render failed");
//!     }
//! };
//! store.subscribe(view);
//!
//! store.dispatch("INC")?;
//! // <body><p>1</p></body>
//! ```
//!
//! The store never calls `render` on its own; wiring state changes to
//! rendering is the application's job.

pub mod config;
pub mod dom;
pub mod error;
pub mod render;
pub mod store;
pub mod vdom;

#[cfg(feature = "python")]
mod python;

pub use error::{DomError, Error, ReducerError, Result, StoreError};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed types.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyStore>()?;
    m.add_class::<python::PySubscription>()?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
