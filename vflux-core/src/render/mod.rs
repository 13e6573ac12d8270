//! Rendering Pipeline
//!
//! Rendering happens in two steps:
//!
//! 1. [`materialize`] walks a [`VNode`](crate::vdom::VNode) tree and builds
//!    the matching detached subtree in a [`Document`](crate::dom::Document).
//!
//! 2. [`render`] swaps that subtree in as the only child of a container.
//!
//! There is no diffing. Every render discards the container's previous
//! content and rebuilds it from scratch, so focus, scroll and input state do
//! not survive a render.

mod materialize;
mod renderer;

pub use materialize::materialize;
pub use renderer::render;
