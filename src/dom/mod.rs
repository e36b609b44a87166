//! Document module
//!
//! An in-memory element tree, the selector engine used to find countdown
//! containers, and the render target abstraction widgets write through.

pub mod document;
pub mod render_target;
pub mod selector;

pub use document::{Document, NodeId};
pub use render_target::{RenderTarget, SharedDocument};
pub use selector::Selector;
