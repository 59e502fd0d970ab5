//! goodgrid engine crate.
//!
//! Batched grid/guide overlay for a level editor: a registry of drawable nodes,
//! each emitting lines and rectangles for the visible part of the level, flushed
//! into a handful of draw calls per frame through a [`DrawBackend`].
//!
//! The host editor is reached only through [`EditorSnapshot`], [`Timeline`] and
//! [`DrawBackend`]; [`render::OverlayRenderer`] is a wgpu backend for integrations
//! without their own graphics API.

pub mod api;
pub mod callbacks;
pub mod config;
pub mod coords;
pub mod device;
pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod node;
pub mod nodes;
pub mod paint;
pub mod priority;
pub mod render;
pub mod vertex;

pub use api::{DrawCtx, DrawGrid, FrameOutcome, FrameStats};
pub use config::DrawGridConfig;
pub use error::NodeError;
pub use host::{DrawBackend, EditorSnapshot, Timeline};
pub use node::{DrawNode, LineOverride, LineStyle, NodeBase};
