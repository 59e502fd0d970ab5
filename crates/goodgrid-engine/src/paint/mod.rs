//! Paint model shared between nodes and the backend.
//!
//! Scope:
//! - 8-bit straight-alpha RGBA, the format the host hands vertices to its shader in
//! - line endpoint color pairs (solid or two-stop gradient)

pub mod color;
pub mod line_color;

pub use color::Rgba8;
pub use line_color::LineColor;
