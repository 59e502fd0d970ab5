//! Coordinate and geometry types shared by the engine, the nodes and the backend.
//!
//! Canonical CPU space is editor world space:
//! - one unit per editor pixel at zoom 1
//! - +X right (along the level), +Y up
//!
//! The backend converts to NDC in its vertex shader using a view uniform.

mod rect;
mod region;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use region::Region;
pub use vec2::Vec2;
pub use viewport::Viewport;
