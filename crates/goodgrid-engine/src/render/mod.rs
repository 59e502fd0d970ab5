//! wgpu rendering backend.
//!
//! [`OverlayRenderer`] implements [`DrawBackend`](crate::host::DrawBackend) for
//! integrations that draw through wgpu instead of a host graphics API.
//!
//! Convention:
//! - geometry arrives in world units (+Y up)
//! - the vertex shader maps world to NDC around the camera center using a view
//!   uniform (center, zoom, angle, viewport)

mod common;
mod ctx;
mod overlay;

pub use ctx::{RenderCtx, RenderTarget};
pub use overlay::{OverlayBatch, OverlayRenderer};
