use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Rgba8;

/// Position + color, the unit submitted to a [`DrawBackend`](crate::host::DrawBackend).
///
/// Layout is fixed: two `f32` position components, four color bytes, four bytes of
/// padding, giving a 16-byte stride backends can hand straight to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba8,
    pub _pad: [u8; 4],
}

impl Vertex {
    /// Byte distance between consecutive vertices.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    #[inline]
    pub const fn new(x: f32, y: f32, color: Rgba8) -> Self {
        Self { position: [x, y], color, _pad: [0; 4] }
    }

    #[inline]
    pub const fn at(p: Vec2, color: Rgba8) -> Self {
        Self::new(p.x, p.y, color)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::from(self.position)
    }
}
