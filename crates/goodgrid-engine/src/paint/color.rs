use bytemuck::{Pod, Zeroable};

/// Straight-alpha 8-bit RGBA color.
///
/// Stored exactly as submitted to the backend; the vertex layout reads it as
/// normalized `Unorm8x4`, so each channel maps `0..=255` to `0.0..=1.0`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns the same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

impl From<[u8; 4]> for Rgba8 {
    #[inline]
    fn from(c: [u8; 4]) -> Self {
        Rgba8::new(c[0], c[1], c[2], c[3])
    }
}
