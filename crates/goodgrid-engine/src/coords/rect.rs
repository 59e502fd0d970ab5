use super::Vec2;

/// Axis-aligned rectangle in world units, `origin` being the minimum corner.
///
/// Negative sizes are allowed. Geometry builders take the rectangle as given, so a
/// negative size simply produces mirrored (or degenerate) triangles.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    /// Rectangle spanning two corners, in any order.
    #[inline]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Rect::new(a.x.min(b.x), a.y.min(b.y), (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    /// `true` when either extent is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}
