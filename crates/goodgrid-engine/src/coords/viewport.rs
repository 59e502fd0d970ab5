/// Host window size in points.
///
/// Only the ratio and the size divided by the camera zoom matter to the engine;
/// the backend uses the same value to build its view uniform.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height. A zero height yields an infinite or NaN ratio; callers
    /// validate the viewport first when that matters.
    #[inline]
    pub fn aspect_ratio(self) -> f32 {
        self.width / self.height
    }
}
