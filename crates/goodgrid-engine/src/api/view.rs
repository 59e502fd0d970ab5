use crate::coords::{Vec2, Viewport};
use crate::host::Camera;

/// Viewport-derived quantities, recomputed only after invalidation.
///
/// The overdraw factor inflates the nominal view so that a rotated camera never
/// exposes geometry the region culled away.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
    dirty: bool,
    overdraw_factor: f32,
    world_view_size: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            dirty: true,
            overdraw_factor: 1.0,
            world_view_size: Vec2::zero(),
        }
    }
}

impl ViewTransform {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the cached values; the next `ensure_valid` recomputes them.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn overdraw_factor(&self) -> f32 {
        self.overdraw_factor
    }

    #[inline]
    pub fn world_view_size(&self) -> Vec2 {
        self.world_view_size
    }

    /// Recomputes the cache if dirty. Returns `true` when it did.
    pub fn ensure_valid(&mut self, window: Viewport, camera: &Camera) -> bool {
        if !self.dirty {
            return false;
        }

        self.overdraw_factor = overdraw_factor(window, camera.angle_radians());
        let scaled = Vec2::new(window.width, window.height) / camera.zoom;
        self.world_view_size = scaled * self.overdraw_factor;
        self.dirty = false;

        log::debug!(
            "view transform recomputed: overdraw {:.3}, world view {:.1}x{:.1}",
            self.overdraw_factor,
            self.world_view_size.x,
            self.world_view_size.y
        );
        true
    }
}

/// `max(aspect, |sin θ| + 2·|cos θ|)`.
pub fn overdraw_factor(window: Viewport, angle_radians: f32) -> f32 {
    let (sin, cos) = angle_radians.sin_cos();
    window.aspect_ratio().max(sin.abs() + cos.abs() * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(zoom: f32, angle_degrees: f32) -> Camera {
        Camera { layer_position: Vec2::zero(), zoom, angle_degrees }
    }

    #[test]
    fn unrotated_wide_window_uses_aspect_when_larger() {
        // aspect 3.0 beats |sin 0| + 2|cos 0| = 2.0
        assert_eq!(overdraw_factor(Viewport::new(900.0, 300.0), 0.0), 3.0);
        // aspect 1.5 loses to 2.0
        assert_eq!(overdraw_factor(Viewport::new(450.0, 300.0), 0.0), 2.0);
    }

    #[test]
    fn rotation_changes_factor() {
        let f = overdraw_factor(Viewport::new(300.0, 300.0), 90f32.to_radians());
        assert!((f - 1.0).abs() < 1e-5);
    }

    #[test]
    fn world_view_size_divides_by_zoom() {
        let mut vt = ViewTransform::new();
        assert!(vt.ensure_valid(Viewport::new(600.0, 300.0), &camera(2.0, 0.0)));
        assert_eq!(vt.overdraw_factor(), 2.0);
        assert_eq!(vt.world_view_size(), Vec2::new(600.0, 300.0));
    }

    #[test]
    fn cache_is_lazy_until_marked_dirty() {
        let mut vt = ViewTransform::new();
        vt.ensure_valid(Viewport::new(600.0, 300.0), &camera(1.0, 0.0));
        let before = vt.world_view_size();

        // zoom changed but nobody invalidated: cached values stay
        assert!(!vt.ensure_valid(Viewport::new(600.0, 300.0), &camera(4.0, 0.0)));
        assert_eq!(vt.world_view_size(), before);

        vt.mark_dirty();
        assert!(vt.is_dirty());
        assert!(vt.ensure_valid(Viewport::new(600.0, 300.0), &camera(4.0, 0.0)));
        assert_eq!(vt.world_view_size(), before / 4.0);
    }
}
