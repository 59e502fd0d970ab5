/// Axis-aligned world-space rectangle a frame must render, as inclusive bounds.
///
/// Produced once per frame by the engine and handed to every node. Nodes use the
/// `contains_*` helpers for their own early rejection; the engine never clips.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Region {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Region {
    #[inline]
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    /// Builds the region around `center` with the given half extents and padding,
    /// then clamps each bound to `[lo, hi]` independently.
    ///
    /// The clamp only pulls the minimum up and the maximum down; a view entirely
    /// outside the bounds yields an inverted region, which draws nothing.
    pub fn around(
        center: (f32, f32),
        half: (f32, f32),
        padding: f32,
        lo: (f32, f32),
        hi: (f32, f32),
    ) -> Self {
        Self {
            min_x: (center.0 - half.0 - padding).max(lo.0),
            max_x: (center.0 + half.0 + padding).min(hi.0),
            min_y: (center.1 - half.1 - padding).max(lo.1),
            max_y: (center.1 + half.1 + padding).min(hi.1),
        }
    }

    #[inline]
    pub fn contains_x(self, x: f32) -> bool {
        x >= self.min_x && x <= self.max_x
    }

    #[inline]
    pub fn contains_y(self, y: f32) -> bool {
        y >= self.min_y && y <= self.max_y
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn around_unclamped() {
        let r = Region::around((100.0, 50.0), (10.0, 20.0), 5.0, (-1e6, -1e6), (1e6, 1e6));
        assert_eq!(r, Region::new(85.0, 115.0, 25.0, 75.0));
    }

    #[test]
    fn around_clamps_each_bound_independently() {
        let r = Region::around((0.0, 0.0), (600.0, 600.0), 500.0, (-3000.0, 0.0), (240000.0, 300.0));
        assert_eq!(r.min_x, -1100.0);
        assert_eq!(r.max_x, 1100.0);
        assert_eq!(r.min_y, 0.0);
        assert_eq!(r.max_y, 300.0);
    }

    #[test]
    fn contains_is_inclusive() {
        let r = Region::new(0.0, 10.0, 0.0, 10.0);
        assert!(r.contains_x(0.0) && r.contains_x(10.0));
        assert!(!r.contains_y(10.5));
    }

    proptest! {
        #[test]
        fn around_matches_clamp_per_axis(
            c in -1e5f32..1e5, h in 0f32..1e4, p in 0f32..1e3,
            g_min in -1e5f32..0.0, g_max in 0f32..1e5,
        ) {
            let r = Region::around((c, c), (h, h), p, (g_min, g_min), (g_max, g_max));
            prop_assert_eq!(r.min_x, (c - h - p).max(g_min));
            prop_assert_eq!(r.max_x, (c + h + p).min(g_max));
            prop_assert_eq!(r.min_y, r.min_x);
            prop_assert_eq!(r.max_y, r.max_x);
        }
    }
}
