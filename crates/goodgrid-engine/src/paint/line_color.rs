use super::Rgba8;

/// Endpoint colors of a line.
///
/// A solid line carries only `color_a`; a gradient line also carries `color_b`,
/// which the backend interpolates across the two vertices. Immutable once built.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct LineColor {
    color_a: Rgba8,
    color_b: Option<Rgba8>,
}

impl LineColor {
    /// Solid color from channels.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::solid(Rgba8::new(r, g, b, a))
    }

    #[inline]
    pub const fn solid(color: Rgba8) -> Self {
        Self { color_a: color, color_b: None }
    }

    /// Two-stop gradient: `a` at the line start, `b` at its end.
    #[inline]
    pub const fn gradient(a: Rgba8, b: Rgba8) -> Self {
        Self { color_a: a, color_b: Some(b) }
    }

    #[inline]
    pub const fn color_a(&self) -> Rgba8 {
        self.color_a
    }

    /// End color; falls back to `color_a` for solid lines.
    #[inline]
    pub const fn color_b(&self) -> Rgba8 {
        match self.color_b {
            Some(b) => b,
            None => self.color_a,
        }
    }

    #[inline]
    pub const fn is_gradient(&self) -> bool {
        self.color_b.is_some()
    }
}

impl From<Rgba8> for LineColor {
    #[inline]
    fn from(c: Rgba8) -> Self {
        LineColor::solid(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_falls_back_to_color_a() {
        let c = LineColor::solid(Rgba8::new(0, 0, 0, 150));
        assert_eq!(c.color_b(), Rgba8::new(0, 0, 0, 150));
        assert!(!c.is_gradient());
    }

    #[test]
    fn gradient_keeps_both_stops() {
        let c = LineColor::gradient(Rgba8::white(), Rgba8::transparent());
        assert_eq!(c.color_a(), Rgba8::white());
        assert_eq!(c.color_b(), Rgba8::transparent());
    }
}
