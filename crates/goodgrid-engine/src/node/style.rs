use crate::paint::LineColor;

/// Color and width of one emitted line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyle {
    pub color: LineColor,
    /// Width in screen pixels.
    pub width: f32,
}

impl LineStyle {
    #[inline]
    pub const fn new(color: LineColor, width: f32) -> Self {
        Self { color, width }
    }
}

/// What a customization hook wants changed on a line before it is emitted.
///
/// Every field is optional; `None` keeps the value the node (or an earlier hook)
/// chose. The meaning of `position` depends on the node kind: the X of a vertical
/// line, the Y of a horizontal one. Kinds whose position is not overridable
/// document that they ignore it.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LineOverride {
    pub color: Option<LineColor>,
    pub width: Option<f32>,
    pub position: Option<f32>,
}

impl LineOverride {
    /// Changes nothing.
    #[inline]
    pub const fn keep() -> Self {
        Self { color: None, width: None, position: None }
    }

    #[inline]
    pub fn color(mut self, color: impl Into<LineColor>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[inline]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    #[inline]
    pub fn position(mut self, position: f32) -> Self {
        self.position = Some(position);
        self
    }

    /// Applies color and width to `style`, position to `position`.
    #[inline]
    pub fn apply(&self, style: &mut LineStyle, position: &mut f32) {
        self.apply_style(style);
        if let Some(p) = self.position {
            *position = p;
        }
    }

    /// Applies color and width only.
    #[inline]
    pub fn apply_style(&self, style: &mut LineStyle) {
        if let Some(c) = self.color {
            style.color = c;
        }
        if let Some(w) = self.width {
            style.width = w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Rgba8;

    #[test]
    fn keep_changes_nothing() {
        let mut style = LineStyle::new(LineColor::rgba(1, 2, 3, 4), 1.0);
        let mut x = 10.0;
        LineOverride::keep().apply(&mut style, &mut x);
        assert_eq!(style, LineStyle::new(LineColor::rgba(1, 2, 3, 4), 1.0));
        assert_eq!(x, 10.0);
    }

    #[test]
    fn partial_override() {
        let mut style = LineStyle::new(LineColor::rgba(1, 2, 3, 4), 1.0);
        let mut x = 10.0;
        LineOverride::keep().color(Rgba8::white()).position(12.0).apply(&mut style, &mut x);
        assert_eq!(style.color, LineColor::solid(Rgba8::white()));
        assert_eq!(style.width, 1.0);
        assert_eq!(x, 12.0);
    }
}
