use crate::coords::Vec2;

/// Engine configuration.
///
/// Every field can also be changed at runtime through the matching `DrawGrid`
/// setter. Persisting these values is the integration's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawGridConfig {
    /// Hand every frame back to the host's built-in drawing.
    pub vanilla_draw: bool,

    /// Anti-alias lines once the camera zoom reaches `line_smoothing_limit`.
    pub line_smoothing: bool,

    /// Minimum zoom at which smoothing applies.
    pub line_smoothing_limit: f32,

    /// Initial hide-invisible mode. The snapshot's value takes over every frame.
    pub hide_invisible: bool,

    /// Remove the right-hand grid bound at `init`, for integrations that extend the
    /// level past the editor's usual length.
    pub unbounded_width: bool,

    /// Minimum corner of the grid bounds.
    pub grid_origin: Vec2,

    /// Maximum corner of the grid bounds.
    pub grid_size: Vec2,
}

impl Default for DrawGridConfig {
    fn default() -> Self {
        Self {
            vanilla_draw: false,
            line_smoothing: false,
            line_smoothing_limit: 0.4,
            hide_invisible: false,
            unbounded_width: false,
            grid_origin: Vec2::new(-3000.0, -3000.0),
            grid_size: Vec2::new(240_000.0, 30_090.0),
        }
    }
}
