use crate::vertex::Vertex;

/// Blend function applied to subsequent submissions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BlendMode {
    /// `src_alpha, one_minus_src_alpha`.
    #[default]
    Alpha,
    /// `one, one`.
    Additive,
}

/// Primitive topology of a submitted vertex slice.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    /// Every two vertices form one line segment.
    Lines,
    /// Every three vertices form one triangle.
    Triangles,
}

/// The host's raw draw-submission primitive.
///
/// Each `submit` is exactly one draw call over a contiguous, interleaved vertex
/// slice with stride [`Vertex::STRIDE`]. Implementations must not retain the
/// slice; the engine reuses its storage next frame.
pub trait DrawBackend {
    /// Current blend function, queried so the engine can restore it after a frame.
    fn blend_mode(&self) -> BlendMode;

    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Width in screen pixels for subsequent line submissions.
    fn set_line_width(&mut self, width: f32);

    /// Enables or disables line anti-aliasing. Backends without support ignore it.
    fn set_line_smoothing(&mut self, enabled: bool) {
        let _ = enabled;
    }

    fn submit(&mut self, topology: Topology, vertices: &[Vertex]);
}
