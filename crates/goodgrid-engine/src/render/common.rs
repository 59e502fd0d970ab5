//! GPU types shared by the overlay pipelines.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Vec2, Viewport};
use crate::host::{BlendMode, Camera};
use crate::vertex::Vertex;

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight-alpha blending; overlay colors are not premultiplied.
pub(super) fn alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// `one, one` on every channel.
pub(super) fn additive_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

pub(super) fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    match mode {
        BlendMode::Alpha => alpha_blend(),
        BlendMode::Additive => additive_blend(),
    }
}

// ── view uniform ──────────────────────────────────────────────────────────

/// World → clip transform inputs.
///
/// `center` is the world point under the middle of the target; rotation pivots
/// around it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct ViewUniform {
    pub center: [f32; 2],
    pub viewport: [f32; 2],
    pub zoom: f32,
    pub angle: f32,
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewUniform {
    pub(super) fn new(camera: &Camera, viewport: Viewport) -> Self {
        let size = Vec2::new(viewport.width.max(1.0), viewport.height.max(1.0));
        let center = camera.to_layer_space(size * 0.5);
        Self {
            center: center.to_array(),
            viewport: size.to_array(),
            zoom: camera.zoom,
            angle: camera.angle_radians(),
            _pad: [0.0; 2],
        }
    }

    /// CPU mirror of `vs_main` in `overlay.wgsl`.
    #[cfg(test)]
    pub(super) fn to_ndc(&self, world: Vec2) -> Vec2 {
        let rel = (world - Vec2::from(self.center)) * self.zoom;
        let (s, c) = (-self.angle).sin_cos();
        let rotated = Vec2::new(c * rel.x - s * rel.y, s * rel.x + c * rel.y);
        Vec2::new(rotated.x / (self.viewport[0] * 0.5), rotated.y / (self.viewport[1] * 0.5))
    }

    pub(super) fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<ViewUniform>() as u64)
            .expect("ViewUniform has non-zero size by construction")
    }
}

// ── vertex layout ─────────────────────────────────────────────────────────

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x2, // position
    1 => Unorm8x4   // color
];

pub(super) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: Vertex::STRIDE as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::EditorSnapshot;
    use crate::nodes::crosshair_position;

    #[test]
    fn view_uniform_is_aligned() {
        assert_eq!(std::mem::size_of::<ViewUniform>() % 16, 0);
    }

    fn near(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    // ── view uniform ──────────────────────────────────────────────────────

    #[test]
    fn view_uniform_centers_on_middle_of_target() {
        let cam = Camera { layer_position: Vec2::new(-100.0, -50.0), zoom: 2.0, angle_degrees: 0.0 };
        let u = ViewUniform::new(&cam, Viewport::new(400.0, 300.0));
        // screen middle (200,150) back through layer position and zoom
        assert_eq!(u.center, [150.0, 100.0]);
        assert_eq!(u.viewport, [400.0, 300.0]);
        assert_eq!(u.zoom, 2.0);
    }

    #[test]
    fn degenerate_viewport_is_clamped() {
        let u = ViewUniform::new(&Camera::default(), Viewport::new(0.0, 300.0));
        assert_eq!(u.viewport, [1.0, 300.0]);
    }

    #[test]
    fn crosshair_maps_to_clip_origin() {
        let zoom = 1.5;
        let editor = EditorSnapshot {
            window: Viewport::new(1280.0, 720.0),
            camera: Camera {
                layer_position: -Vec2::new(600.0, 300.0) * zoom,
                zoom,
                angle_degrees: 0.0,
            },
            ..EditorSnapshot::default()
        };
        let u = ViewUniform::new(&editor.camera, editor.window);
        let ndc = u.to_ndc(crosshair_position(&editor));
        assert!(near(ndc, Vec2::zero()), "crosshair at {ndc:?}");
    }

    #[test]
    fn screen_origin_maps_to_bottom_left_corner() {
        let cam = Camera { layer_position: Vec2::new(-80.0, 40.0), zoom: 2.0, angle_degrees: 0.0 };
        let u = ViewUniform::new(&cam, Viewport::new(640.0, 480.0));
        let ndc = u.to_ndc(cam.to_layer_space(Vec2::zero()));
        assert!(near(ndc, Vec2::new(-1.0, -1.0)), "origin at {ndc:?}");
    }

    #[test]
    fn rotation_pivots_around_target_middle() {
        let cam = Camera { layer_position: Vec2::new(-80.0, 40.0), zoom: 2.0, angle_degrees: 37.0 };
        let viewport = Viewport::new(640.0, 480.0);
        let u = ViewUniform::new(&cam, viewport);
        let middle = cam.to_layer_space(Vec2::new(320.0, 240.0));
        assert!(near(u.to_ndc(middle), Vec2::zero()));
    }

    // ── blend ─────────────────────────────────────────────────────────────

    #[test]
    fn additive_is_one_one() {
        let b = blend_state(BlendMode::Additive);
        assert_eq!(b.color.src_factor, wgpu::BlendFactor::One);
        assert_eq!(b.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(b.alpha.src_factor, wgpu::BlendFactor::One);
        assert_eq!(b.alpha.dst_factor, wgpu::BlendFactor::One);
    }

    #[test]
    fn alpha_is_straight_src_alpha() {
        let b = blend_state(BlendMode::Alpha);
        assert_eq!(b.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(b.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    }
}
