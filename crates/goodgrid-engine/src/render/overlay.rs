use std::ops::Range;

use crate::coords::Vec2;
use crate::host::{BlendMode, Camera, DrawBackend, Topology};
use crate::paint::Rgba8;
use crate::render::{RenderCtx, RenderTarget};
use crate::vertex::Vertex;

use super::common::{blend_state, vertex_layout, ViewUniform};

/// Width in pixels of the transparent fringe added to smoothed lines.
const FEATHER_PX: f32 = 1.0;

/// Consecutive staged vertices sharing one blend mode.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBatch {
    pub blend: BlendMode,
    pub vertices: Range<u32>,
}

/// wgpu implementation of [`DrawBackend`].
///
/// The engine's flush is recorded rather than drawn: every submission is staged as
/// triangles (wgpu has no wide lines, so line pairs are expanded on the CPU into
/// quads of the current line width) and tagged with the current blend mode. A
/// later [`render`](Self::render) uploads the staging buffer once and replays the
/// batches in order.
///
/// Frame usage:
/// 1) `begin_frame(camera)`
/// 2) `DrawGrid::draw(.., &mut renderer)`
/// 3) `render(ctx, target)`
#[derive(Default)]
pub struct OverlayRenderer {
    camera: Camera,
    blend: BlendMode,
    line_width: f32,
    smoothing: bool,

    staging: Vec<Vertex>,
    batches: Vec<OverlayBatch>,

    pipeline_format: Option<wgpu::TextureFormat>,
    alpha_pipeline: Option<wgpu::RenderPipeline>,
    additive_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    view_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self {
            line_width: 1.0,
            ..Self::default()
        }
    }

    /// Drops the previous frame's batches and sets the camera lines are sized for.
    pub fn begin_frame(&mut self, camera: &Camera) {
        self.camera = *camera;
        self.staging.clear();
        self.batches.clear();
    }

    #[inline]
    pub fn batches(&self) -> &[OverlayBatch] {
        &self.batches
    }

    /// Staged triangle vertices in world units.
    #[inline]
    pub fn staged_vertices(&self) -> &[Vertex] {
        &self.staging
    }

    #[inline]
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.smoothing
    }

    fn stage_lines(&mut self, vertices: &[Vertex]) {
        let zoom = if self.camera.zoom > 0.0 { self.camera.zoom } else { 1.0 };
        let half_width = self.line_width * 0.5 / zoom;
        let feather = if self.smoothing { FEATHER_PX / zoom } else { 0.0 };

        for pair in vertices.chunks_exact(2) {
            expand_line(&pair[0], &pair[1], half_width, feather, &mut self.staging);
        }
    }

    fn close_batch(&mut self, start: usize) {
        let end = self.staging.len() as u32;
        let start = start as u32;
        if start == end {
            return;
        }
        match self.batches.last_mut() {
            Some(last) if last.blend == self.blend && last.vertices.end == start => {
                last.vertices.end = end;
            }
            _ => self.batches.push(OverlayBatch { blend: self.blend, vertices: start..end }),
        }
    }

    /// Uploads the staged geometry and draws every batch into `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.batches.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_bindings(ctx);

        // Mutating methods must happen before borrowing pipelines/buffers immutably.
        self.write_view_uniform(ctx);
        self.ensure_vertex_capacity(ctx, self.staging.len());

        let Some(vbo) = self.vbo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.staging));

        let Some(alpha) = self.alpha_pipeline.as_ref() else { return };
        let Some(additive) = self.additive_pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("goodgrid overlay pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        for batch in &self.batches {
            let pipeline = match batch.blend {
                BlendMode::Alpha => alpha,
                BlendMode::Additive => additive,
            };
            rpass.set_pipeline(pipeline);
            rpass.draw(batch.vertices.clone(), 0..1);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.target_format)
            && self.alpha_pipeline.is_some()
            && self.additive_pipeline.is_some()
        {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("goodgrid overlay shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("goodgrid overlay bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(ViewUniform::min_binding_size()),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("goodgrid overlay pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let make = |mode: BlendMode, label: &str| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[vertex_layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.target_format,
                        blend: Some(blend_state(mode)),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.alpha_pipeline = Some(make(BlendMode::Alpha, "goodgrid overlay alpha pipeline"));
        self.additive_pipeline = Some(make(BlendMode::Additive, "goodgrid overlay additive pipeline"));
        self.pipeline_format = Some(ctx.target_format);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.view_ubo = None;

        log::debug!("overlay pipelines created for {:?}", ctx.target_format);
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.view_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let view_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("goodgrid overlay view ubo"),
            size: std::mem::size_of::<ViewUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("goodgrid overlay bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_ubo.as_entire_binding(),
            }],
        });

        self.view_ubo = Some(view_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_view_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.view_ubo.as_ref() else { return };
        let u = ViewUniform::new(&self.camera, ctx.viewport);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(1024);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("goodgrid overlay vbo"),
            size: (new_cap * Vertex::STRIDE) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
        log::debug!("overlay vertex buffer grown to {new_cap} vertices");
    }
}

impl DrawBackend for OverlayRenderer {
    #[inline]
    fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    #[inline]
    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    #[inline]
    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    #[inline]
    fn set_line_smoothing(&mut self, enabled: bool) {
        self.smoothing = enabled;
    }

    fn submit(&mut self, topology: Topology, vertices: &[Vertex]) {
        let start = self.staging.len();
        match topology {
            Topology::Lines => self.stage_lines(vertices),
            Topology::Triangles => self.staging.extend_from_slice(vertices),
        }
        self.close_batch(start);
    }
}

/// Appends the triangles of a line of half-width `half` (world units), plus a
/// fringe of width `feather` fading to transparent when non-zero.
///
/// Zero-length and non-finite segments emit nothing.
fn expand_line(a: &Vertex, b: &Vertex, half: f32, feather: f32, out: &mut Vec<Vertex>) {
    let (pa, pb) = (a.pos(), b.pos());
    let d = pb - pa;
    let len = d.x.hypot(d.y);
    if len == 0.0 || !len.is_finite() {
        return;
    }

    let unit = Vec2::new(-d.y / len, d.x / len);
    let n = unit * half;
    let (ca, cb) = (a.color, b.color);
    push_quad(out, [pa + n, pa - n], [pb + n, pb - n], [ca, ca], [cb, cb]);

    if feather > 0.0 {
        let m = unit * (half + feather);
        let (fa, fb) = (ca.with_alpha(0), cb.with_alpha(0));
        push_quad(out, [pa + m, pa + n], [pb + m, pb + n], [fa, ca], [fb, cb]);
        push_quad(out, [pa - n, pa - m], [pb - n, pb - m], [ca, fa], [cb, fb]);
    }
}

/// Two triangles spanning the edge `a` (at the line start) and the edge `b`.
fn push_quad(out: &mut Vec<Vertex>, a: [Vec2; 2], b: [Vec2; 2], ca: [Rgba8; 2], cb: [Rgba8; 2]) {
    out.extend_from_slice(&[
        Vertex::at(a[0], ca[0]),
        Vertex::at(a[1], ca[1]),
        Vertex::at(b[0], cb[0]),
        Vertex::at(a[1], ca[1]),
        Vertex::at(b[1], cb[1]),
        Vertex::at(b[0], cb[0]),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x0: f32, x1: f32) -> [Vertex; 2] {
        [Vertex::new(x0, 0.0, Rgba8::white()), Vertex::new(x1, 0.0, Rgba8::new(0, 0, 0, 255))]
    }

    fn renderer(zoom: f32) -> OverlayRenderer {
        let mut r = OverlayRenderer::new();
        r.begin_frame(&Camera { zoom, ..Camera::default() });
        r
    }

    // ── expansion ─────────────────────────────────────────────────────────

    #[test]
    fn line_becomes_quad_of_pixel_width() {
        let mut r = renderer(2.0);
        r.set_line_width(4.0);
        r.submit(Topology::Lines, &line(0.0, 10.0));

        let v = r.staged_vertices();
        assert_eq!(v.len(), 6);
        // 4 px at zoom 2 is 2 world units, so ±1 around the axis
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(ys, [1.0, -1.0, 1.0, -1.0, -1.0, 1.0]);
        assert_eq!(v[0].color, Rgba8::white());
        assert_eq!(v[2].color, Rgba8::new(0, 0, 0, 255));
    }

    #[test]
    fn degenerate_lines_are_dropped() {
        let mut r = renderer(1.0);
        r.submit(Topology::Lines, &line(5.0, 5.0));
        assert!(r.staged_vertices().is_empty());
        assert!(r.batches().is_empty());
    }

    #[test]
    fn smoothing_adds_transparent_fringe() {
        let mut r = renderer(1.0);
        r.set_line_smoothing(true);
        r.submit(Topology::Lines, &line(0.0, 10.0));

        let v = r.staged_vertices();
        assert_eq!(v.len(), 18);
        assert_eq!(v[6].color.a, 0);
        assert_eq!(v[6].position[1], 1.5);
    }

    #[test]
    fn triangles_pass_through() {
        let mut r = renderer(1.0);
        let tri = [Vertex::new(0.0, 0.0, Rgba8::white()); 3];
        r.submit(Topology::Triangles, &tri);
        assert_eq!(r.staged_vertices(), &tri);
    }

    // ── batching ──────────────────────────────────────────────────────────

    #[test]
    fn consecutive_submissions_merge_per_blend() {
        let mut r = renderer(1.0);
        r.submit(Topology::Lines, &line(0.0, 10.0));
        r.set_line_width(3.0);
        r.submit(Topology::Lines, &line(0.0, 10.0));
        r.set_blend_mode(BlendMode::Additive);
        r.submit(Topology::Lines, &line(0.0, 10.0));

        assert_eq!(
            r.batches(),
            [
                OverlayBatch { blend: BlendMode::Alpha, vertices: 0..12 },
                OverlayBatch { blend: BlendMode::Additive, vertices: 12..18 },
            ]
        );
    }

    #[test]
    fn begin_frame_clears_staging() {
        let mut r = renderer(1.0);
        r.submit(Topology::Lines, &line(0.0, 10.0));
        r.begin_frame(&Camera::default());
        assert!(r.staged_vertices().is_empty());
        assert!(r.batches().is_empty());
    }
}
